use super::models::{ParkingSpot, ParkingType};
use serde::{Deserialize, Serialize};

/// Map filter toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotFilter {
    // ---
    pub only_free: bool,
    pub only_ev: bool,
    pub only_247: bool,
}

impl SpotFilter {
    // ---
    /// True when `spot` passes the toggles and matches `query`.
    ///
    /// An empty query matches everything; otherwise the query must appear,
    /// case-insensitively, in the spot name or address.
    pub fn matches(&self, spot: &ParkingSpot, query: &str) -> bool {
        // ---
        if self.only_free && spot.available_spots == 0 {
            return false;
        }
        if self.only_ev && spot.kind != ParkingType::Ev {
            return false;
        }
        if self.only_247 && !spot.is_24_7 {
            return false;
        }
        if query.is_empty() {
            return true;
        }

        let needle = query.to_lowercase();
        spot.name.to_lowercase().contains(&needle) || spot.address.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, spots: &'a [ParkingSpot], query: &str) -> Vec<&'a ParkingSpot> {
        // ---
        spots.iter().filter(|s| self.matches(s, query)).collect()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn spot(id: &str, name: &str, kind: ParkingType, available: u32, is_24_7: bool) -> ParkingSpot {
        // ---
        ParkingSpot {
            id: id.to_string(),
            name: name.to_string(),
            address: format!("{name} ko'chasi"),
            lat: 0.0,
            lng: 0.0,
            kind,
            total_spots: 10,
            available_spots: available,
            base_price_per_hour: 5000,
            rating: 4.0,
            image: String::new(),
            features: vec![],
            is_24_7,
            reviews: None,
        }
    }

    fn sample() -> Vec<ParkingSpot> {
        // ---
        vec![
            spot("a", "Chorsu", ParkingType::Standard, 0, true),
            spot("b", "Magic City", ParkingType::Ev, 3, false),
            spot("c", "Tashkent City", ParkingType::Ev, 1, true),
            spot("d", "Amir Temur", ParkingType::Moto, 5, false),
        ]
    }

    fn ids(found: Vec<&ParkingSpot>) -> Vec<&str> {
        // ---
        found.into_iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        // ---
        let spots = sample();
        assert_eq!(ids(SpotFilter::default().apply(&spots, "")), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn toggles_combine() {
        // ---
        let spots = sample();
        let only_free = SpotFilter { only_free: true, ..Default::default() };
        assert_eq!(ids(only_free.apply(&spots, "")), vec!["b", "c", "d"]);

        let ev_247 = SpotFilter { only_ev: true, only_247: true, ..Default::default() };
        assert_eq!(ids(ev_247.apply(&spots, "")), vec!["c"]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_address() {
        // ---
        let spots = sample();
        let filter = SpotFilter::default();
        assert_eq!(ids(filter.apply(&spots, "CITY")), vec!["b", "c"]);
        assert_eq!(ids(filter.apply(&spots, "temur ko'")), vec!["d"]);
        assert!(filter.apply(&spots, "nowhere").is_empty());
    }
}
