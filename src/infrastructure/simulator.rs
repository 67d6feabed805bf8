//! Randomized availability drift for the map view.
//!
//! Purely cosmetic: nothing is persisted and no other client sees it.

use crate::config::SimulatorConfig;
use crate::domain::random::RandomSource;
use crate::domain::ParkingSpot;

pub struct AvailabilitySimulator {
    // ---
    rng: Box<dyn RandomSource>,
    change_probability: f64,
}

impl AvailabilitySimulator {
    // ---
    pub fn new(config: &SimulatorConfig, rng: Box<dyn RandomSource>) -> Self {
        // ---
        Self {
            rng,
            change_probability: config.change_probability,
        }
    }

    /// Nudges each spot's free bay count by ±1 with the configured
    /// probability, keeping it inside `[0, total_spots]`.
    ///
    /// Returns how many spots actually changed.
    pub fn tick(&mut self, spots: &mut [ParkingSpot]) -> usize {
        // ---
        let mut changed = 0;

        for spot in spots.iter_mut() {
            if self.rng.next_f64() >= self.change_probability {
                continue;
            }

            let delta = if self.rng.next_f64() < 0.5 { 1 } else { -1 };
            let before = spot.available_spots;
            spot.adjust_available(delta);
            if spot.available_spots != before {
                changed += 1;
            }
        }

        tracing::trace!("availability tick changed {} spots", changed);
        changed
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::random::{ScriptedRandom, StdRandom};
    use crate::infrastructure::fixtures;

    fn simulator(rng: Box<dyn RandomSource>) -> AvailabilitySimulator {
        // ---
        AvailabilitySimulator::new(&SimulatorConfig::default(), rng)
    }

    #[test]
    fn bounds_hold_over_many_ticks() {
        // ---
        let mut sim = simulator(Box::new(StdRandom::seeded(42)));
        let mut spots = fixtures::parking_spots();

        for _ in 0..2_000 {
            sim.tick(&mut spots);
            for spot in &spots {
                assert!(spot.available_spots <= spot.total_spots);
            }
        }
    }

    #[test]
    fn draw_above_probability_leaves_spot_alone() {
        // ---
        let mut sim = simulator(Box::new(ScriptedRandom::new(vec![0.95])));
        let mut spots = fixtures::parking_spots();
        let before = spots.clone();

        assert_eq!(sim.tick(&mut spots), 0);
        assert_eq!(spots, before);
    }

    #[test]
    fn scripted_draws_pick_direction() {
        // ---
        let mut spots = fixtures::parking_spots();
        spots.truncate(2);
        let (a, b) = (spots[0].available_spots, spots[1].available_spots);

        // spot 0: change, up; spot 1: change, down
        let mut sim = simulator(Box::new(ScriptedRandom::new(vec![0.1, 0.2, 0.1, 0.8])));
        assert_eq!(sim.tick(&mut spots), 2);
        assert_eq!(spots[0].available_spots, a + 1);
        assert_eq!(spots[1].available_spots, b - 1);
    }

    #[test]
    fn empty_and_full_spots_clamp() {
        // ---
        let mut spots = fixtures::parking_spots();
        spots.truncate(2);
        spots[0].available_spots = 0;
        spots[1].available_spots = spots[1].total_spots;

        // spot 0 tries to go down, spot 1 tries to go up
        let mut sim = simulator(Box::new(ScriptedRandom::new(vec![0.1, 0.9, 0.1, 0.1])));
        assert_eq!(sim.tick(&mut spots), 0);
        assert_eq!(spots[0].available_spots, 0);
        assert_eq!(spots[1].available_spots, spots[1].total_spots);
    }
}
