use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a parking location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkingType {
    // ---
    Standard,
    Ev,
    Disabled,
    Moto,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    // ---
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    // ---
    pub fn new(lat: f64, lng: f64) -> Self {
        // ---
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    // ---
    pub id: String,
    pub user: String,
    pub rating: f64,
    pub text: String,
    pub date: String,
}

/// A parking location with a capacity and an hourly price.
///
/// `available_spots` never exceeds `total_spots`; both the availability
/// simulator and reservation creation keep it inside `[0, total_spots]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    // ---
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: ParkingType,
    pub total_spots: u32,
    pub available_spots: u32,
    /// Base price in UZS per hour.
    pub base_price_per_hour: i64,
    pub rating: f64,
    pub image: String,
    pub features: Vec<String>,
    #[serde(rename = "is247")]
    pub is_24_7: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl ParkingSpot {
    // ---
    /// Removes one free bay, never going below zero.
    pub fn take_one(&mut self) {
        // ---
        self.available_spots = self.available_spots.saturating_sub(1);
    }

    /// Applies a signed change to the free bay count, clamped to `[0, total_spots]`.
    pub fn adjust_available(&mut self, delta: i64) {
        // ---
        let next = (self.available_spots as i64 + delta).clamp(0, self.total_spots as i64);
        self.available_spots = next as u32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    // ---
    Active,
    Completed,
    Cancelled,
}

/// A booked time window against a spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    // ---
    pub id: String,
    pub parking_id: String,
    pub parking_name: String,
    #[serde(default)]
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: u32,
    pub total_price: i64,
    pub status: ReservationStatus,
    pub car_type: String,
    pub payment_method: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub qr_code_data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    // ---
    Deposit,
    Payment,
    Refund,
}

/// One entry of the wallet ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    // ---
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    // ---
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    // ---
    Uz,
    Ru,
    Cyr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    // ---
    pub dark_mode: bool,
    pub notifications: bool,
    pub language: Language,
}

impl Default for Preferences {
    // ---
    fn default() -> Self {
        // ---
        Self {
            dark_mode: true,
            notifications: true,
            language: Language::Uz,
        }
    }
}

/// The signed-in user, including wallet and garage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    // ---
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_plate: Option<String>,
    pub garage: Vec<String>,
    pub balance: i64,
    pub bonus_points: i64,
    #[serde(default)]
    pub preferences: Preferences,
}

impl User {
    // ---
    pub fn is_admin(&self) -> bool {
        // ---
        self.role == Role::Admin
    }
}

/// One point of the admin revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStat {
    // ---
    pub name: String,
    pub revenue: i64,
    pub bookings: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsKind {
    // ---
    Promo,
    Alert,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    // ---
    pub id: String,
    pub title: String,
    pub desc: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: NewsKind,
}

/// A vehicle class and its price multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarType {
    // ---
    pub id: &'static str,
    pub multiplier: f64,
}

/// A way to pay for a booking. Only wallet-backed methods touch the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentMethod {
    // ---
    pub id: &'static str,
    pub debits_wallet: bool,
}

/// Body of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    // ---
    pub spot_id: String,
    pub user_id: String,
    pub duration: u32,
    pub car_type: String,
    pub payment_method: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    // ---
    pub email: String,
    pub role: Role,
}

/// Direction of a wallet balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceChange {
    // ---
    Deposit,
    Withdraw,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn spot(total: u32, available: u32) -> ParkingSpot {
        // ---
        ParkingSpot {
            id: "p1".to_string(),
            name: "Test".to_string(),
            address: "Street".to_string(),
            lat: 41.3,
            lng: 69.2,
            kind: ParkingType::Standard,
            total_spots: total,
            available_spots: available,
            base_price_per_hour: 5000,
            rating: 4.5,
            image: String::new(),
            features: vec![],
            is_24_7: true,
            reviews: None,
        }
    }

    #[test]
    fn take_one_floors_at_zero() {
        // ---
        let mut s = spot(10, 1);
        s.take_one();
        assert_eq!(s.available_spots, 0);
        s.take_one();
        assert_eq!(s.available_spots, 0);
    }

    #[test]
    fn adjust_available_clamps_to_capacity() {
        // ---
        let mut s = spot(3, 3);
        s.adjust_available(1);
        assert_eq!(s.available_spots, 3);
        s.adjust_available(-5);
        assert_eq!(s.available_spots, 0);
    }

    #[test]
    fn spot_uses_wire_field_names() {
        // ---
        let json = serde_json::to_value(spot(10, 4)).unwrap();
        assert_eq!(json["type"], "standard");
        assert_eq!(json["totalSpots"], 10);
        assert_eq!(json["availableSpots"], 4);
        assert_eq!(json["basePricePerHour"], 5000);
        assert_eq!(json["is247"], true);
        assert!(json.get("reviews").is_none());
    }

    #[test]
    fn transaction_kind_serialises_as_type() {
        // ---
        let trx = Transaction {
            id: "t1".to_string(),
            kind: TransactionKind::Deposit,
            amount: 50_000,
            date: Utc::now(),
            description: "top_up".to_string(),
        };
        let json = serde_json::to_value(&trx).unwrap();
        assert_eq!(json["type"], "deposit");
    }
}
