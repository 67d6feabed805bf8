//! Static seed data standing in for a real data source.

use crate::domain::pricing::total_price;
use crate::domain::{
    AdminStat, CarType, Language, NewsItem, NewsKind, ParkingSpot, ParkingType, PaymentMethod,
    Preferences, Reservation, ReservationRequest, ReservationStatus, Review, Role, Transaction,
    TransactionKind, User,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

/// Starting wallet balance of the canned profiles.
pub const STARTING_BALANCE: i64 = 150_000;

/// Starting bonus points of the canned profiles.
pub const STARTING_BONUS: i64 = 50;

pub const CAR_TYPES: [CarType; 5] = [
    CarType { id: "sedan", multiplier: 1.0 },
    CarType { id: "suv", multiplier: 1.2 },
    CarType { id: "minivan", multiplier: 1.3 },
    CarType { id: "truck", multiplier: 1.5 },
    CarType { id: "moto", multiplier: 0.5 },
];

pub const PAYMENT_METHODS: [PaymentMethod; 4] = [
    PaymentMethod { id: "payme", debits_wallet: true },
    PaymentMethod { id: "click", debits_wallet: false },
    PaymentMethod { id: "uzcard", debits_wallet: false },
    PaymentMethod { id: "cash", debits_wallet: false },
];

/// Multiplier of `car_type`; unknown types price as 1.0.
pub fn car_multiplier(car_type: &str) -> f64 {
    // ---
    CAR_TYPES
        .iter()
        .find(|c| c.id == car_type)
        .map(|c| c.multiplier)
        .unwrap_or(1.0)
}

/// True when paying with `method` takes money from the in-app wallet.
pub fn debits_wallet(method: &str) -> bool {
    // ---
    PAYMENT_METHODS
        .iter()
        .any(|m| m.id == method && m.debits_wallet)
}

#[allow(clippy::too_many_arguments)]
fn spot(
    id: &str,
    name: &str,
    address: &str,
    (lat, lng): (f64, f64),
    kind: ParkingType,
    (total_spots, available_spots): (u32, u32),
    base_price_per_hour: i64,
    rating: f64,
    features: &[&str],
    is_24_7: bool,
) -> ParkingSpot {
    // ---
    ParkingSpot {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        lat,
        lng,
        kind,
        total_spots,
        available_spots,
        base_price_per_hour,
        rating,
        image: format!("https://images.smartparking.uz/spots/{id}.jpg"),
        features: features.iter().map(|f| f.to_string()).collect(),
        is_24_7,
        reviews: None,
    }
}

static SPOTS: Lazy<Vec<ParkingSpot>> = Lazy::new(|| {
    let mut spots = vec![
        spot(
            "p1",
            "Tashkent City Mall",
            "Furqat ko'chasi 5, Olmazor",
            (41.3165, 69.2485),
            ParkingType::Standard,
            (120, 45),
            20_000,
            4.8,
            &["covered", "security", "cctv"],
            true,
        ),
        spot(
            "p2",
            "Magic City EV Hub",
            "Babur ko'chasi 174, Yakkasaroy",
            (41.3030, 69.2440),
            ParkingType::Ev,
            (40, 12),
            15_000,
            4.6,
            &["ev_charging", "cafe"],
            false,
        ),
        spot(
            "p3",
            "Chorsu Bazaar",
            "Navoiy ko'chasi 1, Shayxontohur",
            (41.3262, 69.2357),
            ParkingType::Standard,
            (80, 0),
            8_000,
            4.1,
            &["open_air"],
            false,
        ),
        spot(
            "p4",
            "Amir Temur Square",
            "Amir Temur ko'chasi 2, Yunusobod",
            (41.3111, 69.2797),
            ParkingType::Disabled,
            (10, 4),
            5_000,
            4.4,
            &["ramp", "security"],
            true,
        ),
        spot(
            "p5",
            "Next Mall Moto Bay",
            "Shota Rustaveli 12, Yakkasaroy",
            (41.2906, 69.2626),
            ParkingType::Moto,
            (30, 18),
            3_000,
            4.3,
            &["helmet_lockers"],
            true,
        ),
        spot(
            "p6",
            "Samarqand Darvoza",
            "Qoratosh ko'chasi 5A, Shayxontohur",
            (41.3167, 69.2197),
            ParkingType::Ev,
            (60, 27),
            12_000,
            4.7,
            &["ev_charging", "covered", "car_wash"],
            true,
        ),
    ];

    spots[0].reviews = Some(vec![Review {
        id: "r1".to_string(),
        user: "Aziz".to_string(),
        rating: 5.0,
        text: "Joy ko'p, xavfsiz.".to_string(),
        date: "2025-01-12".to_string(),
    }]);

    spots
});

static TRANSACTIONS: Lazy<Vec<Transaction>> = Lazy::new(|| {
    let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 1, d, h, 0, 0).single().unwrap_or_default();
    vec![
        Transaction {
            id: "t3".to_string(),
            kind: TransactionKind::Payment,
            amount: 40_000,
            date: at(14, 18),
            description: "Parkovka: Tashkent City Mall".to_string(),
        },
        Transaction {
            id: "t2".to_string(),
            kind: TransactionKind::Deposit,
            amount: 100_000,
            date: at(12, 9),
            description: "Payme orqali to'ldirish".to_string(),
        },
        Transaction {
            id: "t1".to_string(),
            kind: TransactionKind::Payment,
            amount: 15_000,
            date: at(10, 13),
            description: "Parkovka: Magic City EV Hub".to_string(),
        },
    ]
});

static ADMIN_STATS: Lazy<Vec<AdminStat>> = Lazy::new(|| {
    [
        ("Mon", 4_000_000, 210),
        ("Tue", 3_000_000, 160),
        ("Wed", 2_000_000, 118),
        ("Thu", 2_780_000, 139),
        ("Fri", 1_890_000, 97),
        ("Sat", 2_390_000, 128),
        ("Sun", 3_490_000, 181),
    ]
    .into_iter()
    .map(|(name, revenue, bookings)| AdminStat {
        name: name.to_string(),
        revenue,
        bookings,
    })
    .collect()
});

static NEWS: Lazy<Vec<NewsItem>> = Lazy::new(|| {
    vec![
        NewsItem {
            id: "n1".to_string(),
            title: "Birinchi bron uchun 20% chegirma".to_string(),
            desc: "Payme orqali to'lovda bonus ballar ikki baravar.".to_string(),
            date: "2025-01-15".to_string(),
            kind: NewsKind::Promo,
        },
        NewsItem {
            id: "n2".to_string(),
            title: "Chorsu parkovkasi ta'mirda".to_string(),
            desc: "Shanba kuni 08:00 dan 14:00 gacha yopiq.".to_string(),
            date: "2025-01-13".to_string(),
            kind: NewsKind::Alert,
        },
        NewsItem {
            id: "n3".to_string(),
            title: "Yangi EV zaryadlash nuqtalari".to_string(),
            desc: "Samarqand Darvoza'da 10 ta yangi quvvat nuqtasi.".to_string(),
            date: "2025-01-10".to_string(),
            kind: NewsKind::Info,
        },
    ]
});

pub fn parking_spots() -> Vec<ParkingSpot> {
    SPOTS.clone()
}

pub fn find_spot(id: &str) -> Option<ParkingSpot> {
    // ---
    SPOTS.iter().find(|s| s.id == id).cloned()
}

pub fn transactions() -> Vec<Transaction> {
    TRANSACTIONS.clone()
}

pub fn admin_stats() -> Vec<AdminStat> {
    ADMIN_STATS.clone()
}

pub fn news() -> Vec<NewsItem> {
    NEWS.clone()
}

/// Canned profile returned for any login with `role`.
pub fn profile_for(email: &str, role: Role) -> User {
    // ---
    let (id, name) = match role {
        Role::Admin => ("admin1", "Admin User"),
        Role::User => ("user1", "Diyorbek"),
    };

    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        car_plate: Some("01 A 777 AA".to_string()),
        garage: vec!["01 A 777 AA".to_string(), "01 B 888 BB".to_string()],
        balance: STARTING_BALANCE,
        bonus_points: STARTING_BONUS,
        preferences: Preferences {
            dark_mode: true,
            notifications: true,
            language: Language::Uz,
        },
    }
}

/// Builds the active reservation a booking of `spot` produces at `now`.
///
/// `local_hour` selects the time-of-day price band.
pub fn new_reservation(
    spot: &ParkingSpot,
    request: &ReservationRequest,
    now: DateTime<Utc>,
    local_hour: u32,
) -> Reservation {
    // ---
    let total = total_price(
        spot.base_price_per_hour,
        local_hour,
        request.duration,
        car_multiplier(&request.car_type),
    );
    let timestamp = now.timestamp_millis();
    let id = Uuid::new_v4().simple().to_string()[..9].to_uppercase();

    Reservation {
        id,
        parking_id: spot.id.clone(),
        parking_name: spot.name.clone(),
        user_id: request.user_id.clone(),
        start_time: now,
        end_time: now + Duration::hours(i64::from(request.duration)),
        duration_hours: request.duration,
        total_price: total,
        status: ReservationStatus::Active,
        car_type: request.car_type.clone(),
        payment_method: request.payment_method.clone(),
        timestamp,
        qr_code_data: format!("SP-{timestamp}-{}", spot.id),
    }
}
