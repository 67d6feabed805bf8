//! Hourly pricing rule.
//!
//! The occupancy band is part of the rule but every booking path passes an
//! occupancy of zero, so in practice only the late-night discount applies.

/// Late-night band starts at this hour (inclusive).
const NIGHT_START_HOUR: u32 = 23;

/// Late-night band ends at this hour (exclusive).
const NIGHT_END_HOUR: u32 = 6;

/// Computes the adjusted hourly rate for `base` at `hour` (0..=23).
pub fn calculate_price(base: i64, occupancy_rate: f64, hour: u32) -> i64 {
    // ---
    let mut multiplier = 1.0_f64;

    if occupancy_rate > 0.8 {
        multiplier += 0.2;
    } else if occupancy_rate > 0.5 {
        multiplier += 0.1;
    }

    if is_late_night(hour) {
        multiplier -= 0.2;
    }

    (base as f64 * multiplier).round() as i64
}

/// Total price of a booking, rounded to the nearest currency unit.
pub fn total_price(base: i64, hour: u32, duration_hours: u32, car_multiplier: f64) -> i64 {
    // ---
    let rate = calculate_price(base, 0.0, hour);
    (rate as f64 * duration_hours as f64 * car_multiplier).round() as i64
}

pub fn is_late_night(hour: u32) -> bool {
    // ---
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}
