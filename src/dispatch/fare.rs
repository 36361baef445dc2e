//! Placeholder fare model.
//!
//! There is no real distance computation: the trip length is a pseudo-distance
//! derived from the pickup and destination names, so the same pair of places
//! always costs the same.

/// Base fare charged for every ride.
pub const BASE_FARE: f64 = 50.0;

/// Price per pseudo-distance unit.
pub const PER_UNIT_RATE: f64 = 10.0;

/// Pseudo-distances fall in `1..=MAX_DISTANCE_UNITS`.
pub const MAX_DISTANCE_UNITS: u32 = 20;

/// Fare calculator with configurable rates.
#[derive(Clone, Copy, Debug)]
pub struct FareSchedule {
    pub base_fare: f64,
    pub per_unit_rate: f64,
}

impl FareSchedule {
    pub fn new(base_fare: f64, per_unit_rate: f64) -> Self {
        Self {
            base_fare,
            per_unit_rate,
        }
    }

    /// `fare = base_fare + distance_units * per_unit_rate`
    pub fn fare_for(&self, pickup: &str, destination: &str) -> f64 {
        self.base_fare + f64::from(distance_units(pickup, destination)) * self.per_unit_rate
    }
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self::new(BASE_FARE, PER_UNIT_RATE)
    }
}

/// Deterministic pseudo-distance between two place names, in `1..=20`
pub fn distance_units(pickup: &str, destination: &str) -> u32 {
    let delta = place_hash(pickup).wrapping_sub(place_hash(destination));
    delta.unsigned_abs() % MAX_DISTANCE_UNITS + 1
}

/// 31-multiplier polynomial hash over UTF-16 code units with 32-bit wrap-around.
/// Matches the hashes the ride log history was produced with.
fn place_hash(place: &str) -> i32 {
    place
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_hash_known_values() {
        assert_eq!(place_hash(""), 0);
        assert_eq!(place_hash("X"), 88);
        assert_eq!(place_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_distance_units_range() {
        let places = ["Andheri", "Bandra", "Goregaon", "Airport", "", "Tech Park", "Dadar West"];
        for pickup in places {
            for destination in places {
                let units = distance_units(pickup, destination);
                assert!((1..=MAX_DISTANCE_UNITS).contains(&units), "{} -> {}: {}", pickup, destination, units);
            }
        }
    }

    #[test]
    fn test_same_place_is_one_unit() {
        assert_eq!(distance_units("Andheri", "Andheri"), 1);
    }

    #[test]
    fn test_fare_exact_value() {
        // |88 - 89| % 20 + 1 = 2 units
        let schedule = FareSchedule::default();
        assert_eq!(schedule.fare_for("X", "Y"), 70.0);
        assert_eq!(schedule.fare_for("A", "B"), 70.0);
    }

    #[test]
    fn test_fare_is_deterministic() {
        let schedule = FareSchedule::default();
        let first = schedule.fare_for("Andheri", "Bandra");
        let second = schedule.fare_for("Andheri", "Bandra");
        assert_eq!(first, second);
        assert!(first >= BASE_FARE + PER_UNIT_RATE);
        assert!(first <= BASE_FARE + PER_UNIT_RATE * MAX_DISTANCE_UNITS as f64);
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = FareSchedule::new(20.0, 5.0);
        assert_eq!(schedule.fare_for("X", "Y"), 30.0);
    }
}
