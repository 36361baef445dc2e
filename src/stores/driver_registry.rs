use crate::models::driver::{DriverState, DriverStatus};
use dashmap::DashMap;

/// Availability and last known location of every driver account
///
/// An entry exists only for usernames enrolled as drivers, so every
/// availability change is implicitly checked against the driver role.
pub struct DriverRegistry {
    drivers: DashMap<String, DriverStatus>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self {
            drivers: DashMap::new(),
        }
    }

    /// Start tracking a newly registered driver as unavailable
    /// An existing entry is left untouched
    pub fn enroll(&self, driver_name: &str) {
        self.drivers
            .entry(driver_name.to_string())
            .or_insert_with(|| DriverStatus::new(driver_name.to_string()));
    }

    /// Mark a driver available at `location`
    ///
    /// Fails for unknown drivers and for drivers currently assigned to a ride.
    pub fn set_available(&self, driver_name: &str, location: &str) -> bool {
        self.set_state(driver_name, location, DriverState::Available)
    }

    /// Take a driver off the road, keeping `location` as the last known one
    /// Same failure cases as `set_available`
    pub fn set_offline(&self, driver_name: &str, location: &str) -> bool {
        self.set_state(driver_name, location, DriverState::Offline)
    }

    fn set_state(&self, driver_name: &str, location: &str, state: DriverState) -> bool {
        let Some(mut entry) = self.drivers.get_mut(driver_name) else {
            return false;
        };

        if let DriverState::OnRide(_) = entry.state {
            return false;
        }

        entry.state = state;
        entry.location = Some(location.to_string());
        true
    }

    /// Id of the ride the driver is assigned to, if any
    pub fn current_ride(&self, driver_name: &str) -> Option<String> {
        self.drivers
            .get(driver_name)
            .and_then(|entry| match &entry.value().state {
                DriverState::OnRide(ride_id) => Some(ride_id.clone()),
                DriverState::Offline | DriverState::Available => None,
            })
    }

    /// Claim an available driver for `ride_id`
    /// Returns false if the driver was not available at the time of the call
    pub fn mark_busy(&self, driver_name: &str, ride_id: &str) -> bool {
        match self.drivers.get_mut(driver_name) {
            Some(mut entry) if entry.is_available() => {
                entry.state = DriverState::OnRide(ride_id.to_string());
                true
            }
            _ => false,
        }
    }

    /// Release a driver from `ride_id`
    /// A driver already serving another ride is left alone
    pub fn mark_free(&self, driver_name: &str, ride_id: &str) -> bool {
        match self.drivers.get_mut(driver_name) {
            Some(mut entry) if entry.state == DriverState::OnRide(ride_id.to_string()) => {
                entry.state = DriverState::Available;
                true
            }
            _ => false,
        }
    }

    /// Snapshot of available drivers as (driver_name, location), ordered by name
    pub fn list_available(&self) -> Vec<(String, String)> {
        let mut available: Vec<(String, String)> = self
            .drivers
            .iter()
            .filter(|entry| entry.value().is_available())
            .filter_map(|entry| {
                let status = entry.value();
                status
                    .location
                    .as_ref()
                    .map(|location| (status.driver_name.clone(), location.clone()))
            })
            .collect();

        available.sort_by(|a, b| a.0.cmp(&b.0));
        available
    }

    pub fn count_available(&self) -> usize {
        self.drivers
            .iter()
            .filter(|entry| entry.value().is_available())
            .count()
    }

    pub fn get(&self, driver_name: &str) -> Option<DriverStatus> {
        self.drivers.get(driver_name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
