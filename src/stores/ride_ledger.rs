use crate::models::ride::{Ride, RideCounts, RideStatus};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Every ride ever booked, keyed by ride id
pub struct RideLedger {
    rides: DashMap<String, Ride>,
}

impl RideLedger {
    pub fn new() -> Self {
        Self {
            rides: DashMap::new(),
        }
    }

    /// Add a freshly booked ride
    /// Ids are never reused, an existing ride is never replaced
    pub fn insert(&self, ride: Ride) -> bool {
        match self.rides.entry(ride.ride_id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(ride);
                true
            }
        }
    }

    pub fn get(&self, ride_id: &str) -> Option<Ride> {
        self.rides.get(ride_id).map(|entry| entry.value().clone())
    }

    /// Overwrite the status of an existing ride
    pub fn set_status(&self, ride_id: &str, status: RideStatus) -> bool {
        self.update(ride_id, |ride| ride.status = status).is_some()
    }

    /// Read-modify-write a single ride while holding its shard lock
    /// Returns None if the ride does not exist
    pub fn update<R>(&self, ride_id: &str, f: impl FnOnce(&mut Ride) -> R) -> Option<R> {
        self.rides
            .get_mut(ride_id)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Rides that are ACCEPTED or IN_PROGRESS
    pub fn count_active(&self) -> usize {
        self.rides
            .iter()
            .filter(|entry| entry.value().status.is_active())
            .count()
    }

    /// Copy of every ride ordered by id sequence
    pub fn snapshot(&self) -> Vec<Ride> {
        let mut rides: Vec<Ride> = self
            .rides
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        rides.sort_by_key(|ride| ride.sequence);
        rides
    }

    /// Rides where `username` is the rider or the assigned driver, ordered by id sequence
    pub fn rides_for(&self, username: &str) -> Vec<Ride> {
        let mut rides: Vec<Ride> = self
            .rides
            .iter()
            .filter(|entry| {
                let ride = entry.value();
                ride.rider_name == username || ride.driver_name.as_deref() == Some(username)
            })
            .map(|entry| entry.value().clone())
            .collect();

        rides.sort_by_key(|ride| ride.sequence);
        rides
    }

    /// Number of rides in each status, counted in one pass
    pub fn status_counts(&self) -> RideCounts {
        let mut counts = RideCounts::default();
        for entry in self.rides.iter() {
            counts.record(entry.value().status);
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }
}

impl Default for RideLedger {
    fn default() -> Self {
        Self::new()
    }
}
