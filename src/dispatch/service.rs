use crate::dispatch::fare::FareSchedule;
use crate::dispatch::ride_id::RideIdGenerator;
use crate::models::ride::{Ride, RideCounts, RideStatus};
use crate::models::user::{Role, User};
use crate::stores::{account_store::AccountStore, driver_registry::DriverRegistry, ride_ledger::RideLedger};
use crate::utils::time::current_timestamp;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Returned by a booking when every driver is busy or offline
pub const NO_DRIVER_AVAILABLE: &str = "NO_DRIVER_AVAILABLE";

/// Returned by a status query for an unknown ride id
pub const RIDE_NOT_FOUND: &str = "RIDE_NOT_FOUND";

/// Result of a booking request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked(String),
    NoDriverAvailable,
}

impl fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingOutcome::Booked(ride_id) => f.write_str(ride_id),
            BookingOutcome::NoDriverAvailable => f.write_str(NO_DRIVER_AVAILABLE),
        }
    }
}

/// The dispatch core: accounts, driver availability and the ride ledger
///
/// Constructed once at start-up and shared behind an `Arc`. Every operation is a
/// short critical section over one key of one store; no lock on one store is held
/// while another store is touched.
pub struct DispatchService {
    accounts: AccountStore,
    drivers: DriverRegistry,
    rides: RideLedger,
    ride_ids: RideIdGenerator,
    fares: FareSchedule,
}

impl DispatchService {
    pub fn new(fares: FareSchedule) -> Self {
        Self {
            accounts: AccountStore::new(),
            drivers: DriverRegistry::new(),
            rides: RideLedger::new(),
            ride_ids: RideIdGenerator::new(),
            fares,
        }
    }

    /// Register a rider or driver. Drivers start out unavailable.
    pub fn register_user(&self, username: &str, password: &str, role: Role) -> bool {
        let user = User::new(username.to_string(), password.to_string(), role);

        if !self.accounts.register(user) {
            warn!(username = %username, "Registration rejected: username already taken");
            return false;
        }

        if role == Role::Driver {
            self.drivers.enroll(username);
        }

        info!(username = %username, role = %role, "User registered");
        true
    }

    pub fn authenticate_user(&self, username: &str, password: &str) -> bool {
        let authenticated = self.accounts.authenticate(username, password);

        if authenticated {
            info!(username = %username, "User authenticated");
        } else {
            warn!(username = %username, "Authentication failed");
        }

        authenticated
    }

    /// Match the rider with the first available driver and record the ride
    ///
    /// Pickup and destination only feed the fare; matching ignores them.
    pub fn book_cab(&self, username: &str, pickup: &str, destination: &str) -> BookingOutcome {
        let mut reserved_id: Option<(String, u64)> = None;

        for (driver_name, driver_location) in self.drivers.list_available() {
            let (ride_id, sequence) = reserved_id
                .get_or_insert_with(|| self.ride_ids.next_id())
                .clone();

            // Lost the race for this driver, try the next one
            if !self.drivers.mark_busy(&driver_name, &ride_id) {
                debug!(driver = %driver_name, "Driver claimed by a concurrent booking");
                continue;
            }

            let fare = self.fares.fare_for(pickup, destination);
            let ride = Ride::accepted(
                ride_id.clone(),
                sequence,
                username,
                driver_name.clone(),
                pickup,
                destination,
                fare,
                current_timestamp(),
            );
            if !self.rides.insert(ride) {
                error!(ride_id = %ride_id, driver = %driver_name, "Ride id already in the ledger, releasing driver");
                self.drivers.mark_free(&driver_name, &ride_id);
                return BookingOutcome::NoDriverAvailable;
            }

            info!(
                ride_id = %ride_id,
                rider = %username,
                driver = %driver_name,
                driver_location = %driver_location,
                pickup = %pickup,
                destination = %destination,
                fare = fare,
                "Ride booked"
            );

            return BookingOutcome::Booked(ride_id);
        }

        warn!(rider = %username, pickup = %pickup, "No driver available");
        BookingOutcome::NoDriverAvailable
    }

    /// Cancel any ride that is not COMPLETED, releasing its driver
    ///
    /// Cancelling an already cancelled ride succeeds again. The driver is only
    /// released if they are still assigned to this ride.
    pub fn cancel_ride(&self, ride_id: &str) -> bool {
        let outcome = self.rides.update(ride_id, |ride| {
            if ride.status == RideStatus::Completed {
                return None;
            }
            let previous = ride.status;
            ride.status = RideStatus::Cancelled;
            Some((previous, ride.driver_name.clone()))
        });

        let (previous, driver_name) = match outcome {
            None => {
                warn!(ride_id = %ride_id, "Cancellation rejected: ride not found");
                return false;
            }
            Some(None) => {
                warn!(ride_id = %ride_id, "Cancellation rejected: ride already completed");
                return false;
            }
            Some(Some(cancelled)) => cancelled,
        };

        let driver_released = driver_name
            .as_deref()
            .map(|driver| self.drivers.mark_free(driver, ride_id))
            .unwrap_or(false);

        info!(
            ride_id = %ride_id,
            previous_status = %previous,
            driver = ?driver_name,
            driver_released = driver_released,
            "Ride cancelled"
        );

        true
    }

    pub fn ride(&self, ride_id: &str) -> Option<Ride> {
        self.rides.get(ride_id)
    }

    /// Status line for a ride, or `RIDE_NOT_FOUND`
    pub fn get_ride_status(&self, ride_id: &str) -> String {
        match self.rides.get(ride_id) {
            Some(ride) => ride.status_line(),
            None => {
                debug!(ride_id = %ride_id, "Status requested for unknown ride");
                RIDE_NOT_FOUND.to_string()
            }
        }
    }

    /// Make a registered driver available at `location`
    pub fn set_driver_available(&self, driver_name: &str, location: &str) -> bool {
        self.release_finished_ride(driver_name);
        let updated = self.drivers.set_available(driver_name, location);

        if updated {
            info!(driver = %driver_name, location = %location, "Driver available");
        } else {
            warn!(
                driver = %driver_name,
                location = %location,
                "Availability rejected: not a driver or currently on a ride"
            );
        }

        updated
    }

    /// Take a registered driver off the road at `location`
    pub fn set_driver_unavailable(&self, driver_name: &str, location: &str) -> bool {
        self.release_finished_ride(driver_name);
        let updated = self.drivers.set_offline(driver_name, location);

        if updated {
            info!(driver = %driver_name, location = %location, "Driver offline");
        } else {
            warn!(
                driver = %driver_name,
                location = %location,
                "Going offline rejected: not a driver or currently on a ride"
            );
        }

        updated
    }

    /// Free a driver still holding a ride that is no longer active
    ///
    /// A ride not yet in the ledger is being booked right now and keeps its driver.
    fn release_finished_ride(&self, driver_name: &str) {
        let Some(ride_id) = self.drivers.current_ride(driver_name) else {
            return;
        };

        let engaged = self
            .rides
            .get(&ride_id)
            .map(|ride| ride.status.is_active())
            .unwrap_or(true);

        if !engaged && self.drivers.mark_free(driver_name, &ride_id) {
            debug!(driver = %driver_name, ride_id = %ride_id, "Released driver from finished ride");
        }
    }

    /// Every available driver, formatted as `name (Location: loc)`
    ///
    /// The caller's location is accepted but not used for filtering.
    pub fn get_available_cabs(&self, location: &str) -> Vec<String> {
        debug!(location = %location, "Listing available cabs");

        self.drivers
            .list_available()
            .into_iter()
            .map(|(driver_name, driver_location)| format!("{} (Location: {})", driver_name, driver_location))
            .collect()
    }

    /// Rides where `username` is the rider or the driver, oldest first
    pub fn get_user_rides(&self, username: &str) -> Vec<Ride> {
        let rides = self.rides.rides_for(username);
        debug!(username = %username, rides = rides.len(), "Listing user rides");
        rides
    }

    pub fn get_ride_counts(&self) -> RideCounts {
        self.rides.status_counts()
    }

    pub fn get_active_rides(&self) -> usize {
        self.rides.count_active()
    }

    pub fn get_available_drivers(&self) -> usize {
        self.drivers.count_available()
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn rides(&self) -> &RideLedger {
        &self.rides
    }
}

impl Default for DispatchService {
    fn default() -> Self {
        Self::new(FareSchedule::default())
    }
}
