use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    Requested,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "REQUESTED",
            RideStatus::Accepted => "ACCEPTED",
            RideStatus::InProgress => "IN_PROGRESS",
            RideStatus::Completed => "COMPLETED",
            RideStatus::Cancelled => "CANCELLED",
        }
    }

    /// Rides that hold a driver
    pub fn is_active(&self) -> bool {
        match self {
            RideStatus::Accepted | RideStatus::InProgress => true,
            RideStatus::Requested | RideStatus::Completed | RideStatus::Cancelled => false,
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ride totals per status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideCounts {
    pub requested: usize,
    pub accepted: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl RideCounts {
    pub fn record(&mut self, status: RideStatus) {
        match status {
            RideStatus::Requested => self.requested += 1,
            RideStatus::Accepted => self.accepted += 1,
            RideStatus::InProgress => self.in_progress += 1,
            RideStatus::Completed => self.completed += 1,
            RideStatus::Cancelled => self.cancelled += 1,
        }
    }

    pub fn active(&self) -> usize {
        self.accepted + self.in_progress
    }

    pub fn total(&self) -> usize {
        self.requested + self.accepted + self.in_progress + self.completed + self.cancelled
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Ride {
    pub ride_id: String,
    /// Position in the id sequence, used for ordering exports
    #[serde(skip)]
    pub sequence: u64,
    pub rider_name: String,
    pub driver_name: Option<String>,
    pub pickup: String,
    pub destination: String,
    pub status: RideStatus,
    /// Unix timestamp (seconds) of the booking
    pub booking_time: i64,
    pub fare: f64,
}

impl Ride {
    /// A ride that has just been matched with `driver_name`
    #[allow(clippy::too_many_arguments)]
    pub fn accepted(
        ride_id: String,
        sequence: u64,
        rider_name: &str,
        driver_name: String,
        pickup: &str,
        destination: &str,
        fare: f64,
        booking_time: i64,
    ) -> Self {
        Self {
            ride_id,
            sequence,
            rider_name: rider_name.to_string(),
            driver_name: Some(driver_name),
            pickup: pickup.to_string(),
            destination: destination.to_string(),
            status: RideStatus::Accepted,
            booking_time,
            fare,
        }
    }

    /// Human readable status line returned by the status query
    pub fn status_line(&self) -> String {
        format!(
            "Ride {}: {} | Driver: {} | Pickup: {} | Destination: {} | Fare: ₹{:.2}",
            self.ride_id,
            self.status,
            self.driver_name.as_deref().unwrap_or("unassigned"),
            self.pickup,
            self.destination,
            self.fare
        )
    }

    /// One ride log record:
    /// `rideId,riderName,pickup,destination,fare,driverName,timestamp`
    pub fn log_record(&self) -> String {
        format!(
            "{},{},{},{},{:.2},{},{}",
            self.ride_id,
            self.rider_name,
            self.pickup,
            self.destination,
            self.fare,
            self.driver_name.as_deref().unwrap_or(""),
            self.booking_time
        )
    }
}
