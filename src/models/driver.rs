/// What a registered driver is doing right now
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Registered but never made available, or toggled off
    Offline,
    Available,
    /// Assigned to the ride with this id
    OnRide(String),
}

/// Availability record for a single driver
#[derive(Clone, Debug)]
pub struct DriverStatus {
    pub driver_name: String,
    /// Last reported location, absent until the driver first becomes available
    pub location: Option<String>,
    pub state: DriverState,
}

impl DriverStatus {
    pub fn new(driver_name: String) -> Self {
        Self {
            driver_name,
            location: None,
            state: DriverState::Offline,
        }
    }

    pub fn is_available(&self) -> bool {
        self.state == DriverState::Available
    }
}
