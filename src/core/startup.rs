use tracing::{info, warn};

use crate::core::config::SeedConfig;
use crate::dispatch::service::DispatchService;
use crate::models::user::Role;

/// How many seed accounts made it in
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub drivers: usize,
    pub riders: usize,
    pub available_drivers: usize,
}

// this runs at boot time, before any listener accepts a request
pub fn seed_accounts(dispatch: &DispatchService, seed: &SeedConfig) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for driver in &seed.drivers {
        if !dispatch.register_user(&driver.username, &driver.password, Role::Driver) {
            warn!(username = %driver.username, "Seed driver already registered, skipping");
            continue;
        }
        summary.drivers += 1;

        if let Some(location) = &driver.location {
            if dispatch.set_driver_available(&driver.username, location) {
                summary.available_drivers += 1;
            }
        }
    }

    for rider in &seed.riders {
        if !dispatch.register_user(&rider.username, &rider.password, Role::Rider) {
            warn!(username = %rider.username, "Seed rider already registered, skipping");
            continue;
        }
        summary.riders += 1;
    }

    info!(
        drivers = summary.drivers,
        riders = summary.riders,
        available_drivers = summary.available_drivers,
        "Seed accounts registered"
    );

    summary
}
