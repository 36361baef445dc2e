// Application state (AppState)

use crate::core::config::Config;
use crate::dispatch::fare::FareSchedule;
use crate::dispatch::service::DispatchService;
use crate::metrics::collector::Metrics;
use std::sync::Arc;

/// Shared application state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// The dispatch core; the only owner of accounts, drivers and rides
    pub dispatch: Arc<DispatchService>,

    /// Request counters
    pub metrics: Arc<Metrics>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let fares = FareSchedule::new(config.dispatch.base_fare, config.dispatch.per_unit_rate);

        Self {
            dispatch: Arc::new(DispatchService::new(fares)),
            metrics: Arc::new(Metrics::new()),
            config: Arc::new(config),
        }
    }
}
