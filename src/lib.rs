pub mod core {
    pub mod config;
    pub mod error;
    pub mod routes;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod dispatch {
    pub mod fare;
    pub mod ride_id;
    pub mod service;
}

pub mod export {
    pub mod ride_log;
}

pub mod handlers {
    pub mod drivers;
    pub mod export;
    pub mod fallback;
    pub mod health;
    pub mod metrics;
    pub mod rides;
    pub mod stats;
    pub mod users;
}

pub mod metrics {
    pub mod collector;
}

pub mod models {
    pub mod api;
    pub mod driver;
    pub mod ride;
    pub mod user;
}

pub mod stores {
    pub mod account_store;
    pub mod driver_registry;
    pub mod ride_ledger;
}

pub mod utils {
    pub mod auth;
    pub mod time;
}

pub mod validation {
    pub mod params;
}
