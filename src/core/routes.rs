// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{drivers, export, fallback, health, metrics, rides, stats, users};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Accounts
        .route("/users/register", post(users::register_handler))
        .route("/users/authenticate", post(users::authenticate_handler))
        .route("/users/{username}/rides", get(users::rides_handler))

        // Rides
        .route("/rides", post(rides::book_handler))
        .route("/rides/export", get(export::ride_log_handler))
        .route("/rides/{ride_id}", get(rides::status_handler))
        .route("/rides/{ride_id}/cancel", post(rides::cancel_handler))

        // Drivers
        .route("/drivers/available", post(drivers::available_handler))
        .route("/cabs", get(drivers::available_cabs_handler))

        // Statistics
        .route("/stats/active-rides", get(stats::active_rides_handler))
        .route("/stats/available-drivers", get(stats::available_drivers_handler))
        .route("/stats/rides", get(stats::ride_stats_handler))

        // Monitoring
        .route("/health", get(health::health_handler))
        .route("/metrics", get(metrics::metrics_handler))

        .fallback(fallback::fallback_handler)

        .with_state(state)
}
