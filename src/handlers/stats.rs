use crate::core::state::AppState;
use crate::models::api::{CountResponse, RideStatsResponse};
use axum::{extract::State, response::Json};
use std::sync::Arc;

/// GET /stats/active-rides
pub async fn active_rides_handler(State(state): State<Arc<AppState>>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.dispatch.get_active_rides(),
    })
}

/// GET /stats/available-drivers
pub async fn available_drivers_handler(State(state): State<Arc<AppState>>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.dispatch.get_available_drivers(),
    })
}

/// Ride totals by status
///
/// GET /stats/rides
pub async fn ride_stats_handler(State(state): State<Arc<AppState>>) -> Json<RideStatsResponse> {
    let counts = state.dispatch.get_ride_counts();

    Json(RideStatsResponse {
        total: counts.total(),
        active: counts.active(),
        completed: counts.completed,
        cancelled: counts.cancelled,
    })
}
