use crate::core::error::MonitoringError;
use crate::core::state::AppState;
use crate::export::ride_log::render_ride_log;
use crate::models::api::ApiKeyQuery;
use crate::utils::auth::admin_key_matches;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Ride log as CSV, one ride per line in booking order
///
/// GET /rides/export?api_key=<key>
pub async fn ride_log_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ApiKeyQuery>,
) -> Result<Response, MonitoringError> {
    if !admin_key_matches(&params.api_key, &state.config.admin.api_key) {
        warn!("Unauthorized ride log export attempt");
        return Err(MonitoringError::InvalidApiKey);
    }

    let rides = state.dispatch.rides().snapshot();
    info!(rides = rides.len(), "Exporting ride log");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        render_ride_log(&rides),
    )
        .into_response())
}
