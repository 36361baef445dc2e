use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::dispatch::service::BookingOutcome;
use crate::models::api::{BookRideRequest, ResultResponse, SuccessResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Book a cab. The result is either a ride id or `NO_DRIVER_AVAILABLE`.
///
/// POST /rides {"username", "pickup", "destination"}
#[instrument(skip(state, payload))]
pub async fn book_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRideRequest>, JsonRejection>,
) -> Result<Json<ResultResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let outcome = state
        .dispatch
        .book_cab(&request.username, &request.pickup, &request.destination);

    state
        .metrics
        .record_booking(matches!(outcome, BookingOutcome::Booked(_)));

    Ok(Json(ResultResponse {
        result: outcome.to_string(),
    }))
}

/// POST /rides/{ride_id}/cancel
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
) -> Json<SuccessResponse> {
    let success = state.dispatch.cancel_ride(&ride_id);
    state.metrics.record_cancellation(success);

    Json(SuccessResponse { success })
}

/// Status line for a ride, or `RIDE_NOT_FOUND`
///
/// GET /rides/{ride_id}
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
) -> Json<ResultResponse> {
    Json(ResultResponse {
        result: state.dispatch.get_ride_status(&ride_id),
    })
}
