// Metrics endpoint

use crate::core::error::MonitoringError;
use crate::core::state::AppState;
use crate::models::api::ApiKeyQuery;
use crate::utils::auth::admin_key_matches;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Booking, cancellation and account counters alongside the live
/// driver and ride counts. Requires the admin API key.
///
/// GET /metrics?api_key=<key>
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ApiKeyQuery>,
) -> Result<Response, MonitoringError> {
    if !admin_key_matches(&params.api_key, &state.config.admin.api_key) {
        warn!("Unauthorized metrics access attempt");
        return Err(MonitoringError::InvalidApiKey);
    }

    let snapshot = state.metrics.get_snapshot(&state.dispatch);

    Ok((StatusCode::OK, Json(snapshot)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::metrics::collector::MetricsSnapshot;
    use crate::models::user::Role;
    use axum::body::Body;
    use http_body_util::BodyExt;

    fn create_test_state() -> Arc<AppState> {
        let config = Config::from_toml(
            "[server]\nport = 8080\n\n[admin]\napi_key = \"test-api-key\"\n",
        )
        .unwrap();
        Arc::new(AppState::new(config))
    }

    async fn read_snapshot(response: Response) -> MetricsSnapshot {
        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_handler_success() {
        let state = create_test_state();

        let params = ApiKeyQuery {
            api_key: "test-api-key".to_string(),
        };

        let response = metrics_handler(State(state), Query(params)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let snapshot = read_snapshot(response).await;
        assert_eq!(snapshot.booking_requests, 0);
        assert_eq!(snapshot.active_rides, 0);
        assert!(snapshot.uptime_seconds >= 0);
    }

    #[tokio::test]
    async fn test_metrics_handler_invalid_api_key() {
        let state = create_test_state();

        let params = ApiKeyQuery {
            api_key: "wrong-key".to_string(),
        };

        let result = metrics_handler(State(state), Query(params)).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_metrics_handler_with_data() {
        let state = create_test_state();
        state.dispatch.register_user("d1", "pass", Role::Driver);
        state.dispatch.set_driver_available("d1", "Andheri");
        state.dispatch.book_cab("r1", "Andheri", "Bandra");
        state.metrics.record_booking(true);

        let params = ApiKeyQuery {
            api_key: "test-api-key".to_string(),
        };

        let response = metrics_handler(State(state), Query(params)).await.unwrap();
        let snapshot = read_snapshot(response).await;

        assert_eq!(snapshot.booking_requests, 1);
        assert_eq!(snapshot.rides_booked, 1);
        assert_eq!(snapshot.registered_drivers, 1);
        assert_eq!(snapshot.available_drivers, 0);
        assert_eq!(snapshot.active_rides, 1);
    }
}
