use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{AvailableCabsQuery, CabListResponse, DriverAvailableRequest, SuccessResponse};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
};
use std::sync::Arc;

/// Mark a driver available at a location, or offline with `"available": false`
///
/// POST /drivers/available {"driver_name", "location", "available"?}
pub async fn available_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DriverAvailableRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let success = if request.available {
        state
            .dispatch
            .set_driver_available(&request.driver_name, &request.location)
    } else {
        state
            .dispatch
            .set_driver_unavailable(&request.driver_name, &request.location)
    };

    Ok(Json(SuccessResponse { success }))
}

/// Every available driver. The location parameter does not filter.
///
/// GET /cabs?location=<location>
pub async fn available_cabs_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailableCabsQuery>,
) -> Json<CabListResponse> {
    Json(CabListResponse {
        cabs: state.dispatch.get_available_cabs(&params.location),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::models::user::Role;

    fn create_test_state() -> Arc<AppState> {
        let config = Config::from_toml(
            "[server]\nport = 8080\n\n[admin]\napi_key = \"test-api-key\"\n",
        )
        .unwrap();
        Arc::new(AppState::new(config))
    }

    fn available_request(driver_name: &str, location: &str) -> DriverAvailableRequest {
        DriverAvailableRequest {
            driver_name: driver_name.to_string(),
            location: location.to_string(),
            available: true,
        }
    }

    #[tokio::test]
    async fn test_available_registered_driver() {
        let state = create_test_state();
        state.dispatch.register_user("driver1", "pass", Role::Driver);

        let Json(response) = available_handler(State(state.clone()), Ok(Json(available_request("driver1", "Andheri"))))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(state.dispatch.get_available_drivers(), 1);
    }

    #[tokio::test]
    async fn test_driver_goes_offline() {
        let state = create_test_state();
        state.dispatch.register_user("driver1", "pass", Role::Driver);
        state.dispatch.set_driver_available("driver1", "Andheri");

        let mut request = available_request("driver1", "Bandra");
        request.available = false;
        let Json(response) = available_handler(State(state.clone()), Ok(Json(request)))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(state.dispatch.get_available_drivers(), 0);
    }

    #[test]
    fn test_available_defaults_to_true() {
        let request: DriverAvailableRequest =
            serde_json::from_str(r#"{"driver_name": "driver1", "location": "Andheri"}"#).unwrap();
        assert!(request.available);
    }

    #[tokio::test]
    async fn test_available_rider_rejected() {
        let state = create_test_state();
        state.dispatch.register_user("alice", "pass", Role::Rider);

        let Json(response) = available_handler(State(state.clone()), Ok(Json(available_request("alice", "Andheri"))))
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(state.dispatch.get_available_drivers(), 0);
    }

    #[tokio::test]
    async fn test_available_cabs_ignores_location() {
        let state = create_test_state();
        for (name, location) in [("driver1", "Andheri"), ("driver2", "Bandra")] {
            state.dispatch.register_user(name, "pass", Role::Driver);
            state.dispatch.set_driver_available(name, location);
        }

        let Json(response) = available_cabs_handler(
            State(state.clone()),
            Query(AvailableCabsQuery {
                location: "Goregaon".to_string(),
            }),
        )
        .await;

        assert_eq!(
            response.cabs,
            vec!["driver1 (Location: Andheri)", "driver2 (Location: Bandra)"]
        );
    }
}
