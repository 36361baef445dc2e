use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{AuthenticateRequest, RegisterRequest, SuccessResponse, UserRidesResponse};
use crate::models::user::Role;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use std::sync::Arc;

/// Register a rider or driver
///
/// POST /users/register {"username", "password", "role"}
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let role = Role::parse(&request.role);
    let success = state
        .dispatch
        .register_user(&request.username, &request.password, role);

    state.metrics.record_registration(success);

    Ok(Json(SuccessResponse { success }))
}

/// Check a username/password pair
///
/// POST /users/authenticate {"username", "password"}
pub async fn authenticate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let success = state
        .dispatch
        .authenticate_user(&request.username, &request.password);

    if !success {
        state.metrics.increment_failed_authentications();
    }

    Ok(Json(SuccessResponse { success }))
}

/// Ride history of a rider or driver
///
/// GET /users/{username}/rides
pub async fn rides_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Json<UserRidesResponse> {
    Json(UserRidesResponse {
        rides: state.dispatch.get_user_rides(&username),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::atomic::Ordering;

    fn create_test_state() -> Arc<AppState> {
        let config = Config::from_toml(
            "[server]\nport = 8080\n\n[admin]\napi_key = \"test-api-key\"\n",
        )
        .unwrap();
        Arc::new(AppState::new(config))
    }

    fn register_request(username: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "pass123".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let state = create_test_state();

        let Json(response) = register_handler(State(state.clone()), Ok(Json(register_request("alice", "RIDER"))))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(state.dispatch.accounts().get("alice").unwrap().role, Role::Rider);
        assert_eq!(state.metrics.registrations.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let state = create_test_state();

        register_handler(State(state.clone()), Ok(Json(register_request("alice", "RIDER"))))
            .await
            .unwrap();
        let Json(response) = register_handler(State(state.clone()), Ok(Json(register_request("alice", "DRIVER"))))
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(state.metrics.rejected_registrations.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_register_unknown_role_accepted() {
        let state = create_test_state();

        let Json(response) = register_handler(State(state.clone()), Ok(Json(register_request("x1", "PILOT"))))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(state.dispatch.accounts().get("x1").unwrap().role, Role::Unknown);
        assert!(!state.dispatch.set_driver_available("x1", "Andheri"));
    }

    #[tokio::test]
    async fn test_register_empty_username() {
        let state = create_test_state();

        let result = register_handler(State(state.clone()), Ok(Json(register_request("", "RIDER")))).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.dispatch.accounts().is_empty());
    }

    #[tokio::test]
    async fn test_user_rides() {
        let state = create_test_state();
        state.dispatch.register_user("d1", "pass", Role::Driver);
        state.dispatch.set_driver_available("d1", "X");
        state.dispatch.book_cab("r1", "X", "Y");

        let Json(response) = rides_handler(State(state.clone()), Path("r1".to_string())).await;
        assert_eq!(response.rides.len(), 1);
        assert_eq!(response.rides[0].ride_id, "RIDE_1001");
        assert_eq!(response.rides[0].driver_name.as_deref(), Some("d1"));

        let Json(response) = rides_handler(State(state.clone()), Path("d1".to_string())).await;
        assert_eq!(response.rides.len(), 1);

        let Json(response) = rides_handler(State(state), Path("someone".to_string())).await;
        assert!(response.rides.is_empty());
    }

    #[tokio::test]
    async fn test_register_empty_role_is_unknown() {
        let state = create_test_state();

        let Json(response) = register_handler(State(state.clone()), Ok(Json(register_request("x2", ""))))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(state.dispatch.accounts().get("x2").unwrap().role, Role::Unknown);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let state = create_test_state();
        state.dispatch.register_user("bob", "secret", Role::Driver);

        let Json(response) = authenticate_handler(
            State(state.clone()),
            Ok(Json(AuthenticateRequest {
                username: "bob".to_string(),
                password: "secret".to_string(),
            })),
        )
        .await
        .unwrap();
        assert!(response.success);

        let Json(response) = authenticate_handler(
            State(state.clone()),
            Ok(Json(AuthenticateRequest {
                username: "bob".to_string(),
                password: "wrong".to_string(),
            })),
        )
        .await
        .unwrap();
        assert!(!response.success);
        assert_eq!(state.metrics.failed_authentications.load(Ordering::Relaxed), 1);
    }
}
