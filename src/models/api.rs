use crate::models::ride::Ride;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ApiKeyQuery {
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Kept as text so an unrecognized role still registers
    pub role: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookRideRequest {
    pub username: String,
    pub pickup: String,
    pub destination: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DriverAvailableRequest {
    pub driver_name: String,
    pub location: String,
    /// false takes the driver off the road
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct AvailableCabsQuery {
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Textual result of an operation, possibly a sentinel
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CabListResponse {
    pub cabs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UserRidesResponse {
    pub rides: Vec<Ride>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideStatsResponse {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
