use crate::core::error::ValidationError;
use crate::models::api::{AuthenticateRequest, BookRideRequest, DriverAvailableRequest, RegisterRequest};

/// Longest value accepted for any text field
pub const MAX_FIELD_LEN: usize = 128;

/// Check a single text field
///
/// Fields end up in the comma-separated ride log, so separators and line breaks
/// are rejected along with empty and overlong values.
pub fn validate_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingParameter(field.to_string()));
    }

    let len = value.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
            actual: len,
        });
    }

    if value.contains([',', '\n', '\r']) {
        return Err(ValidationError::InvalidCharacter(field.to_string()));
    }

    Ok(())
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_field("username", &self.username)?;
        validate_field("password", &self.password)
    }
}

impl AuthenticateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_field("username", &self.username)?;
        validate_field("password", &self.password)
    }
}

impl BookRideRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_field("username", &self.username)?;
        validate_field("pickup", &self.pickup)?;
        validate_field("destination", &self.destination)
    }
}

impl DriverAvailableRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_field("driver_name", &self.driver_name)?;
        validate_field("location", &self.location)
    }
}
