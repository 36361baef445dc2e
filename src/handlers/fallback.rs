use crate::core::error::ApiError;
use axum::http::Uri;

pub async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
