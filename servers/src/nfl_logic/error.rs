use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lib_common::retrieve::FetchError;
use serde_json::json;
use tracing::error;

/// Body sent when the final failure was a rate limit.
pub const RATE_LIMITED_MESSAGE: &str = "Too Many Requests - provider or target rate limited";

/// # Application Error
///
/// Wraps the final pipeline failure and maps it onto the HTTP contract:
/// a 429 from the provider or target passes through as 429, anything else
/// becomes 500 carrying the error message.
#[derive(Debug)]
pub struct AppError(pub FetchError);

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = self.0.to_string();
        error!(status, "GET /nfl failed: {}", message);

        let (http_status, body) = match status {
            Some(429) => (StatusCode::TOO_MANY_REQUESTS, json!({ "error": RATE_LIMITED_MESSAGE })),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message })),
        };
        (http_status, Json(body)).into_response()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
