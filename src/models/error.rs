use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use tracing::warn;

/// Uniform error for every handler: each kind keeps its own status so a
/// transport failure is distinguishable from a bad request or missing data.
#[derive(Debug)]
pub enum ApiError {
    /// The external archive failed or answered with an unusable payload.
    Upstream(String),
    /// The request was well-formed but nothing matches it.
    NotFound(String),
    /// Malformed or out-of-range request parameters.
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Upstream(msg) | ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("{:?}", self);
        (self.status(), Json(json!({"error": self.message()}))).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Upstream(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Upstream(format!("malformed upstream response: {error}"))
    }
}
