//! Translation of core errors into HTTP responses.

use apexsearch_core::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// Request-level error; always rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::EmptyCandidateSet => StatusCode::NOT_FOUND,
            Error::ModelLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.0 {
            Error::InvalidInput(msg) => warn!("Rejected request: {}", msg),
            Error::EmptyCandidateSet => warn!("Search over an empty corpus"),
            Error::DimensionMismatch { expected, actual } => error!(
                "Query/corpus embedding dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            other => error!("Request failed: {}", other),
        }

        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::InvalidInput("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::EmptyCandidateSet).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::DimensionMismatch {
                expected: 384,
                actual: 768
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(Error::ModelLoad("gone".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
