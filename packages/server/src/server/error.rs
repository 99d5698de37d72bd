//! HTTP error mapping for the API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::jobs::TrackerError;

/// API-level error. Every variant renders as `{"success": false, "error": …}`
/// with the matching status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Validation(_) | TrackerError::NotReady(_) => {
                Self::bad_request(err.to_string())
            }
            TrackerError::NotFound(_) => Self::not_found(err.to_string()),
            TrackerError::Store(e) => {
                error!(error = %e, "Job store failure");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(TrackerError::Validation("location is required".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "location is required");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(TrackerError::NotFound(Uuid::new_v4()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_errors_hide_details() {
        let err = ApiError::from(TrackerError::Store(anyhow::anyhow!("lock poisoned")));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "internal server error");
    }
}
