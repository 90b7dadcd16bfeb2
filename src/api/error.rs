use crate::utils::error::{ErrorCategory, RegistryError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            attempted: None,
            limit: None,
        }
    }
}

pub fn status_for(error: &RegistryError) -> StatusCode {
    match error.category() {
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::Storage | ErrorCategory::Configuration => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if self.is_client_error() {
            tracing::debug!("Rejected request: {}", self);
        } else {
            tracing::error!("❌ Request failed: {}", self);
        }

        let body = match &self {
            RegistryError::CapacityExceeded(exceeded) => ErrorResponse {
                error: self.to_string(),
                attempted: Some(exceeded.attempted),
                limit: Some(exceeded.limit),
            },
            _ => ErrorResponse::new(&self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CapacityExceeded;

    #[test]
    fn test_status_codes_per_error_family() {
        assert_eq!(
            status_for(&RegistryError::course_not_found(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&RegistryError::invalid_input("name", "empty")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&CapacityExceeded { attempted: 5, limit: 4 }.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&RegistryError::StorageError {
                message: "down".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_capacity_body_carries_counts() {
        let response = RegistryError::from(CapacityExceeded {
            attempted: 21,
            limit: 20,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["attempted"], 21);
        assert_eq!(body["limit"], 20);
        assert_eq!(body["error"], "Course would have 21 students, the limit is 20");
    }

    #[tokio::test]
    async fn test_not_found_body_is_json() {
        let response = RegistryError::course_not_found("abc").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Course abc not found" }));
    }
}
