//! API error handling for the CloudStore web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::CloudStoreError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Validation error (400) - carries field-level details.
    ValidationError,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
    /// Field-level validation errors (only present for validation errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    errors: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a validation error with field-level details.
    pub fn validation(errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: "Validation error".to_string(),
            errors: Some(errors),
        }
    }

    /// Create a validation error from validator::ValidationErrors.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: HashMap<String, Vec<String>> = HashMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        Self::validation(details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            message: self.message,
            errors: self.errors,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<CloudStoreError> for ApiError {
    fn from(err: CloudStoreError) -> Self {
        match &err {
            CloudStoreError::NotFound(_) => ApiError::not_found(err.to_string()),
            CloudStoreError::Validation(msg) => ApiError::bad_request(msg.clone()),
            CloudStoreError::QuotaExceeded(msg) => ApiError::bad_request(msg.clone()),
            CloudStoreError::MalformedContent(_) => {
                tracing::error!("Malformed stored content: {}", err);
                ApiError::internal("Invalid file content format")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ValidationError.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        let err = ApiError::bad_request("bad");
        assert_eq!(err.code, ErrorCode::BadRequest);

        let err = ApiError::not_found("missing");
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ApiError::internal("error");
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_validation_error() {
        let mut details = HashMap::new();
        details.insert("name".to_string(), vec!["Folder name is required".to_string()]);

        let err = ApiError::validation(details);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Validation error");

        let details = err.errors.unwrap();
        assert_eq!(
            details.get("name").unwrap(),
            &vec!["Folder name is required".to_string()]
        );
    }

    #[test]
    fn test_from_store_error_not_found() {
        let err = ApiError::from(CloudStoreError::NotFound("file 7".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "file 7 not found");
    }

    #[test]
    fn test_from_store_error_quota() {
        let err = ApiError::from(CloudStoreError::QuotaExceeded(
            "Storage limit exceeded".to_string(),
        ));
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert_eq!(err.message, "Storage limit exceeded");
    }

    #[test]
    fn test_from_store_error_malformed_content() {
        let err = ApiError::from(CloudStoreError::MalformedContent(
            "invalid data URL".to_string(),
        ));
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Invalid file content format");
    }

    #[test]
    fn test_from_store_error_io_is_generic() {
        let err = ApiError::from(CloudStoreError::Io(std::io::Error::other("disk gone")));
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");
    }
}
