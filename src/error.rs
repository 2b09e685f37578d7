//! Error types for CloudStore.

use thiserror::Error;

/// Common error type for CloudStore.
#[derive(Error, Debug)]
pub enum CloudStoreError {
    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An upload would push a user past their storage limit.
    #[error("storage limit exceeded: {0}")]
    QuotaExceeded(String),

    /// Stored file content is not a well-formed data URL.
    #[error("malformed content: {0}")]
    MalformedContent(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for CloudStore operations.
pub type Result<T> = std::result::Result<T, CloudStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CloudStoreError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_validation_display() {
        let err = CloudStoreError::Validation("name must not be empty".to_string());
        assert_eq!(err.to_string(), "validation error: name must not be empty");
    }

    #[test]
    fn test_quota_display() {
        let err = CloudStoreError::QuotaExceeded("upload of 1024 bytes".to_string());
        assert_eq!(
            err.to_string(),
            "storage limit exceeded: upload of 1024 bytes"
        );
    }

    #[test]
    fn test_malformed_content_display() {
        let err = CloudStoreError::MalformedContent("missing base64 marker".to_string());
        assert_eq!(err.to_string(), "malformed content: missing base64 marker");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CloudStoreError = io_err.into();
        assert!(matches!(err, CloudStoreError::Io(_)));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(7)
        }

        fn sample_err() -> Result<i32> {
            Err(CloudStoreError::NotFound("user".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 7);
        assert!(sample_err().is_err());
    }
}
