//! Error types for the FabLab client.

use thiserror::Error;

/// Result type alias using the FabLab client's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FabLab client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Source not found in the current session
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Backend returned a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Summarization contract violated or summary pipeline failed
    #[error("Summary error: {0}")]
    Summary(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Forbidden (resource exists but is not publicly readable)
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("session 42".to_string());
        assert_eq!(err.to_string(), "Not found: session 42");
    }

    #[test]
    fn test_error_display_source_not_found() {
        let err = Error::SourceNotFound("src-7".to_string());
        assert_eq!(err.to_string(), "Source not found: src-7");
    }

    #[test]
    fn test_error_display_backend() {
        let err = Error::Backend {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (500): boom");
    }

    #[test]
    fn test_error_display_forbidden() {
        let err = Error::Forbidden("tool is private".to_string());
        assert_eq!(err.to_string(), "Forbidden: tool is private");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(7)
        }
        assert_eq!(get_result().unwrap(), 7);
    }
}
