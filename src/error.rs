//! Error types for agent search operations.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure a client call can surface.
///
/// Only [`SdkError::Network`] and [`SdkError::Timeout`] are retried by the
/// transport; the other kinds are returned on first occurrence.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection-level I/O failure
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Per-attempt deadline exceeded
    #[error("{message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The service answered with a status of 400 or above
    #[error("{message}")]
    HttpStatus {
        status: u16,
        message: String,
        body: String,
    },

    /// Body is not JSON, not a JSON object, or does not match the response contract
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Request violates the data contract; raised before any network call
    #[error("Validation error: {message}")]
    Validation { message: String },
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;

impl SdkError {
    pub(crate) fn network(message: impl Into<String>, source: Option<BoxError>) -> Self {
        SdkError::Network {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn timeout(message: impl Into<String>, source: Option<BoxError>) -> Self {
        SdkError::Timeout {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        SdkError::InvalidResponse {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        SdkError::Validation {
            message: message.into(),
        }
    }

    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SdkError::Network { .. } | SdkError::Timeout { .. })
    }

    /// HTTP status carried by [`SdkError::HttpStatus`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response text carried by [`SdkError::HttpStatus`].
    pub fn body(&self) -> Option<&str> {
        match self {
            SdkError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_only_transient_errors_are_retryable() {
        assert!(SdkError::network("down", None).is_retryable());
        assert!(SdkError::timeout("slow", None).is_retryable());
        assert!(!SdkError::invalid_response("bad").is_retryable());
        assert!(!SdkError::validation("bad").is_retryable());
        assert!(
            !SdkError::HttpStatus {
                status: 503,
                message: "HTTP 503".into(),
                body: String::new(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_status_code_and_body() {
        let err = SdkError::HttpStatus {
            status: 404,
            message: "HTTP 404 calling /x".into(),
            body: "Not Found".into(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.body(), Some("Not Found"));
        assert_eq!(err.to_string(), "HTTP 404 calling /x");

        assert_eq!(SdkError::validation("x").status_code(), None);
        assert_eq!(SdkError::validation("x").body(), None);
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = SdkError::network("Network error", Some(Box::new(io)));
        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            SdkError::invalid_response("Expected JSON object response").to_string(),
            "Invalid response: Expected JSON object response"
        );
        assert_eq!(
            SdkError::validation("query must not be empty").to_string(),
            "Validation error: query must not be empty"
        );
    }
}
