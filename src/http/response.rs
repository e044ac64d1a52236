//! Classification of attempt outcomes into [`SdkError`] kinds.
//!
//! Both transports read the status and the full body text, then hand them to
//! [`classify_response`]; failures before a response is complete go through
//! [`classify_transport_error`].

use serde_json::{Map, Value};

use crate::config::API_KEY_ENV;
use crate::error::{SdkError, SdkResult};

/// Turns a completed response into the decoded top-level JSON object.
pub(crate) fn classify_response(
    status: u16,
    body: String,
    url: &str,
    has_api_key: bool,
) -> SdkResult<Map<String, Value>> {
    if status >= 400 {
        let mut message = format!("HTTP {} calling {}", status, url);
        if status == 401 {
            if has_api_key {
                message.push_str(" (Authentication failed: Invalid API key)");
            } else {
                message.push_str(&format!(
                    " (Authentication failed: API key is missing. Provide it via the api_key parameter or the {} environment variable)",
                    API_KEY_ENV
                ));
            }
        }
        return Err(SdkError::HttpStatus {
            status,
            message,
            body,
        });
    }

    let value: Value = serde_json::from_str(&body)
        .map_err(|e| SdkError::invalid_response(format!("Invalid JSON response: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SdkError::invalid_response("Expected JSON object response")),
    }
}

/// Maps a failed send or body read to a retryable error kind.
pub(crate) fn classify_transport_error(error: reqwest::Error, url: &str) -> SdkError {
    if error.is_timeout() {
        SdkError::timeout(
            format!("Request timed out calling {}", url),
            Some(Box::new(error)),
        )
    } else {
        SdkError::network(
            format!("Network error calling {}: {}", url, error),
            Some(Box::new(error)),
        )
    }
}
