//! Default request headers.

use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};

/// Builds the headers attached to every request: `User-Agent`, an optional
/// bearer `Authorization`, then the configured extra headers, which replace
/// any default of the same name.
pub(crate) fn build_headers(config: &ClientConfig) -> SdkResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);

    if let Some(api_key) = &config.api_key {
        let mut auth_value = header_value("Authorization", &format!("Bearer {}", api_key))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!(
            "Using API key for authentication: {}",
            config.masked_api_key().unwrap_or_default()
        );
    }

    for (name, value) in &config.extra_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SdkError::validation(format!("Invalid header name '{}': {}", name, e)))?;
        headers.insert(header_name, header_value(name, value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> SdkResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SdkError::validation(format!("Invalid value for header '{}': {}", name, e)))
}
