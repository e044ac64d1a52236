//! Blocking transport for the agent search service.
//!
//! Behaves exactly like [`AsyncTransport`](super::AsyncTransport) but blocks
//! the calling thread. It must not be created or dropped inside an async
//! runtime, as with any `reqwest::blocking` client.

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use serde_json::{Map, Value};

use super::headers::build_headers;
use super::response::{classify_response, classify_transport_error};
use super::retry;
use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};

#[derive(Debug)]
pub struct Transport {
    config: ClientConfig,
    headers: HeaderMap,
    client: Option<Client>,
}

impl Transport {
    #[tracing::instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| {
                SdkError::network(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;
        Self::with_client(config, client)
    }

    pub fn with_client(config: ClientConfig, client: Client) -> SdkResult<Self> {
        let headers = build_headers(&config)?;
        Ok(Self {
            config,
            headers,
            client: Some(client),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Releases the connection pool. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("Closed transport for {}", self.config.base_url);
        }
    }

    /// POSTs `payload` to `base_url + path` and returns the decoded JSON object.
    #[tracing::instrument(skip(self, payload))]
    pub fn post_json(&self, path: &str, payload: &Value) -> SdkResult<Map<String, Value>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SdkError::network("Transport is closed", None))?;
        let url = self.config.url_for(path);
        let operation = format!("POST {}", path);

        retry::run_blocking(&operation, self.config.retries, |attempt| {
            debug!("POST {} (attempt {})...", url, attempt + 1);
            self.attempt(client, &url, payload)
        })
    }

    fn attempt(&self, client: &Client, url: &str, payload: &Value) -> SdkResult<Map<String, Value>> {
        let response = client
            .post(url)
            .headers(self.headers.clone())
            .timeout(self.config.timeout)
            .json(payload)
            .send()
            .map_err(|e| classify_transport_error(e, url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| classify_transport_error(e, url))?;

        classify_response(status, body, url, self.config.api_key.is_some())
    }
}
