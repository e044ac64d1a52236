//! Async transport for the agent search service.

use log::debug;
use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use serde_json::{Map, Value};

use super::headers::build_headers;
use super::response::{classify_response, classify_transport_error};
use super::retry;
use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};

/// Owns one reqwest [`Client`] for its lifetime and performs JSON POSTs with
/// bounded, immediate retries on timeouts and connection failures.
#[derive(Debug)]
pub struct AsyncTransport {
    config: ClientConfig,
    headers: HeaderMap,
    client: Option<Client>,
}

impl AsyncTransport {
    /// Creates a transport with its own connection pool.
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

    /// Creates a transport on top of an existing reqwest [`Client`].
    /// Configured headers and the per-attempt timeout are still applied to
    /// every request; the client's own redirect policy is left as is.
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
    pub async fn post_json(&self, path: &str, payload: &Value) -> SdkResult<Map<String, Value>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SdkError::network("Transport is closed", None))?;
        let full_url = self.config.url_for(path);
        let url = full_url.as_str();
        let operation = format!("POST {}", path);

        retry::run(&operation, self.config.retries, |attempt| {
            async move {
                debug!("POST {} (attempt {})...", url, attempt + 1);
                self.attempt(client, url, payload).await
            }
        })
        .await
    }

    async fn attempt(
        &self,
        client: &Client,
        url: &str,
        payload: &Value,
    ) -> SdkResult<Map<String, Value>> {
        let response = client
            .post(url)
            .headers(self.headers.clone())
            .timeout(self.config.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, url))?;

        classify_response(status, body, url, self.config.api_key.is_some())
    }
}
