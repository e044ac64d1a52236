//! Search clients: a blocking [`AgentSearchClient`] and an async
//! [`AsyncAgentSearchClient`].
//!
//! Both turn typed filters into a [`SearchRequest`], post it through their
//! transport and decode the reply into a [`SearchResponse`]. Errors from the
//! transport are returned unchanged. Dropping a client releases its
//! connection pool; [`close`](AgentSearchClient::close) does the same
//! eagerly.

use async_trait::async_trait;
use log::debug;

use crate::config::{ClientConfig, SEARCH_PATH};
use crate::error::SdkResult;
use crate::http::{AsyncTransport, Transport};
use crate::models::{Capability, IoMode, SearchDepth, SearchRequest, SearchResponse};

/// Optional filters for a search. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Defaults to [`DEFAULT_MAX_RESULT`](crate::models::DEFAULT_MAX_RESULT).
    pub max_result: Option<u32>,
    /// Country name or ISO code of the agent's organization, e.g. "KE".
    pub country: Option<String>,
    pub capability: Option<Capability>,
    pub default_input_mode: Option<Vec<IoMode>>,
    pub default_output_mode: Option<Vec<IoMode>>,
    pub search_depth: Option<SearchDepth>,
    /// Organizations to search instead of running discovery.
    pub allowed_url: Option<Vec<String>>,
}

impl SearchOptions {
    pub fn into_request(self, query: &str) -> SdkResult<SearchRequest> {
        let mut builder = SearchRequest::builder().query(query);
        if let Some(max_result) = self.max_result {
            builder = builder.max_result(max_result);
        }
        if let Some(country) = self.country {
            builder = builder.country(country);
        }
        if let Some(capability) = self.capability {
            builder = builder.capability(capability);
        }
        if let Some(modes) = self.default_input_mode {
            builder = builder.default_input_mode(modes);
        }
        if let Some(modes) = self.default_output_mode {
            builder = builder.default_output_mode(modes);
        }
        if let Some(depth) = self.search_depth {
            builder = builder.search_depth(depth);
        }
        if let Some(urls) = self.allowed_url {
            builder = builder.allowed_url(urls);
        }
        builder.build()
    }
}

/// Anything that can answer a search asynchronously.
#[async_trait]
pub trait AgentSearch: Send + Sync {
    async fn search(&self, query: &str, options: SearchOptions) -> SdkResult<SearchResponse>;
}

/// Blocking search client.
#[derive(Debug)]
pub struct AgentSearchClient {
    transport: Transport,
}

impl AgentSearchClient {
    /// Client for the production service. The API key falls back to the
    /// `PAYELINK_KEY` environment variable when `api_key` is `None`.
    pub fn new(api_key: Option<String>) -> SdkResult<Self> {
        let config =
            ClientConfig::default().with_api_key(ClientConfig::resolve_api_key(api_key));
        Self::from_config(config)
    }

    /// Client using `config` as given, without consulting the environment.
    pub fn from_config(config: ClientConfig) -> SdkResult<Self> {
        Ok(Self::with_transport(Transport::new(config)?))
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Finds the agents best suited to handle `query`.
    #[tracing::instrument(skip(self, options))]
    pub fn search(&self, query: &str, options: SearchOptions) -> SdkResult<SearchResponse> {
        let request = options.into_request(query)?;
        self.search_request(&request)
    }

    /// Sends a prebuilt request.
    pub fn search_request(&self, request: &SearchRequest) -> SdkResult<SearchResponse> {
        let raw = self.transport.post_json(SEARCH_PATH, &request.to_json()?)?;
        let response = SearchResponse::from_payload(&raw)?;
        debug!("Search returned {} agent(s)", response.agents.len());
        Ok(response)
    }

    /// Releases the underlying connection pool. Safe to call more than once.
    pub fn close(&mut self) {
        self.transport.close();
    }
}

/// Async search client.
#[derive(Debug)]
pub struct AsyncAgentSearchClient {
    transport: AsyncTransport,
}

impl AsyncAgentSearchClient {
    /// Client for the production service. The API key falls back to the
    /// `PAYELINK_KEY` environment variable when `api_key` is `None`.
    pub fn new(api_key: Option<String>) -> SdkResult<Self> {
        let config =
            ClientConfig::default().with_api_key(ClientConfig::resolve_api_key(api_key));
        Self::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> SdkResult<Self> {
        Ok(Self::with_transport(AsyncTransport::new(config)?))
    }

    pub fn with_transport(transport: AsyncTransport) -> Self {
        Self { transport }
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Finds the agents best suited to handle `query`.
    #[tracing::instrument(skip(self, options))]
    pub async fn search(&self, query: &str, options: SearchOptions) -> SdkResult<SearchResponse> {
        let request = options.into_request(query)?;
        self.search_request(&request).await
    }

    pub async fn search_request(&self, request: &SearchRequest) -> SdkResult<SearchResponse> {
        let raw = self
            .transport
            .post_json(SEARCH_PATH, &request.to_json()?)
            .await?;
        let response = SearchResponse::from_payload(&raw)?;
        debug!("Search returned {} agent(s)", response.agents.len());
        Ok(response)
    }

    /// Releases the underlying connection pool. Safe to call more than once.
    pub fn close(&mut self) {
        self.transport.close();
    }
}

#[async_trait]
impl AgentSearch for AsyncAgentSearchClient {
    async fn search(&self, query: &str, options: SearchOptions) -> SdkResult<SearchResponse> {
        AsyncAgentSearchClient::search(self, query, options).await
    }
}
