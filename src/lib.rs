//! Client for the Payelink agent search service.
//!
//! The service ranks registered agents against a natural-language query and
//! returns the best matches together with the URLs of their agent cards.
//! Use [`AgentSearchClient`] from synchronous code and
//! [`AsyncAgentSearchClient`] from async code; both retry timeouts and
//! connection failures and report everything else through [`SdkError`].
//!
//! ```no_run
//! use payelink_agent_search::{AsyncAgentSearchClient, SearchOptions};
//!
//! # async fn example() -> Result<(), payelink_agent_search::SdkError> {
//! let client = AsyncAgentSearchClient::new(None)?;
//! let response = client
//!     .search(
//!         "Convert USD to KES",
//!         SearchOptions {
//!             country: Some("KE".into()),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! for agent in &response.agents {
//!     println!("{:?} {:?}", agent.agent_name, agent.agent_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;

pub use client::{AgentSearch, AgentSearchClient, AsyncAgentSearchClient, SearchOptions};
pub use config::{API_KEY_ENV, ClientConfig};
pub use error::{SdkError, SdkResult};
pub use http::{AsyncTransport, Transport};
pub use models::{
    AgentDetails, Capability, IoMode, SearchDepth, SearchRequest, SearchRequestBuilder,
    SearchResponse,
};
