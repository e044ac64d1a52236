//! Client configuration.
//!
//! A [`ClientConfig`] is plain data: it is built once, handed to a transport,
//! and never mutated afterwards.

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

/// Production endpoint of the agent search service.
pub const DEFAULT_BASE_URL: &str = "https://api.payelink.com";

/// Per-attempt timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Additional attempts made after the first one fails with a transient error.
pub const DEFAULT_RETRIES: u32 = 2;

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV: &str = "PAYELINK_KEY";

/// Path of the search endpoint, relative to the base URL.
pub const SEARCH_PATH: &str = "/v1/agents/search";

/// User agent sent with every request unless overridden.
pub fn default_user_agent() -> String {
    format!("payelink-agent-search/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Count of additional attempts beyond the first.
    pub retries: u32,
    pub api_key: Option<String>,
    /// Merged over the default headers; entries here win.
    pub extra_headers: BTreeMap<String, String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            api_key: None,
            extra_headers: BTreeMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url` with all other values defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    /// Header names are case-insensitive; a later call replaces an earlier
    /// one whatever its casing.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL for an endpoint path such as [`SEARCH_PATH`].
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Picks the explicit key when given, otherwise falls back to [`API_KEY_ENV`].
    /// Empty values count as absent in both places.
    pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
        Self::resolve_api_key_with(explicit, |key| env::var(key).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with the
    /// environment read through `lookup`.
    pub fn resolve_api_key_with<F>(explicit: Option<String>, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        explicit
            .filter(|key| !key.is_empty())
            .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.is_empty()))
    }

    /// API key with everything but the edges hidden, for log output.
    pub(crate) fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_secret)
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().skip(chars.len() - 2).collect();
    format!("{}*********{}", head, tail)
}
