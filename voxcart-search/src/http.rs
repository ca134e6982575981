//! Shared HTTP client for provider requests.
//!
//! One client is built per aggregator and cloned into each adapter, so
//! connections are pooled across providers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Default User-Agent sent with provider requests.
pub const DEFAULT_USER_AGENT: &str = concat!("voxcart/", env!("CARGO_PKG_VERSION"));

/// Client used by every built-in adapter.
///
/// Requests time out after `config.timeout_seconds`, ask for JSON, and
/// follow at most five redirects. Compressed bodies are decoded
/// transparently.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("cannot build HTTP client: {e}")))
}
