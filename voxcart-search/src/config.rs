//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which providers are queried, their credentials,
//! the per-provider timeout and the response cache. A provider without a
//! credential is still queried, but only ever answers from sample data.

use crate::error::SearchError;
use crate::types::ProviderKind;

/// Per-provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Which provider this entry configures.
    pub kind: ProviderKind,
    /// API credential. `None` or empty selects the sample-data path.
    pub api_key: Option<String>,
    /// Override for the provider's endpoint base, e.g. a local mock server.
    /// The provider's path (`/search`) is appended.
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// A provider entry with no credential.
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            base_url: None,
        }
    }

    /// Attach an API credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the provider at a different base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// The credential, if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Configuration for a product search.
///
/// Use [`Default::default()`] for all providers in sample-data mode, or
/// construct with field overrides.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Providers to query, in the order their results are reported.
    pub providers: Vec<ProviderConfig>,
    /// Per-provider request timeout in seconds.
    pub timeout_seconds: u64,
    /// How long to cache live provider responses. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string. Defaults to `voxcart/<version>`.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: ProviderKind::all()
                .iter()
                .copied()
                .map(ProviderConfig::new)
                .collect(),
            timeout_seconds: 8,
            cache_ttl_seconds: 3600,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Set the same credential on every configured provider.
    pub fn with_shared_api_key(mut self, key: &str) -> Self {
        for provider in &mut self.providers {
            provider.api_key = Some(key.to_string());
        }
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - every `base_url` override must be an absolute http(s) URL
    /// - no provider may be listed twice
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        for (i, provider) in self.providers.iter().enumerate() {
            if self.providers[..i].iter().any(|p| p.kind == provider.kind) {
                return Err(SearchError::Config(format!(
                    "provider {} listed more than once",
                    provider.kind
                )));
            }
            if let Some(ref base) = provider.base_url {
                let parsed = url::Url::parse(base).map_err(|e| {
                    SearchError::Config(format!("invalid base_url for {}: {e}", provider.kind))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(SearchError::Config(format!(
                        "base_url for {} must be http or https",
                        provider.kind
                    )));
                }
            }
        }
        Ok(())
    }
}
