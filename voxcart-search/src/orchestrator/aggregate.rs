//! Core aggregator: concurrent multi-provider fan-out with fault isolation.
//!
//! Every registered provider is queried concurrently and the aggregator
//! waits for all of them to settle. Results are reported in registration
//! order regardless of completion order. Each call is isolated: a timeout
//! or panic in one provider substitutes that provider's sample data and
//! never disturbs its siblings.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::adapter::HttpProvider;
use crate::cache::ResponseCache;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::intent;
use crate::provider::ProductProvider;
use crate::providers::{self, MOCK_DATA_SOURCE, MOCK_FALLBACK_SOURCE};
use crate::types::{FilterSet, ProviderKind, SearchIntent, SearchResult};

/// Fans a search out to every registered provider.
pub struct Aggregator {
    providers: Vec<Arc<dyn ProductProvider>>,
    timeout: Duration,
}

impl Aggregator {
    /// Build an aggregator over the built-in providers listed in `config`,
    /// sharing one HTTP client and one response cache between them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(config)?;
        let cache = ResponseCache::new(config.cache_ttl_seconds);

        let providers = config
            .providers
            .iter()
            .map(|p| {
                let adapter = HttpProvider::new(
                    providers::spec_for(p.kind),
                    p.clone(),
                    client.clone(),
                    cache.clone(),
                );
                Arc::new(adapter) as Arc<dyn ProductProvider>
            })
            .collect();

        Ok(Self {
            providers,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Build an aggregator over arbitrary providers. `timeout` bounds each
    /// provider call independently.
    pub fn with_providers(providers: Vec<Arc<dyn ProductProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// Registered providers, in registration order.
    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Extract intent from `raw_text` and search every provider.
    ///
    /// Never fails. Returns one result per registered provider in
    /// registration order, a single `"Mock Data"` result when no provider
    /// is registered, or a single `"Mock Data (Fallback)"` result if the
    /// orchestration itself panics.
    pub async fn search(&self, raw_text: &str) -> Vec<SearchResult> {
        tracing::trace!(raw_text, "aggregated search");
        let run = async {
            let intent = intent::extract(raw_text);
            self.fan_out(&intent).await
        };
        Self::guarded(run).await
    }

    /// Search every provider for an already-extracted intent.
    pub async fn search_intent(&self, intent: &SearchIntent) -> Vec<SearchResult> {
        Self::guarded(self.fan_out(intent)).await
    }

    async fn guarded(
        run: impl std::future::Future<Output = Vec<SearchResult>>,
    ) -> Vec<SearchResult> {
        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(results) => results,
            Err(_) => {
                tracing::error!("search orchestration panicked, serving fallback sample data");
                vec![providers::mock_union(MOCK_FALLBACK_SOURCE)]
            }
        }
    }

    async fn fan_out(&self, intent: &SearchIntent) -> Vec<SearchResult> {
        let results: Vec<SearchResult> = if intent.query.is_empty() {
            tracing::debug!("nothing left to search after intent extraction, serving sample data");
            self.providers.iter().map(|p| p.fallback()).collect()
        } else {
            // join_all yields outputs in input order, not completion order.
            let calls = self.providers.iter().map(|p| {
                fetch_isolated(p.as_ref(), &intent.query, &intent.filters, self.timeout)
            });
            futures::future::join_all(calls).await
        };

        if results.is_empty() {
            tracing::info!("no provider results, serving sample data");
            return vec![providers::mock_union(MOCK_DATA_SOURCE)];
        }

        let mock_count = results.iter().filter(|r| r.is_mock()).count();
        tracing::debug!(
            providers = results.len(),
            mock = mock_count,
            "aggregated provider results"
        );
        results
    }
}

/// Query one provider, converting a timeout or panic into its fallback.
async fn fetch_isolated(
    provider: &dyn ProductProvider,
    query: &str,
    filters: &FilterSet,
    timeout: Duration,
) -> SearchResult {
    let kind = provider.kind();
    let call = AssertUnwindSafe(provider.fetch(query, filters)).catch_unwind();
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => {
            tracing::warn!(provider = %kind, "provider panicked, serving sample data");
            provider.fallback()
        }
        Err(_) => {
            tracing::warn!(provider = %kind, timeout_secs = timeout.as_secs_f64(), "provider timed out, serving sample data");
            provider.fallback()
        }
    }
}
