//! Search entry point used by front ends.
//!
//! Wraps the aggregator with recent-search history, cancellation, voice input
//! and a single user-facing failure message.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use voxcart_search::{Aggregator, Product, SearchResult};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::history::{KeyValueStore, RecentSearches};
use crate::voice::VoiceCapture;

/// Message shown when a search cannot complete.
pub const USER_ERROR_MESSAGE: &str = "Failed to search products. Please try again.";

/// Outcome of one search as presented to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Every product across all sources, in result order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.results.iter().flat_map(|r| r.products.iter())
    }

    /// `(source, totalResults)` per result.
    pub fn summary(&self) -> Vec<(&str, u64)> {
        self.results
            .iter()
            .map(|r| (r.source.as_str(), r.total_results))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Runs searches and remembers what was asked.
pub struct SearchService {
    aggregator: Aggregator,
    history: Arc<RecentSearches<Arc<dyn KeyValueStore>>>,
}

impl SearchService {
    /// Build the service from application config, storing history in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the search configuration is invalid.
    pub fn new(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let aggregator = Aggregator::new(&config.search_config())
            .map_err(|e| AppError::Config(e.to_string()))?;
        let history = RecentSearches::with_max_entries(store, config.history.max_entries);
        Ok(Self::with_parts(aggregator, history))
    }

    pub fn with_parts(
        aggregator: Aggregator,
        history: RecentSearches<Arc<dyn KeyValueStore>>,
    ) -> Self {
        Self {
            aggregator,
            history: Arc::new(history),
        }
    }

    pub fn history(&self) -> &RecentSearches<Arc<dyn KeyValueStore>> {
        self.history.as_ref()
    }

    /// Search for `raw_text`.
    ///
    /// Blank input returns an empty response without touching history or
    /// the network.
    pub async fn search(&self, raw_text: &str) -> SearchResponse {
        if raw_text.trim().is_empty() {
            return SearchResponse::default();
        }

        self.record(raw_text).await;

        match AssertUnwindSafe(self.aggregator.search(raw_text))
            .catch_unwind()
            .await
        {
            Ok(results) => {
                tracing::info!(
                    sources = results.len(),
                    products = results.iter().map(|r| r.products.len()).sum::<usize>(),
                    "search complete"
                );
                SearchResponse {
                    results,
                    error: None,
                }
            }
            Err(_) => {
                tracing::error!("search failed");
                SearchResponse::failed(USER_ERROR_MESSAGE)
            }
        }
    }

    /// Store implementations may block on I/O, so the write runs on the
    /// blocking pool.
    async fn record(&self, raw_text: &str) {
        let history = Arc::clone(&self.history);
        let query = raw_text.to_owned();
        match tokio::task::spawn_blocking(move || history.add(&query)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "failed to record recent search"),
            Err(e) => tracing::warn!(error = %e, "recent search writer did not finish"),
        }
    }

    /// Search unless `cancel` fires first, in which case in-flight provider
    /// calls are dropped and `None` is returned.
    pub async fn search_cancellable(
        &self,
        raw_text: &str,
        cancel: &CancellationToken,
    ) -> Option<SearchResponse> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!("search cancelled");
                None
            }
            response = self.search(raw_text) => Some(response),
        }
    }

    /// Finish a voice capture and search its transcript.
    ///
    /// An idle capture is started first. Capture failures are reported in
    /// [`SearchResponse::error`].
    pub async fn search_voice(&self, capture: &mut dyn VoiceCapture) -> SearchResponse {
        if !capture.is_recording() {
            if let Err(e) = capture.start().await {
                tracing::warn!(error = %e, "voice capture failed to start");
                return SearchResponse::failed(e.to_string());
            }
        }
        match capture.stop().await {
            Ok(transcript) => {
                tracing::debug!(chars = transcript.text().len(), "voice transcript received");
                self.search(transcript.text()).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "voice capture failed");
                SearchResponse::failed(e.to_string())
            }
        }
    }
}
