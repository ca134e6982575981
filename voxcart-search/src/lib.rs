//! # voxcart-search
//!
//! Turns a spoken or typed shopping request into product results from
//! several shopping-data providers at once.
//!
//! ## Design
//!
//! - [`intent::extract`] parses free text into a query plus price, brand
//!   and category filters
//! - One generic [`adapter::HttpProvider`] drives every provider; each
//!   provider contributes only a small [`adapter::ProviderSpec`] record
//! - [`Aggregator`] queries all providers concurrently and reports results
//!   in registration order
//! - Graceful degradation: a provider with no credential, a failing
//!   request or a timeout is replaced by that provider's sample data,
//!   marked with a `" (Mock)"` source suffix
//! - Live responses are cached in memory with a configurable TTL
//!
//! ## Security
//!
//! - API keys are sent only in request headers and never logged
//! - Search queries are logged only at trace level

pub mod adapter;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod intent;
pub mod normalize;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::{ProviderConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use intent::extract;
pub use orchestrator::Aggregator;
pub use provider::ProductProvider;
pub use types::{
    Brand, Category, FilterSet, Product, ProviderKind, SearchIntent, SearchResult,
};

/// Search every provider in `config` for the intent in `raw_text`.
///
/// Never fails. If the configuration cannot be turned into an aggregator
/// the error is logged and the single `"Mock Data (Fallback)"` result is
/// returned.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = voxcart_search::SearchConfig::default();
/// let results = voxcart_search::search("headphones by Sony under $100", &config).await;
/// for result in &results {
///     println!("{}: {} results", result.source, result.total_results);
/// }
/// # }
/// ```
pub async fn search(raw_text: &str, config: &SearchConfig) -> Vec<SearchResult> {
    match Aggregator::new(config) {
        Ok(aggregator) => aggregator.search(raw_text).await,
        Err(err) => {
            tracing::error!(error = %err, "cannot build aggregator, serving fallback sample data");
            vec![providers::mock_union(providers::MOCK_FALLBACK_SOURCE)]
        }
    }
}

/// Search with the default configuration (every provider in sample-data
/// mode unless credentials are added).
pub async fn search_default(raw_text: &str) -> Vec<SearchResult> {
    search(raw_text, &SearchConfig::default()).await
}
