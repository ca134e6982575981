//! Trait definition for pluggable product providers.
//!
//! Every shopping source implements [`ProductProvider`]. The built-in
//! sources share one implementation, [`crate::adapter::HttpProvider`],
//! parameterised by a [`crate::adapter::ProviderSpec`]; tests and future
//! sources can implement the trait directly.

use async_trait::async_trait;

use crate::providers;
use crate::types::{FilterSet, Product, ProviderKind, SearchResult};

/// A source of product results.
///
/// `fetch` never fails: an implementation absorbs every error and answers
/// with [`ProductProvider::fallback`] instead, so one provider can never
/// take down a search. Implementations must be `Send + Sync` so the
/// aggregator can query them concurrently.
#[async_trait]
pub trait ProductProvider: Send + Sync {
    /// Search this provider for `query`, narrowed by whichever `filters`
    /// it supports.
    async fn fetch(&self, query: &str, filters: &FilterSet) -> SearchResult;

    /// Which provider this implementation represents.
    fn kind(&self) -> ProviderKind;

    /// Built-in sample products for this provider.
    fn samples(&self) -> Vec<Product> {
        providers::sample_products(self.kind())
    }

    /// The substitute result served when the live path is unavailable.
    fn fallback(&self) -> SearchResult {
        let products = self.samples();
        SearchResult {
            total_results: products.len() as u64,
            products,
            source: self.kind().mock_source(),
        }
    }
}
