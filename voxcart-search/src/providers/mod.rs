//! Built-in provider records and their sample datasets.
//!
//! Each module holds one [`ProviderSpec`] (endpoint, filters, auth headers
//! and response parser) plus the products served when the live API is
//! unavailable.

pub mod amazon;
pub mod google_shopping;
pub mod walmart;

use crate::adapter::ProviderSpec;
use crate::types::{Product, ProviderKind, SearchResult};

/// Source name for the union dataset served when no provider answered.
pub const MOCK_DATA_SOURCE: &str = "Mock Data";

/// Source name for the union dataset served after an orchestration failure.
pub const MOCK_FALLBACK_SOURCE: &str = "Mock Data (Fallback)";

/// The configuration record for `kind`.
pub fn spec_for(kind: ProviderKind) -> ProviderSpec {
    match kind {
        ProviderKind::GoogleShopping => google_shopping::SPEC,
        ProviderKind::Amazon => amazon::SPEC,
        ProviderKind::Walmart => walmart::SPEC,
    }
}

/// Built-in sample products for `kind`.
pub fn sample_products(kind: ProviderKind) -> Vec<Product> {
    match kind {
        ProviderKind::GoogleShopping => google_shopping::sample_products(),
        ProviderKind::Amazon => amazon::sample_products(),
        ProviderKind::Walmart => walmart::sample_products(),
    }
}

/// A single result holding every provider's samples, in registration order.
pub fn mock_union(source: &str) -> SearchResult {
    let products: Vec<Product> = ProviderKind::all()
        .iter()
        .flat_map(|kind| sample_products(*kind))
        .collect();
    SearchResult {
        total_results: products.len() as u64,
        products,
        source: source.to_string(),
    }
}

/// Shorthand for building a sample product.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sample(
    kind: ProviderKind,
    id: &str,
    title: &str,
    description: &str,
    price: f64,
    image_text: &str,
    slug: &str,
    rating: f64,
    reviews: u64,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        currency: "USD".to_string(),
        image: format!("/placeholder.svg?height=200&width=200&text={image_text}"),
        url: format!("https://example.com/{slug}"),
        source: kind.name().to_string(),
        rating: Some(rating),
        reviews: Some(reviews),
    }
}
