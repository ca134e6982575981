//! Core types for products, per-source results, filters and providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image used when a provider item carries no thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=200";

/// Suffix appended to a provider name when its sample dataset stands in
/// for a live response.
pub const MOCK_SUFFIX: &str = " (Mock)";

/// A single product in the canonical shape shared by every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier, unique within one source's batch only.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Price in `currency` units, never negative.
    pub price: f64,
    pub currency: String,
    pub image: String,
    pub url: String,
    /// Name of the source that produced this product.
    pub source: String,
    /// Average rating in `0.0..=5.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews behind `rating`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
}

/// One provider's contribution to a search (or its sample substitute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub products: Vec<Product>,
    /// Server-side result count; may exceed `products.len()`.
    pub total_results: u64,
    pub source: String,
}

impl SearchResult {
    /// Whether this result was served from built-in sample data.
    pub fn is_mock(&self) -> bool {
        self.source.ends_with("(Mock)") || self.source.starts_with("Mock Data")
    }
}

/// Brands recognised by the intent extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Apple,
    Samsung,
    Sony,
    Google,
    Amazon,
    Microsoft,
    Nike,
    Adidas,
}

impl Brand {
    /// The vocabulary word for this brand, lower-cased.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Samsung => "samsung",
            Self::Sony => "sony",
            Self::Google => "google",
            Self::Amazon => "amazon",
            Self::Microsoft => "microsoft",
            Self::Nike => "nike",
            Self::Adidas => "adidas",
        }
    }

    /// Returns the full closed vocabulary.
    pub fn all() -> &'static [Brand] {
        &[
            Self::Apple,
            Self::Samsung,
            Self::Sony,
            Self::Google,
            Self::Amazon,
            Self::Microsoft,
            Self::Nike,
            Self::Adidas,
        ]
    }
}

impl FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown brand: {s}"))
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories recognised by the intent extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Shoes,
    Books,
    Home,
    Kitchen,
    Toys,
}

impl Category {
    /// The vocabulary word for this category, lower-cased.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Shoes => "shoes",
            Self::Books => "books",
            Self::Home => "home",
            Self::Kitchen => "kitchen",
            Self::Toys => "toys",
        }
    }

    /// Returns the full closed vocabulary.
    pub fn all() -> &'static [Category] {
        &[
            Self::Electronics,
            Self::Clothing,
            Self::Shoes,
            Self::Books,
            Self::Home,
            Self::Kitchen,
            Self::Toys,
        ]
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional constraints narrowing a search. An absent field means
/// "no constraint", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl FilterSet {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.brand.is_none()
            && self.category.is_none()
    }
}

/// Structured query derived from free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntent {
    /// Remaining search terms. Empty means "no query".
    pub query: String,
    pub filters: FilterSet,
}

/// Shopping-data providers voxcart knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    GoogleShopping,
    Amazon,
    Walmart,
}

impl ProviderKind {
    /// Human-readable source name, used in [`SearchResult::source`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoogleShopping => "Google Shopping",
            Self::Amazon => "Amazon",
            Self::Walmart => "Walmart",
        }
    }

    /// Prefix for synthesized product ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::GoogleShopping => "google",
            Self::Amazon => "amazon",
            Self::Walmart => "walmart",
        }
    }

    /// Source name used when sample data substitutes for a live response.
    pub fn mock_source(&self) -> String {
        format!("{}{MOCK_SUFFIX}", self.name())
    }

    /// All providers, in registration order.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::GoogleShopping, Self::Amazon, Self::Walmart]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
