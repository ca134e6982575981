//! Generic HTTP adapter shared by every built-in provider.
//!
//! A provider differs from its siblings only in four things, captured by
//! [`ProviderSpec`]: the endpoint, which filters it accepts as query
//! parameters, the auth header names, and how its native JSON maps onto
//! [`Product`]. [`HttpProvider`] supplies everything else: the
//! credential gate, request construction, status checking, caching and
//! the sample-data fallback.

use async_trait::async_trait;

use crate::cache::{CacheKey, ResponseCache};
use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::normalize;
use crate::provider::ProductProvider;
use crate::types::{FilterSet, Product, ProviderKind, SearchResult};

/// A filter a provider may accept as a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterParam {
    MinPrice,
    MaxPrice,
    Brand,
    Category,
}

impl FilterParam {
    /// Query-string key used for this filter.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MinPrice => "min_price",
            Self::MaxPrice => "max_price",
            Self::Brand => "brand",
            Self::Category => "category",
        }
    }

    /// The filter's value, if set.
    pub fn value(&self, filters: &FilterSet) -> Option<String> {
        match self {
            Self::MinPrice => filters.min_price.map(|p| p.to_string()),
            Self::MaxPrice => filters.max_price.map(|p| p.to_string()),
            Self::Brand => filters.brand.map(|b| b.as_str().to_string()),
            Self::Category => filters.category.map(|c| c.as_str().to_string()),
        }
    }
}

/// Header names carrying the credential and the API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthHeaders {
    pub key_header: &'static str,
    pub host_header: &'static str,
}

/// RapidAPI's header pair, used by all built-in providers.
pub const RAPIDAPI_HEADERS: AuthHeaders = AuthHeaders {
    key_header: "X-RapidAPI-Key",
    host_header: "X-RapidAPI-Host",
};

/// One page of normalised products plus the provider's own result count.
#[derive(Debug, Clone, Default)]
pub struct ProviderPage {
    pub products: Vec<Product>,
    /// Server-side total, when the provider reports one.
    pub total: Option<u64>,
}

/// Parser from a provider's native response body to canonical products.
pub type ParseFn = fn(&str) -> Result<ProviderPage, SearchError>;

/// The configuration record describing one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    /// Scheme and host, e.g. `https://amazon-product-search1.p.rapidapi.com`.
    pub base_url: &'static str,
    /// Path appended to the base, e.g. `/search`.
    pub path: &'static str,
    /// Value for the host header.
    pub host: &'static str,
    pub auth: AuthHeaders,
    /// Query-string key carrying the search terms.
    pub query_param: &'static str,
    /// Parameters sent with every request.
    pub fixed_params: &'static [(&'static str, &'static str)],
    /// Filters this provider understands; others are silently dropped.
    pub filters: &'static [FilterParam],
    pub parse: ParseFn,
}

impl ProviderSpec {
    /// Query parameters for a request, in a stable order: search terms,
    /// fixed parameters, then supported filters that are set.
    pub fn request_params(&self, query: &str, filters: &FilterSet) -> Vec<(&'static str, String)> {
        let mut params = vec![(self.query_param, query.to_string())];
        params.extend(
            self.fixed_params
                .iter()
                .map(|(k, v)| (*k, (*v).to_string())),
        );
        params.extend(
            self.filters
                .iter()
                .filter_map(|f| f.value(filters).map(|v| (f.key(), v))),
        );
        params
    }
}

/// [`ProductProvider`] over a provider's HTTP search API.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    spec: ProviderSpec,
    config: ProviderConfig,
    endpoint: String,
    client: reqwest::Client,
    cache: ResponseCache,
}

impl HttpProvider {
    /// Create an adapter. `config.base_url`, when set, replaces the
    /// [`ProviderSpec::base_url`].
    pub fn new(
        spec: ProviderSpec,
        config: ProviderConfig,
        client: reqwest::Client,
        cache: ResponseCache,
    ) -> Self {
        let base = config.base_url.as_deref().unwrap_or(spec.base_url);
        let endpoint = format!("{}{}", base.trim_end_matches('/'), spec.path);
        Self {
            spec,
            config,
            endpoint,
            client,
            cache,
        }
    }

    /// The full URL requests are sent to, without query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_live(
        &self,
        api_key: &str,
        query: &str,
        filters: &FilterSet,
    ) -> Result<SearchResult, SearchError> {
        let kind = self.spec.kind;
        let params = self.spec.request_params(query, filters);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .header(self.spec.auth.key_header, api_key)
            .header(self.spec.auth.host_header, self.spec.host)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("{kind}: {e}"))
                } else {
                    SearchError::Http(format!("{kind} request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("{kind} response read failed: {e}")))?;

        tracing::trace!(provider = %kind, bytes = body.len(), "provider response received");

        let mut page = (self.spec.parse)(&body)?;
        normalize::ensure_unique_ids(&mut page.products);

        let total_results = page
            .total
            .filter(|t| *t > 0)
            .unwrap_or(page.products.len() as u64);

        Ok(SearchResult {
            products: page.products,
            total_results,
            source: kind.name().to_string(),
        })
    }
}

#[async_trait]
impl ProductProvider for HttpProvider {
    async fn fetch(&self, query: &str, filters: &FilterSet) -> SearchResult {
        let kind = self.spec.kind;

        let Some(api_key) = self.config.credential() else {
            tracing::warn!(provider = %kind, "no API key configured, serving sample data");
            return self.fallback();
        };

        let key = CacheKey::new(kind, &self.endpoint, query, filters);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(provider = %kind, "serving cached provider response");
            return hit;
        }

        match self.fetch_live(api_key, query, filters).await {
            Ok(result) => {
                tracing::debug!(provider = %kind, count = result.products.len(), "provider returned products");
                self.cache.insert(key, result.clone()).await;
                result
            }
            Err(err) => {
                tracing::warn!(provider = %kind, error = %err, "provider request failed, serving sample data");
                self.fallback()
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        self.spec.kind
    }
}
