//! Amazon product search via RapidAPI.
//!
//! Supports price ceiling and brand filters. Prices are always USD.

use serde::Deserialize;
use serde_json::Value;

use crate::adapter::{FilterParam, ProviderPage, ProviderSpec, RAPIDAPI_HEADERS};
use crate::error::SearchError;
use crate::normalize::{self, DEFAULT_CURRENCY, UNKNOWN_TITLE};
use crate::types::{Product, ProviderKind, PLACEHOLDER_IMAGE};

const KIND: ProviderKind = ProviderKind::Amazon;

pub const SPEC: ProviderSpec = ProviderSpec {
    kind: KIND,
    base_url: "https://amazon-product-search1.p.rapidapi.com",
    path: "/search",
    host: "amazon-product-search1.p.rapidapi.com",
    auth: RAPIDAPI_HEADERS,
    query_param: "query",
    fixed_params: &[("country", "us")],
    filters: &[FilterParam::MaxPrice, FilterParam::Brand],
    parse: parse_response,
};

#[derive(Debug, Deserialize)]
struct Response {
    results: Option<Vec<Value>>,
    total_results: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Item {
    asin: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    price: Option<Value>,
    thumbnail: Option<Value>,
    url: Option<Value>,
    reviews: Option<Value>,
}

fn parse_response(body: &str) -> Result<ProviderPage, SearchError> {
    let response: Response = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Amazon response: {e}")))?;

    let products = normalize::items::<Item>(response.results, KIND)
        .into_iter()
        .map(|item| {
            let reviews = item.reviews.as_ref();
            Product {
                id: normalize::id_or_synth(normalize::string_field(item.asin.as_ref()), KIND),
                title: normalize::text_field(item.title.as_ref(), UNKNOWN_TITLE),
                description: normalize::text_field(item.description.as_ref(), ""),
                price: normalize::parse_price(normalize::nested(
                    item.price.as_ref(),
                    "current_price",
                )),
                currency: DEFAULT_CURRENCY.to_string(),
                image: normalize::text_field(item.thumbnail.as_ref(), PLACEHOLDER_IMAGE),
                url: normalize::text_field(item.url.as_ref(), ""),
                source: KIND.name().to_string(),
                rating: normalize::parse_rating(normalize::nested(reviews, "rating")),
                reviews: normalize::parse_count(normalize::nested(reviews, "total_reviews")),
            }
        })
        .collect();

    Ok(ProviderPage {
        products,
        total: normalize::parse_count(response.total_results.as_ref()),
    })
}

/// Sample products served when Amazon is unavailable.
pub fn sample_products() -> Vec<Product> {
    vec![
        super::sample(
            KIND,
            "amazon-1",
            "Sony WH-1000XM5 Wireless Noise Cancelling Headphones",
            "Industry-leading noise cancellation with exceptional sound quality",
            349.99,
            "Sony+WH-1000XM5",
            "sonywh1000xm5",
            4.6,
            3782,
        ),
        super::sample(
            KIND,
            "amazon-2",
            "Apple AirPods Pro (2nd Generation)",
            "Active Noise Cancellation, Transparency mode, Spatial Audio",
            249.99,
            "AirPods+Pro",
            "airpodspro",
            4.7,
            5621,
        ),
    ]
}
