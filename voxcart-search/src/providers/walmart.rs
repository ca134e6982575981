//! Walmart product search via RapidAPI.

use serde::Deserialize;
use serde_json::Value;

use crate::adapter::{FilterParam, ProviderPage, ProviderSpec, RAPIDAPI_HEADERS};
use crate::error::SearchError;
use crate::normalize::{self, DEFAULT_CURRENCY, UNKNOWN_TITLE};
use crate::types::{Product, ProviderKind, PLACEHOLDER_IMAGE};

const KIND: ProviderKind = ProviderKind::Walmart;

pub const SPEC: ProviderSpec = ProviderSpec {
    kind: KIND,
    base_url: "https://walmart-product-search.p.rapidapi.com",
    path: "/search",
    host: "walmart-product-search.p.rapidapi.com",
    auth: RAPIDAPI_HEADERS,
    query_param: "query",
    fixed_params: &[],
    filters: &[FilterParam::MaxPrice, FilterParam::Brand],
    parse: parse_response,
};

#[derive(Debug, Deserialize)]
struct Response {
    items: Option<Vec<Value>>,
    total_count: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    price: Option<Value>,
    image: Option<Value>,
    product_url: Option<Value>,
    rating: Option<Value>,
}

fn parse_response(body: &str) -> Result<ProviderPage, SearchError> {
    let response: Response = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Walmart response: {e}")))?;

    let products = normalize::items::<Item>(response.items, KIND)
        .into_iter()
        .map(|item| {
            let rating = item.rating.as_ref();
            Product {
                id: normalize::id_or_synth(normalize::string_field(item.id.as_ref()), KIND),
                title: normalize::text_field(item.title.as_ref(), UNKNOWN_TITLE),
                description: normalize::text_field(item.description.as_ref(), ""),
                price: normalize::parse_price(normalize::nested(
                    item.price.as_ref(),
                    "current_price",
                )),
                currency: DEFAULT_CURRENCY.to_string(),
                image: normalize::text_field(item.image.as_ref(), PLACEHOLDER_IMAGE),
                url: normalize::text_field(item.product_url.as_ref(), ""),
                source: KIND.name().to_string(),
                rating: normalize::parse_rating(normalize::nested(rating, "average")),
                reviews: normalize::parse_count(normalize::nested(rating, "count")),
            }
        })
        .collect();

    Ok(ProviderPage {
        products,
        total: normalize::parse_count(response.total_count.as_ref()),
    })
}

/// Sample products served when Walmart is unavailable.
pub fn sample_products() -> Vec<Product> {
    vec![
        super::sample(
            KIND,
            "walmart-1",
            "Ninja DualBrew Pro Coffee Maker",
            "Coffee System with 12-Cup Carafe, Single-Serve",
            199.99,
            "Ninja+Coffee",
            "ninjacoffee",
            4.5,
            1876,
        ),
        super::sample(
            KIND,
            "walmart-2",
            "Dyson V11 Torque Drive Cordless Vacuum",
            "Intelligent cordless vacuum with up to 60 minutes of run time",
            599.99,
            "Dyson+V11",
            "dysonv11",
            4.8,
            2341,
        ),
    ]
}
