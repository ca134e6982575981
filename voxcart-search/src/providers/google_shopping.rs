//! Google Shopping via RapidAPI.
//!
//! The only built-in provider that accepts a category filter and reports
//! its own currency per item.

use serde::Deserialize;
use serde_json::Value;

use crate::adapter::{FilterParam, ProviderPage, ProviderSpec, RAPIDAPI_HEADERS};
use crate::error::SearchError;
use crate::normalize::{self, DEFAULT_CURRENCY, UNKNOWN_TITLE};
use crate::types::{Product, ProviderKind, PLACEHOLDER_IMAGE};

const KIND: ProviderKind = ProviderKind::GoogleShopping;

pub const SPEC: ProviderSpec = ProviderSpec {
    kind: KIND,
    base_url: "https://google-shopping-product-search.p.rapidapi.com",
    path: "/search",
    host: "google-shopping-product-search.p.rapidapi.com",
    auth: RAPIDAPI_HEADERS,
    query_param: "q",
    fixed_params: &[("country", "us"), ("language", "en")],
    filters: &[
        FilterParam::MaxPrice,
        FilterParam::Brand,
        FilterParam::Category,
    ],
    parse: parse_response,
};

#[derive(Debug, Deserialize)]
struct Response {
    products: Option<Vec<Value>>,
    total_results: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Item {
    product_id: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    price: Option<Value>,
    thumbnail: Option<Value>,
    link: Option<Value>,
    rating: Option<Value>,
}

fn parse_response(body: &str) -> Result<ProviderPage, SearchError> {
    let response: Response = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Google Shopping response: {e}")))?;

    let products = normalize::items::<Item>(response.products, KIND)
        .into_iter()
        .map(|item| {
            let price = item.price.as_ref();
            let rating = item.rating.as_ref();
            Product {
                id: normalize::id_or_synth(normalize::string_field(item.product_id.as_ref()), KIND),
                title: normalize::text_field(item.title.as_ref(), UNKNOWN_TITLE),
                description: normalize::text_field(item.description.as_ref(), ""),
                price: normalize::parse_price(normalize::nested(price, "value")),
                currency: normalize::text_field(normalize::nested(price, "currency"), DEFAULT_CURRENCY),
                image: normalize::text_field(item.thumbnail.as_ref(), PLACEHOLDER_IMAGE),
                url: normalize::text_field(item.link.as_ref(), ""),
                source: KIND.name().to_string(),
                rating: normalize::parse_rating(normalize::nested(rating, "value")),
                reviews: normalize::parse_count(normalize::nested(rating, "count")),
            }
        })
        .collect();

    Ok(ProviderPage {
        products,
        total: normalize::parse_count(response.total_results.as_ref()),
    })
}

/// Sample products served when Google Shopping is unavailable.
pub fn sample_products() -> Vec<Product> {
    vec![
        super::sample(
            KIND,
            "google-1",
            "iPhone 15 Pro Max - 256GB - Deep Blue",
            "Apple's latest flagship phone with A17 Pro chip and titanium design",
            1199.99,
            "iPhone+15+Pro",
            "iphone15pro",
            4.8,
            1245,
        ),
        super::sample(
            KIND,
            "google-2",
            "Samsung Galaxy S23 Ultra - 512GB - Phantom Black",
            "Samsung's premium smartphone with S Pen and 200MP camera",
            1099.99,
            "Galaxy+S23+Ultra",
            "galaxys23ultra",
            4.7,
            982,
        ),
    ]
}
