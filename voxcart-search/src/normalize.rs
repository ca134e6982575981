//! Helpers for turning loosely-typed provider JSON into canonical fields.
//!
//! Provider APIs disagree on whether numbers arrive as JSON numbers or
//! strings, and any field may be missing. These helpers apply the same
//! defaults for every provider.

use std::collections::HashSet;

use rand::distributions::{Alphanumeric, DistString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{Product, ProviderKind};

/// Title used when a provider item has none.
pub const UNKNOWN_TITLE: &str = "Unknown Product";

/// Default currency when a provider does not report one.
pub const DEFAULT_CURRENCY: &str = "USD";

const ID_TOKEN_LEN: usize = 13;

/// Deserialize each entry of a provider's item list independently,
/// dropping entries that are not objects of the expected shape.
pub fn items<T: DeserializeOwned>(list: Option<Vec<Value>>, kind: ProviderKind) -> Vec<T> {
    list.unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(provider = %kind, error = %e, "skipping malformed item");
                None
            }
        })
        .collect()
}

/// Field `key` of a nested object, if `value` is one.
pub fn nested<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    value?.get(key)
}

/// Text of a string or number field, trimmed, or `default` when missing,
/// blank or of another JSON type.
pub fn text_field(value: Option<&Value>, default: &str) -> String {
    text_or(string_field(value), default)
}

/// Parse a price that may be a number or a numeric string. Missing,
/// unparseable, negative and non-finite values become `0.0`.
pub fn parse_price(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_leading_number(s),
        _ => None,
    };
    parsed.filter(|p| p.is_finite() && *p >= 0.0).unwrap_or(0.0)
}

/// Parse a rating, clamped to `0.0..=5.0`.
pub fn parse_rating(value: Option<&Value>) -> Option<f64> {
    let raw = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }?;
    raw.is_finite().then(|| raw.clamp(0.0, 5.0))
}

/// Parse a non-negative review count.
pub fn parse_count(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}

/// Parse the numeric prefix of strings like `"$1,199.99"` or `"24.5 USD"`.
fn parse_leading_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

/// A string or number field rendered as text. Other JSON types are `None`.
pub fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty trimmed text, or `default`.
pub fn text_or(value: Option<String>, default: &str) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Synthesize an id of the form `<prefix>-<random token>`.
pub fn synth_id(kind: ProviderKind) -> String {
    let token = Alphanumeric
        .sample_string(&mut rand::thread_rng(), ID_TOKEN_LEN)
        .to_lowercase();
    format!("{}-{token}", kind.id_prefix())
}

/// The provider's id if present, otherwise a synthesized one.
pub fn id_or_synth(value: Option<String>, kind: ProviderKind) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| synth_id(kind))
}

/// Make ids unique within one batch by suffixing repeats with `-2`, `-3`, ...
pub fn ensure_unique_ids(products: &mut [Product]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(products.len());
    for product in products.iter_mut() {
        if seen.insert(product.id.clone()) {
            continue;
        }
        let mut n = 2;
        let unique = loop {
            let candidate = format!("{}-{n}", product.id);
            if !seen.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        seen.insert(unique.clone());
        product.id = unique;
    }
}
