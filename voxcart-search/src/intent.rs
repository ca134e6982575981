//! Intent extraction: free text to a structured query plus filters.
//!
//! Rules run in a fixed order (price ceiling, brand, category, filler
//! prefix) against a working copy of the text. Each rule removes the
//! phrase it recognised before the next rule looks, so later rules see
//! the progressively trimmed string. Matching is case-insensitive but the
//! surviving query keeps the caller's casing.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Brand, Category, FilterSet, SearchIntent};

static PRICE_CEILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:under|less than)\s+\$?(\d+)\b").expect("valid price pattern")
});

static BRAND: LazyLock<Regex> = LazyLock::new(|| {
    let words = alternation(Brand::all().iter().map(Brand::as_str));
    Regex::new(&format!(r"(?i)\b(?:by|from|brand)\s+({words})\b")).expect("valid brand pattern")
});

static CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    let words = alternation(Category::all().iter().map(Category::as_str));
    Regex::new(&format!(r"(?i)\b(?:in|category)\s+({words})\b"))
        .expect("valid category pattern")
});

/// `a|b|c` over vocabulary words.
fn alternation<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words.map(regex::escape).collect::<Vec<_>>().join("|")
}

/// Leading phrases that carry no search meaning. Checked in order; at
/// most one is stripped.
pub const FILLER_PHRASES: &[&str] = &[
    "show me",
    "find me",
    "search for",
    "looking for",
    "i want",
    "i need",
    "can you find",
    "please find",
];

/// Extract a [`SearchIntent`] from raw text.
///
/// Never fails: text no rule recognises passes through unchanged (apart
/// from surrounding whitespace). An empty `query` in the result means
/// nothing searchable was left.
pub fn extract(raw_text: &str) -> SearchIntent {
    let mut query = raw_text.trim().to_string();
    let mut filters = FilterSet::default();

    if let Some((range, price)) = PRICE_CEILING.captures(&query).and_then(|caps| {
        let whole = caps.get(0)?;
        let price = caps.get(1)?.as_str().parse::<u32>().ok().filter(|p| *p > 0)?;
        Some((whole.range(), price))
    }) {
        filters.max_price = Some(price);
        query = remove_span(&query, range);
    }

    if let Some((range, brand)) = BRAND.captures(&query).and_then(|caps| {
        let whole = caps.get(0)?;
        let brand = caps.get(1)?.as_str().parse::<Brand>().ok()?;
        Some((whole.range(), brand))
    }) {
        filters.brand = Some(brand);
        query = remove_span(&query, range);
    }

    if let Some((range, category)) = CATEGORY.captures(&query).and_then(|caps| {
        let whole = caps.get(0)?;
        let category = caps.get(1)?.as_str().parse::<Category>().ok()?;
        Some((whole.range(), category))
    }) {
        filters.category = Some(category);
        query = remove_span(&query, range);
    }

    let query = strip_filler(&query).to_string();

    tracing::trace!(query = %query, ?filters, "extracted search intent");

    SearchIntent { query, filters }
}

/// Remove `range` from `text`, joining the remainder with one space.
fn remove_span(text: &str, range: std::ops::Range<usize>) -> String {
    let before = text[..range.start].trim_end();
    let after = text[range.end..].trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.trim_end().to_string(),
        (_, true) => before.trim_start().to_string(),
        _ => format!("{before} {after}"),
    }
}

/// Strip the first matching filler prefix, if any.
fn strip_filler(query: &str) -> &str {
    let query = query.trim();
    for phrase in FILLER_PHRASES {
        let Some(head) = query.get(..phrase.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(phrase) {
            continue;
        }
        let rest = &query[phrase.len()..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return rest.trim();
        }
    }
    query
}
