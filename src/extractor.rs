//! Extraction stage: raw crawler records in, typed dataset out.
//!
//! The crawler emits a flat list of loosely-shaped page records. This module
//! partitions them by `page_type`, strips markup out of the text fields,
//! parses numeric prices and physical dimensions from free-text
//! specification values, and computes the basic content counters the
//! analyzer relies on.
//!
//! Parsing failures never abort the stage: a price or dimension that cannot
//! be read simply stays absent on the output record.

use crate::models::{
    Dimension, ProcessedArticle, ProcessedDataset, ProcessedProduct, RawPageRecord,
};
use crate::utils::iso_timestamp;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// First contiguous numeric substring: digits with at most one decimal point.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Dimension categories and their key aliases, in match-priority order.
/// A specification key is assigned to the first category that matches and
/// to at most one category.
const DIMENSION_ALIASES: &[(&str, &[&str])] = &[
    ("length", &["length", "len", "l"]),
    ("width", &["width", "w", "wide"]),
    ("height", &["height", "h", "tall"]),
    ("diameter", &["diameter", "dia", "φ"]),
    ("weight", &["weight", "wt"]),
];

/// Recognized unit tokens: length units first, then weight units.
const UNIT_TOKENS: &[&str] = &[
    "mm", "cm", "m", "in", "inch", "inches", "ft", "foot", "feet", "g", "kg", "lb", "lbs", "oz",
    "ounce", "ounces",
];

/// Partition raw crawler records into a [`ProcessedDataset`].
///
/// Records with no `page_type` are dropped silently; they still contribute
/// to `total_pages` but to none of the per-type counts. Products and
/// articles get their text fields cleaned and their derived fields
/// computed; everything else passes through untouched.
#[instrument(level = "info", skip_all, fields(total_pages = raw_pages.len()))]
pub fn process(raw_pages: Vec<RawPageRecord>) -> ProcessedDataset {
    let total_pages = raw_pages.len();
    let mut products = Vec::new();
    let mut articles = Vec::new();
    let mut other_pages = Vec::new();

    for record in raw_pages {
        match record.page_type.as_deref() {
            Some("product") => products.push(process_product(record)),
            Some("article") => articles.push(process_article(record)),
            Some(_) => other_pages.push(record),
            None => {
                debug!(url = ?record.url, "Dropping record without page_type");
            }
        }
    }

    info!(
        total_pages,
        product_count = products.len(),
        article_count = articles.len(),
        other_count = other_pages.len(),
        "Extraction complete"
    );

    ProcessedDataset {
        metadata: crate::models::DatasetMetadata {
            processed_timestamp: iso_timestamp(),
            total_pages,
            product_count: products.len(),
            article_count: articles.len(),
            other_count: other_pages.len(),
        },
        products,
        articles,
        other_pages,
    }
}

/// Clean a product record: strip markup from name and description, parse
/// the price, and pull dimensions out of the specification table.
fn process_product(record: RawPageRecord) -> ProcessedProduct {
    let name = record.name.as_deref().map(clean_text);
    let description = record.description.as_deref().map(clean_text);
    let price_numeric = record.price.as_deref().and_then(extract_price);
    let dimensions = record.specifications.as_ref().and_then(extract_dimensions);

    ProcessedProduct {
        url: record.url,
        page_type: record.page_type,
        crawl_timestamp: record.crawl_timestamp,
        name,
        price_raw: record.price.clone(),
        price: record.price,
        price_numeric,
        description,
        sku: record.sku,
        images: record.images,
        specifications: record.specifications,
        dimensions,
        categories: record.categories,
        meta: record.meta,
        content_metrics: record.content_metrics,
        template_structure: record.template_structure,
        extraction_timestamp: iso_timestamp(),
        extra: record.extra,
    }
}

/// Clean an article record and compute its content counters.
fn process_article(record: RawPageRecord) -> ProcessedArticle {
    let title = record.title.as_deref().map(clean_text);
    let content = record.content.as_deref().map(clean_text);
    let content_length = content.as_ref().map(|c| c.chars().count());
    let word_count = content.as_ref().map(|c| c.split_whitespace().count());

    ProcessedArticle {
        url: record.url,
        page_type: record.page_type,
        crawl_timestamp: record.crawl_timestamp,
        title,
        content,
        content_length,
        word_count,
        meta: record.meta,
        content_metrics: record.content_metrics,
        structure: record.structure,
        extraction_timestamp: iso_timestamp(),
        extra: record.extra,
    }
}

/// Strip HTML markup down to plain text and normalize whitespace.
///
/// Entities are decoded as part of parsing, whitespace runs collapse to a
/// single space, and the ends are trimmed.
pub fn clean_text(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    let stripped: String = fragment.root_element().text().collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a numeric price out of free-form price text.
///
/// Thousands-separator commas are removed first, then the first contiguous
/// numeric substring is parsed. `None` when no number is present; never 0.
pub fn extract_price(price_text: &str) -> Option<f64> {
    let without_commas = price_text.replace(',', "");
    NUMBER_RE
        .find(&without_commas)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Pull physical dimensions out of a specification table.
///
/// Each key is tested against [`DIMENSION_ALIASES`] in table order; the
/// first matching category takes the key. Multi-character aliases match as
/// substrings of the lowercased key, single-character aliases only as whole
/// tokens (otherwise the `w` in "Weight" would read as a width). A value
/// with no numeric substring contributes nothing. `None` when no dimension
/// was found at all.
pub fn extract_dimensions(
    specifications: &BTreeMap<String, String>,
) -> Option<BTreeMap<String, Dimension>> {
    let mut dimensions = BTreeMap::new();

    for (key, value) in specifications {
        let key_lower = key.to_lowercase();

        for (category, aliases) in DIMENSION_ALIASES {
            if !aliases.iter().any(|alias| alias_matches(&key_lower, alias)) {
                continue;
            }
            if let Some(found) = NUMBER_RE.find(value) {
                if let Ok(magnitude) = found.as_str().parse::<f64>() {
                    dimensions.insert(
                        (*category).to_string(),
                        Dimension {
                            value: magnitude,
                            unit: extract_unit(value),
                        },
                    );
                }
            }
            break;
        }
    }

    (!dimensions.is_empty()).then_some(dimensions)
}

/// Whether a lowercased specification key matches a dimension alias.
fn alias_matches(key_lower: &str, alias: &str) -> bool {
    if alias.chars().count() == 1 {
        key_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == alias)
    } else {
        key_lower.contains(alias)
    }
}

/// Find the first recognized unit token in a specification value.
fn extract_unit(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
        .find(|token| UNIT_TOKENS.contains(token))
        .map(str::to_string)
}
