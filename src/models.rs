//! Data models for crawled pages and their processed representations.
//!
//! This module defines the structures that flow between pipeline stages:
//! - [`RawPageRecord`]: One crawled page as emitted by the crawling layer
//! - [`ProcessedProduct`] / [`ProcessedArticle`]: Cleaned, typed records
//! - [`ProcessedDataset`]: The extractor's complete output unit
//!
//! The crawler enforces no schema, so every field except `page_type` is
//! optional and unknown fields are carried through a flattened catch-all map.
//! Absent fields are omitted on serialization rather than written as null.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single crawled page as emitted by the crawling layer.
///
/// The crawler classifies pages as `"product"`, `"article"`, or anything
/// else, and attaches whatever fields it managed to scrape. Only `page_type`
/// is meaningful for routing; everything else is best-effort free text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPageRecord {
    /// The URL the page was crawled from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Page classification: "product", "article", or other.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    /// ISO-8601 timestamp of when the page was crawled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_timestamp: Option<String>,
    /// Product name (products only, may contain markup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw price text, e.g. "$1,234.56".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Product description (may contain markup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stock keeping unit identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Ordered image URLs found on the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Specification table scraped from the page. Accepts the short
    /// `specs` key some crawler configurations emit.
    #[serde(alias = "specs", skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
    /// Category breadcrumbs for the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Article title (articles only, may contain markup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Article body (articles only, may contain markup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Head metadata scraped from the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    /// Per-page counters computed upstream, with an optional `seo` sub-bag
    /// of boolean flags. Consumed, never produced, by this crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_metrics: Option<Map<String, Value>>,
    /// Boolean checklist describing the product page template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_structure: Option<Map<String, Value>>,
    /// Boolean checklist describing the article structure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<Map<String, Value>>,
    /// Any further crawler fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Head metadata extracted from a page's `<head>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
}

/// One physical dimension parsed out of a specification value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dimension {
    /// Magnitude parsed from the specification value.
    pub value: f64,
    /// Unit token found in the value text, if any was recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A product page after extraction: markup stripped, price and dimensions
/// parsed into structured form. All raw crawler fields are carried through.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessedProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_timestamp: Option<String>,
    /// Cleaned product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Original price text, unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Copy of the original price text kept alongside the parsed value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_raw: Option<String>,
    /// Parsed numeric price. Absent when the text held no parseable number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_numeric: Option<f64>,
    /// Cleaned product description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
    /// Dimensions parsed from the specification table. Absent, not empty,
    /// when nothing dimension-like was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<BTreeMap<String, Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_metrics: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_structure: Option<Map<String, Value>>,
    /// ISO-8601 timestamp of when this record was extracted.
    pub extraction_timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An article page after extraction: markup stripped and basic content
/// counters computed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessedArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_timestamp: Option<String>,
    /// Cleaned article title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Cleaned article body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Character count of the cleaned body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    /// Whitespace-token count of the cleaned body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_metrics: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<Map<String, Value>>,
    /// ISO-8601 timestamp of when this record was extracted.
    pub extraction_timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Counters describing one extraction run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetMetadata {
    /// ISO-8601 timestamp of when extraction ran.
    pub processed_timestamp: String,
    /// All records seen in the input, including ones dropped for having
    /// no `page_type`.
    pub total_pages: usize,
    pub product_count: usize,
    pub article_count: usize,
    pub other_count: usize,
}

/// The extractor's complete output: one immutable, timestamped unit that
/// the analyzer consumes as-is.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessedDataset {
    pub metadata: DatasetMetadata,
    pub products: Vec<ProcessedProduct>,
    pub articles: Vec<ProcessedArticle>,
    /// Pages that were neither products nor articles, carried unmodified.
    pub other_pages: Vec<RawPageRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_minimal() {
        let json = r#"{"page_type": "product", "name": "Widget"}"#;
        let record: RawPageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.page_type.as_deref(), Some("product"));
        assert_eq!(record.name.as_deref(), Some("Widget"));
        assert!(record.price.is_none());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_raw_record_specs_alias() {
        let json = r#"{"page_type": "product", "specs": {"Weight": "2 kg"}}"#;
        let record: RawPageRecord = serde_json::from_str(json).unwrap();
        let specs = record.specifications.unwrap();
        assert_eq!(specs.get("Weight").map(String::as_str), Some("2 kg"));
    }

    #[test]
    fn test_raw_record_preserves_unknown_fields() {
        let json = r#"{"page_type": "article", "title": "Hi", "breadcrumb": ["a", "b"]}"#;
        let record: RawPageRecord = serde_json::from_str(json).unwrap();
        assert!(record.extra.contains_key("breadcrumb"));

        let round_trip = serde_json::to_string(&record).unwrap();
        assert!(round_trip.contains("breadcrumb"));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let record: RawPageRecord =
            serde_json::from_str(r#"{"page_type": "product"}"#).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"page_type":"product"}"#);
    }

    #[test]
    fn test_dimension_serialization() {
        let dim = Dimension {
            value: 12.5,
            unit: Some("in".to_string()),
        };
        let json = serde_json::to_string(&dim).unwrap();
        assert_eq!(json, r#"{"value":12.5,"unit":"in"}"#);

        let unitless = Dimension {
            value: 3.0,
            unit: None,
        };
        assert_eq!(serde_json::to_string(&unitless).unwrap(), r#"{"value":3.0}"#);
    }

    #[test]
    fn test_dataset_round_trip() {
        let dataset = ProcessedDataset {
            metadata: DatasetMetadata {
                processed_timestamp: "2025-05-12T23:01:36".to_string(),
                total_pages: 2,
                product_count: 0,
                article_count: 0,
                other_count: 2,
            },
            products: vec![],
            articles: vec![],
            other_pages: vec![],
        };

        let json = serde_json::to_string(&dataset).unwrap();
        let parsed: ProcessedDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metadata.total_pages, 2);
        assert!(parsed.products.is_empty());
    }
}
