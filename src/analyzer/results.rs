//! Output model for the analysis stage.
//!
//! Every per-field sub-analysis is wrapped in [`Section`]: it serializes
//! either as the full analysis object or as a single-key `{"error": ...}`
//! marker when the source field was present but unusable. Sub-analyses for
//! absent source fields are omitted entirely, so reporting code must treat
//! every section as optional.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A sub-analysis that either computed fully or degraded to an error marker.
///
/// One malformed record must never prevent analysis of the rest of the
/// dataset, so per-field failures are encoded as data instead of errors.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Section<T> {
    Ready(T),
    Unavailable { error: String },
}

impl<T> Section<T> {
    /// Build the single-key error marker.
    pub fn unavailable(reason: &str) -> Self {
        Section::Unavailable {
            error: reason.to_string(),
        }
    }

    /// The computed value, if this section is not an error marker.
    pub fn value(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Unavailable { .. } => None,
        }
    }
}

/// Counters describing one analysis run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp of when the analysis ran.
    pub analysis_timestamp: String,
    pub product_count: usize,
    pub article_count: usize,
}

/// The analyzer's complete output unit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub metadata: AnalysisMetadata,
    pub summary: Summary,
    pub product_analyses: Vec<ProductAnalysis>,
    pub article_analyses: Vec<ArticleAnalysis>,
    pub content_quality_analysis: ContentQualityAnalysis,
    pub seo_analysis: SeoAnalysis,
}

/// Dataset-wide statistics.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Summary {
    /// Absent when no product exposed a numeric price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_statistics: Option<PriceStatistics>,
    pub content_statistics: ContentStatistics,
    /// Top categories by frequency, at most ten, ties in first-seen order.
    pub top_categories: Vec<CategoryCount>,
}

/// Price statistics over all products with a parsed numeric price.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceStatistics {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    /// Lower-middle element of the sorted prices, not an interpolated
    /// median.
    pub median_price: f64,
    pub price_count: usize,
}

/// Average content lengths across the dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_product_description_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_article_length: Option<f64>,
}

/// One category and how many products carried it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Score bundle for a single product. Each section is present only when
/// the corresponding source field was present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductAnalysis {
    pub product_id: String,
    pub product_name: String,
    pub url: String,
    pub analysis_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_analysis: Option<Section<TextAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification_analysis: Option<Section<SpecificationAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_analysis: Option<Section<ImageAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_analysis: Option<Section<PriceAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_analysis: Option<Section<TemplateAnalysis>>,
}

/// Score bundle for a single article.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleAnalysis {
    pub article_title: String,
    pub url: String,
    pub analysis_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_analysis: Option<Section<TextAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_analysis: Option<Section<StructureAnalysis>>,
}

/// Readability, sentiment, and key-phrase metrics for one text field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextAnalysis {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub readability: Readability,
    pub sentiment: Sentiment,
    /// Top multi-word phrases by frequency, at most five.
    pub key_phrases: Vec<String>,
}

/// Flesch scores with their banded interpretation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Readability {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub interpretation: String,
}

/// Lexicon-based sentiment score with its banded interpretation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sentiment {
    pub score: f64,
    pub positive_word_count: usize,
    pub negative_word_count: usize,
    pub interpretation: String,
}

/// One specification entry as it was categorized.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpecEntry {
    pub key: String,
    pub value: String,
}

/// Specifications grouped by the fixed category table; field order mirrors
/// the table's match-priority order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CategorizedSpecs {
    pub dimensions: Vec<SpecEntry>,
    pub performance: Vec<SpecEntry>,
    pub physical: Vec<SpecEntry>,
    pub technical: Vec<SpecEntry>,
}

/// Specification coverage scoring for one product.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpecificationAnalysis {
    pub spec_count: usize,
    pub categorized_specs: CategorizedSpecs,
    pub uncategorized_specs: Vec<SpecEntry>,
    /// Categories with at least one spec, out of four, as a percentage.
    pub completeness_score: f64,
    pub completeness_interpretation: String,
}

/// Image coverage scoring for one product.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageAnalysis {
    pub image_count: usize,
    pub image_types: ImageTypeCounts,
    pub has_thumbnails: bool,
    pub has_large_images: bool,
    pub image_score: ImageScore,
}

/// How many images fell into each URL-derived class.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageTypeCounts {
    pub thumbnail: usize,
    pub standard: usize,
    pub large: usize,
}

/// Image quality score out of 10.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageScore {
    pub score: f64,
    pub interpretation: String,
}

/// Currency and formatting inspection of a product's price text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceAnalysis {
    pub price_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_numeric: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub formatting: PriceFormatting,
}

/// Formatting flags observed in the raw price text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceFormatting {
    pub has_decimal: bool,
    /// Known limitation: a European decimal comma other than ",00" reads
    /// as a thousands separator.
    pub has_thousands_separator: bool,
}

/// Product template completeness against the essential-elements checklist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateAnalysis {
    pub completeness_score: f64,
    pub quality: String,
    pub missing_elements: Vec<String>,
    pub layout: String,
    pub section_count: u64,
}

/// Article structure quality against the weighted checklist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StructureAnalysis {
    pub quality_score: f64,
    pub quality: String,
    pub missing_elements: Vec<String>,
    pub heading_count: u64,
    pub section_count: u64,
}

/// Dataset-wide content quality aggregate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentQualityAnalysis {
    pub description_analysis: DescriptionQuality,
    /// Ragged averages of every numeric `content_metrics` key (excluding
    /// the `seo` sub-bag): each key is averaged over only the records that
    /// carry it.
    pub content_metrics: BTreeMap<String, f64>,
}

/// Averages over all product descriptions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DescriptionQuality {
    pub avg_length: f64,
    pub length_interpretation: String,
    pub avg_readability: f64,
    pub readability_interpretation: String,
}

/// Dataset-wide SEO flag coverage and composite score.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeoAnalysis {
    pub total_pages_analyzed: usize,
    pub meta_description: SeoElement,
    pub meta_keywords: SeoElement,
    pub h1_tags: SeoElement,
    pub h2_tags: SeoElement,
    pub alt_text: SeoElement,
    pub structured_data: SeoElement,
    pub seo_score: f64,
    /// "Unknown" when zero pages carried SEO metrics.
    pub seo_quality: String,
}

/// Coverage of a single SEO flag across all analyzed pages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeoElement {
    pub count: usize,
    pub percentage: f64,
}
