//! Analysis stage: scores the extractor's dataset.
//!
//! Consumes a [`ProcessedDataset`] and produces an [`AnalysisResult`]: one
//! score bundle per product and article, plus dataset-wide summary,
//! content-quality, and SEO aggregates.
//!
//! # Submodules
//!
//! - [`tables`]: Every fixed threshold, keyword, and checklist table
//! - [`text`]: Readability, sentiment, and key-phrase scoring
//! - [`aggregate`]: Dataset-wide summary, content quality, and SEO
//! - [`results`]: The serialized output model
//!
//! Per-record analysis never fails: each sub-analysis is included only
//! when its source field is present, and degrades to an `{"error": ...}`
//! marker when the field is present but empty.

pub mod aggregate;
pub mod results;
pub mod tables;
pub mod text;

use crate::models::{ProcessedArticle, ProcessedDataset, ProcessedProduct};
use crate::utils::iso_timestamp;
use results::{
    AnalysisMetadata, AnalysisResult, ArticleAnalysis, CategorizedSpecs, ImageAnalysis,
    ImageScore, ImageTypeCounts, PriceAnalysis, PriceFormatting, ProductAnalysis, Section,
    SpecEntry, SpecificationAnalysis, StructureAnalysis, TemplateAnalysis,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Analyze a processed dataset.
#[instrument(level = "info", skip_all, fields(
    product_count = dataset.metadata.product_count,
    article_count = dataset.metadata.article_count,
))]
pub fn analyze(dataset: &ProcessedDataset) -> AnalysisResult {
    let product_analyses: Vec<ProductAnalysis> =
        dataset.products.iter().map(analyze_product).collect();
    let article_analyses: Vec<ArticleAnalysis> =
        dataset.articles.iter().map(analyze_article).collect();

    info!(
        product_analyses = product_analyses.len(),
        article_analyses = article_analyses.len(),
        "Analysis complete"
    );

    AnalysisResult {
        metadata: AnalysisMetadata {
            analysis_timestamp: iso_timestamp(),
            product_count: dataset.metadata.product_count,
            article_count: dataset.metadata.article_count,
        },
        summary: aggregate::generate_summary(dataset),
        product_analyses,
        article_analyses,
        content_quality_analysis: aggregate::analyze_content_quality(dataset),
        seo_analysis: aggregate::analyze_seo(dataset),
    }
}

/// Score one product. Sections are composed from whichever source fields
/// the record actually carries.
fn analyze_product(product: &ProcessedProduct) -> ProductAnalysis {
    ProductAnalysis {
        product_id: product.sku.clone().unwrap_or_else(|| "unknown".to_string()),
        product_name: product
            .name
            .clone()
            .unwrap_or_else(|| "Unknown Product".to_string()),
        url: product.url.clone().unwrap_or_default(),
        analysis_timestamp: iso_timestamp(),
        description_analysis: product.description.as_deref().map(text::analyze_text),
        specification_analysis: product.specifications.as_ref().map(analyze_specifications),
        image_analysis: product.images.as_deref().map(analyze_images),
        price_analysis: (product.price.is_some() || product.price_numeric.is_some())
            .then(|| analyze_price(product)),
        template_analysis: product.template_structure.as_ref().map(analyze_template),
    }
}

/// Score one article.
fn analyze_article(article: &ProcessedArticle) -> ArticleAnalysis {
    ArticleAnalysis {
        article_title: article
            .title
            .clone()
            .unwrap_or_else(|| "Unknown Article".to_string()),
        url: article.url.clone().unwrap_or_default(),
        analysis_timestamp: iso_timestamp(),
        content_analysis: article.content.as_deref().map(text::analyze_text),
        structure_analysis: article.structure.as_ref().map(analyze_article_structure),
    }
}

/// Categorize a specification table and score its coverage.
///
/// Each spec key lands in the first category of
/// [`tables::SPEC_CATEGORIES`] holding a keyword substring of the
/// lowercased key, else in the uncategorized bucket. Completeness is the
/// share of categories with at least one spec.
fn analyze_specifications(
    specifications: &BTreeMap<String, String>,
) -> Section<SpecificationAnalysis> {
    if specifications.is_empty() {
        return Section::unavailable("No specifications provided");
    }

    let mut categorized = CategorizedSpecs::default();
    let mut uncategorized = Vec::new();

    for (key, value) in specifications {
        let key_lower = key.to_lowercase();
        let entry = SpecEntry {
            key: key.clone(),
            value: value.clone(),
        };

        let category = tables::SPEC_CATEGORIES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| key_lower.contains(kw)))
            .map(|(name, _)| *name);

        match category {
            Some("dimensions") => categorized.dimensions.push(entry),
            Some("performance") => categorized.performance.push(entry),
            Some("physical") => categorized.physical.push(entry),
            Some("technical") => categorized.technical.push(entry),
            _ => uncategorized.push(entry),
        }
    }

    let buckets = [
        &categorized.dimensions,
        &categorized.performance,
        &categorized.physical,
        &categorized.technical,
    ];
    let matched = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
    let completeness_score = matched as f64 / tables::SPEC_CATEGORIES.len() as f64 * 100.0;

    Section::Ready(SpecificationAnalysis {
        spec_count: specifications.len(),
        categorized_specs: categorized,
        uncategorized_specs: uncategorized,
        completeness_score,
        completeness_interpretation: tables::band(
            completeness_score,
            tables::COMPLETENESS_BANDS,
            tables::COMPLETENESS_FALLBACK,
        )
        .to_string(),
    })
}

/// Classify image URLs and score coverage out of 10.
///
/// Thumbnail markers are checked before large markers, so a URL matching
/// both classes reads as a thumbnail.
fn analyze_images(images: &[String]) -> Section<ImageAnalysis> {
    if images.is_empty() {
        return Section::unavailable("No images provided");
    }

    let mut counts = ImageTypeCounts {
        thumbnail: 0,
        standard: 0,
        large: 0,
    };
    for url in images {
        let url_lower = url.to_lowercase();
        if tables::THUMBNAIL_MARKERS.iter().any(|m| url_lower.contains(m)) {
            counts.thumbnail += 1;
        } else if tables::LARGE_IMAGE_MARKERS.iter().any(|m| url_lower.contains(m)) {
            counts.large += 1;
        } else {
            counts.standard += 1;
        }
    }

    let has_thumbnails = counts.thumbnail > 0;
    let has_large_images = counts.large > 0;
    let score = image_score(images.len(), has_thumbnails, has_large_images);

    Section::Ready(ImageAnalysis {
        image_count: images.len(),
        image_types: counts,
        has_thumbnails,
        has_large_images,
        image_score: ImageScore {
            score,
            interpretation: tables::band(
                score,
                tables::IMAGE_SCORE_BANDS,
                tables::IMAGE_SCORE_FALLBACK,
            )
            .to_string(),
        },
    })
}

/// Base points by image count plus variety bonus, capped at 10.
fn image_score(count: usize, has_thumbnails: bool, has_large_images: bool) -> f64 {
    let base = match count {
        c if c >= 5 => 5,
        c if c >= 3 => 4,
        c if c >= 2 => 3,
        1 => 2,
        _ => 0,
    };
    let mut bonus = 0;
    if has_thumbnails {
        bonus += 1;
    }
    if has_large_images {
        bonus += 2;
    }
    (base + bonus).min(10) as f64
}

/// Inspect a product's price text for currency and formatting.
fn analyze_price(product: &ProcessedProduct) -> Section<PriceAnalysis> {
    let price_text = product.price.clone().unwrap_or_default();
    if price_text.is_empty() && product.price_numeric.is_none() {
        return Section::unavailable("No price information provided");
    }

    let currency = tables::CURRENCY_SYMBOLS
        .iter()
        .find(|(symbol, _)| price_text.contains(symbol))
        .map(|(_, code)| (*code).to_string());

    Section::Ready(PriceAnalysis {
        formatting: PriceFormatting {
            has_decimal: price_text.contains('.'),
            // The ",00" suffix is the one European decimal-comma case this
            // heuristic recognizes; other decimal commas read as thousands
            // separators.
            has_thousands_separator: price_text.contains(',') && !price_text.ends_with(",00"),
        },
        price_text,
        price_numeric: product.price_numeric,
        currency,
    })
}

/// Score a product page template against the essential-elements checklist.
fn analyze_template(template_structure: &Map<String, Value>) -> Section<TemplateAnalysis> {
    if template_structure.is_empty() {
        return Section::unavailable("No template structure provided");
    }

    let present = tables::PRODUCT_TEMPLATE_ELEMENTS
        .iter()
        .filter(|element| flag(template_structure, element))
        .count();
    let completeness_score =
        present as f64 / tables::PRODUCT_TEMPLATE_ELEMENTS.len() as f64 * 100.0;

    Section::Ready(TemplateAnalysis {
        completeness_score,
        quality: tables::band(completeness_score, tables::QUALITY_BANDS, tables::QUALITY_FALLBACK)
            .to_string(),
        missing_elements: tables::PRODUCT_TEMPLATE_ELEMENTS
            .iter()
            .filter(|element| !flag(template_structure, element))
            .map(|element| element.to_string())
            .collect(),
        layout: template_structure
            .get("layout")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        section_count: template_structure
            .get("section_count")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    })
}

/// Score an article's structure against the weighted checklist.
fn analyze_article_structure(structure: &Map<String, Value>) -> Section<StructureAnalysis> {
    if structure.is_empty() {
        return Section::unavailable("No article structure provided");
    }

    let quality_score: f64 = tables::ARTICLE_STRUCTURE_WEIGHTS
        .iter()
        .filter(|(factor, _)| flag(structure, factor))
        .map(|(_, weight)| weight)
        .sum();

    Section::Ready(StructureAnalysis {
        quality_score,
        quality: tables::band(quality_score, tables::QUALITY_BANDS, tables::QUALITY_FALLBACK)
            .to_string(),
        missing_elements: tables::ARTICLE_STRUCTURE_WEIGHTS
            .iter()
            .filter(|(factor, _)| !flag(structure, factor))
            .map(|(factor, _)| factor.to_string())
            .collect(),
        heading_count: structure
            .get("heading_count")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        section_count: structure
            .get("section_count")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    })
}

fn flag(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor;
    use crate::models::RawPageRecord;

    fn dataset(raw_json: &str) -> ProcessedDataset {
        let raw: Vec<RawPageRecord> = serde_json::from_str(raw_json).unwrap();
        extractor::process(raw)
    }

    fn images(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_image_classification_first_rule_wins() {
        let section = analyze_images(&images(&[
            "https://cdn.example.com/p/thumb_large_1.jpg",
            "https://cdn.example.com/p/zoom_1.jpg",
            "https://cdn.example.com/p/1.jpg",
        ]));
        let analysis = section.value().unwrap();
        // "thumb" beats "large" in the same URL.
        assert_eq!(analysis.image_types.thumbnail, 1);
        assert_eq!(analysis.image_types.large, 1);
        assert_eq!(analysis.image_types.standard, 1);
    }

    #[test]
    fn test_image_score_monotonic_and_capped() {
        let mut previous = 0.0;
        for count in 0..8 {
            let score = image_score(count, false, false);
            assert!(score >= previous);
            previous = score;
        }
        // Full bonus on a full gallery still caps at 10.
        assert_eq!(image_score(50, true, true), 8.0);
        assert!(image_score(5, true, true) <= 10.0);
    }

    #[test]
    fn test_image_score_bonus() {
        assert_eq!(image_score(1, false, false), 2.0);
        assert_eq!(image_score(1, true, false), 3.0);
        assert_eq!(image_score(1, false, true), 4.0);
        assert_eq!(image_score(5, true, true), 8.0);
    }

    #[test]
    fn test_empty_images_degrade_to_error_marker() {
        assert_eq!(
            analyze_images(&[]),
            Section::unavailable("No images provided")
        );
    }

    #[test]
    fn test_specification_categorization_first_category_wins() {
        let data = dataset(
            r#"[{
                "page_type": "product",
                "specifications": {
                    "Length": "10 cm",
                    "Power output": "20 W",
                    "Material": "steel",
                    "Voltage": "230 V",
                    "Warranty": "2 years"
                }
            }]"#,
        );
        let analysis = analyze_product(&data.products[0]);
        let section = analysis.specification_analysis.unwrap();
        let specs = section.value().unwrap();
        assert_eq!(specs.spec_count, 5);
        assert_eq!(specs.categorized_specs.dimensions.len(), 1);
        // "Power output" hits performance before any later category.
        assert_eq!(specs.categorized_specs.performance.len(), 1);
        assert_eq!(specs.categorized_specs.physical.len(), 1);
        assert_eq!(specs.categorized_specs.technical.len(), 1);
        assert_eq!(specs.uncategorized_specs.len(), 1);
        assert_eq!(specs.uncategorized_specs[0].key, "Warranty");
        assert_eq!(specs.completeness_score, 100.0);
        assert!(specs.completeness_interpretation.starts_with("Excellent"));
    }

    #[test]
    fn test_specification_completeness_partial() {
        let data = dataset(
            r#"[{"page_type": "product", "specifications": {"Width": "5 cm"}}]"#,
        );
        let analysis = analyze_product(&data.products[0]);
        let section = analysis.specification_analysis.unwrap();
        let specs = section.value().unwrap();
        assert_eq!(specs.completeness_score, 25.0);
        assert!(specs.completeness_interpretation.starts_with("Below Average"));
    }

    #[test]
    fn test_price_analysis_currency_and_formatting() {
        let data = dataset(r#"[{"page_type": "product", "price": "$1,234.56"}]"#);
        let analysis = analyze_product(&data.products[0]);
        let section = analysis.price_analysis.unwrap();
        let price = section.value().unwrap();
        assert_eq!(price.currency.as_deref(), Some("USD"));
        assert_eq!(price.price_numeric, Some(1234.56));
        assert!(price.formatting.has_decimal);
        assert!(price.formatting.has_thousands_separator);
    }

    #[test]
    fn test_price_analysis_euro_decimal_comma_suffix() {
        let data = dataset(r#"[{"page_type": "product", "price": "€1.299,00"}]"#);
        let analysis = analyze_product(&data.products[0]);
        let section = analysis.price_analysis.unwrap();
        let price = section.value().unwrap();
        assert_eq!(price.currency.as_deref(), Some("EUR"));
        // The ",00" suffix is recognized as a decimal comma, not a
        // thousands separator.
        assert!(!price.formatting.has_thousands_separator);
    }

    #[test]
    fn test_template_analysis_scoring() {
        let data = dataset(
            r#"[{
                "page_type": "product",
                "template_structure": {
                    "has_product_name": true,
                    "has_price": true,
                    "has_product_image": true,
                    "has_description": false,
                    "has_specifications": false,
                    "has_add_to_cart": false,
                    "layout": "two-column",
                    "section_count": 4
                }
            }]"#,
        );
        let analysis = analyze_product(&data.products[0]);
        let section = analysis.template_analysis.unwrap();
        let template = section.value().unwrap();
        assert_eq!(template.completeness_score, 50.0);
        assert_eq!(template.quality, "Average");
        assert_eq!(
            template.missing_elements,
            vec!["has_description", "has_specifications", "has_add_to_cart"]
        );
        assert_eq!(template.layout, "two-column");
        assert_eq!(template.section_count, 4);
    }

    #[test]
    fn test_article_structure_weighted_scoring() {
        let data = dataset(
            r#"[{
                "page_type": "article",
                "title": "Guide",
                "structure": {
                    "has_introduction": true,
                    "has_conclusion": true,
                    "has_images": true,
                    "has_links": true,
                    "heading_count": 6
                }
            }]"#,
        );
        let analysis = analyze_article(&data.articles[0]);
        let section = analysis.structure_analysis.unwrap();
        let structure = section.value().unwrap();
        // 20 + 20 + 15 + 10.
        assert_eq!(structure.quality_score, 65.0);
        assert_eq!(structure.quality, "Average");
        assert_eq!(structure.heading_count, 6);
        assert!(structure
            .missing_elements
            .contains(&"has_call_to_action".to_string()));
    }

    #[test]
    fn test_analyze_product_omits_sections_for_absent_fields() {
        let data = dataset(r#"[{"page_type": "product", "name": "Bare"}]"#);
        let analysis = analyze_product(&data.products[0]);
        assert!(analysis.description_analysis.is_none());
        assert!(analysis.specification_analysis.is_none());
        assert!(analysis.image_analysis.is_none());
        assert!(analysis.price_analysis.is_none());
        assert!(analysis.template_analysis.is_none());
        assert_eq!(analysis.product_id, "unknown");
        assert_eq!(analysis.product_name, "Bare");
    }

    #[test]
    fn test_analyze_empty_dataset_round_trip() {
        let data = dataset("[]");
        let result = analyze(&data);
        assert_eq!(result.metadata.product_count, 0);
        assert_eq!(result.metadata.article_count, 0);
        assert!(result.product_analyses.is_empty());
        assert!(result.article_analyses.is_empty());
        assert!(result.summary.price_statistics.is_none());
        assert!(result.summary.top_categories.is_empty());
        assert_eq!(result.seo_analysis.seo_quality, "Unknown");

        // The result must still serialize cleanly.
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("content_quality_analysis"));
    }

    #[test]
    fn test_widget_end_to_end() {
        let data = dataset(
            r#"[{
                "page_type": "product",
                "name": "<b>Widget</b>",
                "price": "$19.99",
                "specifications": {"Weight (kg)": "2.5 kg"}
            }]"#,
        );
        assert_eq!(data.products[0].name.as_deref(), Some("Widget"));
        assert_eq!(data.products[0].price_numeric, Some(19.99));

        let result = analyze(&data);
        let product = &result.product_analyses[0];
        let price = product.price_analysis.as_ref().unwrap().value().unwrap();
        assert_eq!(price.currency.as_deref(), Some("USD"));
        assert!(price.formatting.has_decimal);
    }
}
