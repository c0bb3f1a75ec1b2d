//! Dataset-wide aggregates: summary statistics, content quality, and SEO
//! coverage.
//!
//! Every aggregate degrades to zeros or an absent section on an empty
//! dataset; none of these functions can fail.

use super::results::{
    CategoryCount, ContentQualityAnalysis, ContentStatistics, DescriptionQuality, PriceStatistics,
    SeoAnalysis, SeoElement, Summary,
};
use super::tables::{
    band, DESCRIPTION_LENGTH_BANDS, DESCRIPTION_LENGTH_FALLBACK, QUALITY_BANDS, QUALITY_FALLBACK,
    READABILITY_BANDS, READABILITY_FALLBACK, SEO_WEIGHTS,
};
use super::text;
use crate::models::ProcessedDataset;
use itertools::Itertools;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Build the dataset summary: price statistics, average content lengths,
/// and the most frequent product categories.
pub fn generate_summary(dataset: &ProcessedDataset) -> Summary {
    Summary {
        price_statistics: price_statistics(dataset),
        content_statistics: content_statistics(dataset),
        top_categories: top_categories(dataset),
    }
}

fn price_statistics(dataset: &ProcessedDataset) -> Option<PriceStatistics> {
    let mut prices: Vec<f64> = dataset
        .products
        .iter()
        .filter_map(|p| p.price_numeric)
        .collect();
    if prices.is_empty() {
        return None;
    }
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(PriceStatistics {
        min_price: prices[0],
        max_price: *prices.last().unwrap(),
        avg_price: prices.iter().sum::<f64>() / prices.len() as f64,
        median_price: prices[prices.len() / 2],
        price_count: prices.len(),
    })
}

fn content_statistics(dataset: &ProcessedDataset) -> ContentStatistics {
    let description_lengths: Vec<usize> = dataset
        .products
        .iter()
        .filter_map(|p| p.description.as_ref())
        .map(|d| d.split_whitespace().count())
        .collect();
    let article_lengths: Vec<usize> = dataset
        .articles
        .iter()
        .filter_map(|a| a.word_count)
        .collect();

    ContentStatistics {
        avg_product_description_length: average(&description_lengths),
        avg_article_length: average(&article_lengths),
    }
}

fn average(values: &[usize]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<usize>() as f64 / values.len() as f64)
}

/// Top ten categories by product frequency, ties in first-seen order.
fn top_categories(dataset: &ProcessedDataset) -> Vec<CategoryCount> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for product in &dataset.products {
        let Some(categories) = &product.categories else {
            continue;
        };
        for category in categories {
            match index.get(category) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(category.clone(), counts.len());
                    counts.push((category.clone(), 1));
                }
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(10)
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

/// Average description length and readability over all products with a
/// description, plus ragged averages of the upstream content metrics.
///
/// The averages use a `max(1, n)` denominator so an empty dataset yields
/// zeroed figures rather than failing.
pub fn analyze_content_quality(dataset: &ProcessedDataset) -> ContentQualityAnalysis {
    let mut lengths: Vec<f64> = Vec::new();
    let mut readability_scores: Vec<f64> = Vec::new();
    for product in &dataset.products {
        if let Some(description) = &product.description {
            lengths.push(description.split_whitespace().count() as f64);
            readability_scores.push(text::reading_ease(description));
        }
    }

    let avg_length = lengths.iter().sum::<f64>() / lengths.len().max(1) as f64;
    let avg_readability =
        readability_scores.iter().sum::<f64>() / readability_scores.len().max(1) as f64;

    ContentQualityAnalysis {
        description_analysis: DescriptionQuality {
            avg_length,
            length_interpretation: band(
                avg_length,
                DESCRIPTION_LENGTH_BANDS,
                DESCRIPTION_LENGTH_FALLBACK,
            )
            .to_string(),
            avg_readability,
            readability_interpretation: band(
                avg_readability,
                READABILITY_BANDS,
                READABILITY_FALLBACK,
            )
            .to_string(),
        },
        content_metrics: average_content_metrics(dataset),
    }
}

/// Ragged average of every numeric key found in any record's
/// `content_metrics` bag. Records missing a key (or holding a non-numeric
/// value for it) are excluded from that key's denominator only; the `seo`
/// sub-bag is skipped.
fn average_content_metrics(dataset: &ProcessedDataset) -> BTreeMap<String, f64> {
    let bags: Vec<&Map<String, Value>> = dataset
        .products
        .iter()
        .filter_map(|p| p.content_metrics.as_ref())
        .chain(dataset.articles.iter().filter_map(|a| a.content_metrics.as_ref()))
        .collect();

    let mut averages = BTreeMap::new();
    for key in bags.iter().flat_map(|bag| bag.keys()).unique() {
        if key.as_str() == "seo" {
            continue;
        }
        let values: Vec<f64> = bags
            .iter()
            .filter_map(|bag| bag.get(key).and_then(Value::as_f64))
            .collect();
        if !values.is_empty() {
            averages.insert(
                key.clone(),
                values.iter().sum::<f64>() / values.len() as f64,
            );
        }
    }
    averages
}

/// SEO flag coverage across every page carrying a `content_metrics.seo`
/// sub-bag, with the weighted composite score.
pub fn analyze_seo(dataset: &ProcessedDataset) -> SeoAnalysis {
    let seo_bags: Vec<&Map<String, Value>> = dataset
        .products
        .iter()
        .filter_map(|p| p.content_metrics.as_ref())
        .chain(dataset.articles.iter().filter_map(|a| a.content_metrics.as_ref()))
        .filter_map(|bag| bag.get("seo").and_then(Value::as_object))
        .collect();
    let total_pages = seo_bags.len();

    let count_flag = |key: &str| -> usize {
        seo_bags
            .iter()
            .filter(|bag| bag.get(key).and_then(Value::as_bool).unwrap_or(false))
            .count()
    };
    let counts: HashMap<&str, usize> = SEO_WEIGHTS
        .iter()
        .map(|(key, _)| (*key, count_flag(key)))
        .collect();

    let percentage = |key: &str| -> f64 {
        if total_pages == 0 {
            0.0
        } else {
            counts[key] as f64 / total_pages as f64 * 100.0
        }
    };
    let element = |key: &str| SeoElement {
        count: counts[key],
        percentage: percentage(key),
    };

    let seo_score: f64 = SEO_WEIGHTS
        .iter()
        .map(|(key, weight)| percentage(key) * weight)
        .sum();
    let seo_quality = if total_pages == 0 {
        "Unknown".to_string()
    } else {
        band(seo_score, QUALITY_BANDS, QUALITY_FALLBACK).to_string()
    };

    SeoAnalysis {
        total_pages_analyzed: total_pages,
        meta_description: element("has_meta_description"),
        meta_keywords: element("has_meta_keywords"),
        h1_tags: element("has_h1"),
        h2_tags: element("has_h2"),
        alt_text: element("has_alt_text"),
        structured_data: element("has_structured_data"),
        seo_score,
        seo_quality,
    }
}
