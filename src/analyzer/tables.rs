//! Fixed rule tables for the analyzer.
//!
//! Every threshold, keyword list, and checklist used by the scoring code
//! lives here as an ordered slice. Order is load-bearing: classification is
//! always "first matching entry wins", so these must never be turned into
//! unordered maps.

/// Look up the band label for a score, inclusive thresholds.
///
/// Bands are `(minimum, label)` pairs in descending threshold order;
/// `fallback` covers everything below the last threshold.
pub fn band(score: f64, bands: &[(f64, &'static str)], fallback: &'static str) -> &'static str {
    bands
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}

/// Look up the band label for a score, exclusive thresholds.
pub fn band_exclusive(
    score: f64,
    bands: &[(f64, &'static str)],
    fallback: &'static str,
) -> &'static str {
    bands
        .iter()
        .find(|(min, _)| score > *min)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}

/// Flesch reading-ease interpretation bands.
pub const READABILITY_BANDS: &[(f64, &str)] = &[
    (90.0, "Very Easy - 5th grade level"),
    (80.0, "Easy - 6th grade level"),
    (70.0, "Fairly Easy - 7th grade level"),
    (60.0, "Standard - 8th-9th grade level"),
    (50.0, "Fairly Difficult - 10th-12th grade level"),
    (30.0, "Difficult - College level"),
];
pub const READABILITY_FALLBACK: &str = "Very Difficult - College graduate level";

/// Sentiment interpretation bands (exclusive thresholds).
pub const SENTIMENT_BANDS: &[(f64, &str)] = &[
    (5.0, "Very Positive"),
    (2.0, "Positive"),
    (-2.0, "Neutral"),
    (-5.0, "Negative"),
];
pub const SENTIMENT_FALLBACK: &str = "Very Negative";

/// Shared five-point quality scale used by template, structure, and SEO
/// scoring.
pub const QUALITY_BANDS: &[(f64, &str)] = &[
    (90.0, "Excellent"),
    (75.0, "Good"),
    (50.0, "Average"),
    (25.0, "Below Average"),
];
pub const QUALITY_FALLBACK: &str = "Poor";

/// Specification completeness interpretation.
pub const COMPLETENESS_BANDS: &[(f64, &str)] = &[
    (90.0, "Excellent - Very comprehensive specifications"),
    (75.0, "Good - Comprehensive specifications"),
    (50.0, "Average - Adequate specifications"),
    (25.0, "Below Average - Limited specifications"),
];
pub const COMPLETENESS_FALLBACK: &str = "Poor - Very limited specifications";

/// Image score interpretation (score is out of 10).
pub const IMAGE_SCORE_BANDS: &[(f64, &str)] = &[
    (8.0, "Excellent - Multiple high-quality images"),
    (6.0, "Good - Sufficient images with some variety"),
    (4.0, "Average - Basic image coverage"),
    (2.0, "Below Average - Limited images"),
];
pub const IMAGE_SCORE_FALLBACK: &str = "Poor - Inadequate images";

/// Average description length interpretation (length in words).
pub const DESCRIPTION_LENGTH_BANDS: &[(f64, &str)] = &[
    (300.0, "Excellent - Comprehensive descriptions"),
    (200.0, "Good - Detailed descriptions"),
    (100.0, "Average - Adequate descriptions"),
    (50.0, "Below Average - Brief descriptions"),
];
pub const DESCRIPTION_LENGTH_FALLBACK: &str = "Poor - Very limited descriptions";

/// Specification categories and their key keywords, in match-priority
/// order. A specification belongs to the first category whose keyword is a
/// substring of its lowercased key.
pub const SPEC_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "dimensions",
        &["length", "width", "height", "diameter", "size", "dimensions"],
    ),
    (
        "performance",
        &["power", "speed", "capacity", "efficiency", "output", "performance"],
    ),
    ("physical", &["weight", "material", "color", "finish"]),
    (
        "technical",
        &["voltage", "current", "frequency", "resistance", "temperature"],
    ),
];

/// Positive sentiment seed lexicon.
pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "best",
    "superior",
    "quality",
    "reliable",
    "durable",
    "innovative",
];

/// Negative sentiment seed lexicon.
pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "worst",
    "inferior",
    "cheap",
    "unreliable",
    "break",
    "problem",
    "issue",
];

/// Essential product page template elements, equally weighted.
pub const PRODUCT_TEMPLATE_ELEMENTS: &[&str] = &[
    "has_product_name",
    "has_price",
    "has_product_image",
    "has_description",
    "has_specifications",
    "has_add_to_cart",
];

/// Article structure checklist with per-element weights summing to 100.
pub const ARTICLE_STRUCTURE_WEIGHTS: &[(&str, f64)] = &[
    ("has_introduction", 20.0),
    ("has_conclusion", 20.0),
    ("has_images", 15.0),
    ("has_lists", 10.0),
    ("has_tables", 10.0),
    ("has_links", 10.0),
    ("has_call_to_action", 15.0),
];

/// Currency symbols in detection-priority order.
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
    ("¥", "JPY"),
];

/// Image URL markers for thumbnail classification; checked before
/// [`LARGE_IMAGE_MARKERS`].
pub const THUMBNAIL_MARKERS: &[&str] = &["thumbnail", "thumb", "small"];

/// Image URL markers for large-variant classification.
pub const LARGE_IMAGE_MARKERS: &[&str] = &["large", "zoom", "big"];

/// SEO flags read from the `content_metrics.seo` sub-bag, with the weight
/// each contributes to the composite score. Weights sum to 1.0.
pub const SEO_WEIGHTS: &[(&str, f64)] = &[
    ("has_meta_description", 0.25),
    ("has_h1", 0.25),
    ("has_alt_text", 0.20),
    ("has_h2", 0.10),
    ("has_meta_keywords", 0.10),
    ("has_structured_data", 0.10),
];

/// Stopwords used to chunk sentences into candidate key phrases. A short
/// function-word list; anything between two stopwords is a candidate noun
/// phrase.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "of", "in", "on", "at", "to", "for",
    "from", "with", "without", "by", "as", "is", "are", "was", "were", "be", "been", "being", "it",
    "its", "this", "that", "these", "those", "their", "there", "they", "them", "we", "our", "you",
    "your", "he", "she", "his", "her", "i", "my", "me", "not", "no", "can", "will", "would",
    "should", "could", "has", "have", "had", "do", "does", "did", "if", "than", "then", "when",
    "while", "which", "who", "whom", "what", "where", "why", "how", "all", "each", "more", "most",
    "other", "some", "such", "only", "own", "same", "also", "into", "over", "under", "up", "down",
    "out", "about",
];
