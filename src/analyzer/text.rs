//! Per-text analysis: readability, sentiment, and key phrases.
//!
//! Works on the cleaned text produced by the extractor, so no markup
//! handling happens here. Readability uses the Flesch formulas with a
//! vowel-group syllable heuristic; sentiment is a token scan against two
//! fixed seed lexicons; key phrases are the multi-word chunks left between
//! stopwords, frequency-ranked.

use super::results::{Readability, Section, Sentiment, TextAnalysis};
use super::tables::{
    band, band_exclusive, NEGATIVE_WORDS, POSITIVE_WORDS, READABILITY_BANDS,
    READABILITY_FALLBACK, SENTIMENT_BANDS, SENTIMENT_FALLBACK, STOPWORDS,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Sentence terminators; runs of them end one sentence.
static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Analyze one cleaned text field.
///
/// Empty text degrades to an error marker instead of zeroed metrics, so
/// downstream consumers can tell "no text" apart from "trivial text".
pub fn analyze_text(text: &str) -> Section<TextAnalysis> {
    if text.is_empty() {
        return Section::unavailable("No text provided");
    }

    let word_count = text.split_whitespace().count();
    let sentence_count = count_sentences(text);
    let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

    let flesch_reading_ease = reading_ease(text);
    let flesch_kincaid_grade = kincaid_grade(text);

    let (positive_word_count, negative_word_count) = sentiment_counts(text);
    let score =
        (positive_word_count as f64 - negative_word_count as f64) / word_count.max(1) as f64
            * 100.0;

    Section::Ready(TextAnalysis {
        word_count,
        sentence_count,
        avg_sentence_length,
        readability: Readability {
            flesch_reading_ease,
            flesch_kincaid_grade,
            interpretation: band(flesch_reading_ease, READABILITY_BANDS, READABILITY_FALLBACK)
                .to_string(),
        },
        sentiment: Sentiment {
            score,
            positive_word_count,
            negative_word_count,
            interpretation: band_exclusive(score, SENTIMENT_BANDS, SENTIMENT_FALLBACK)
                .to_string(),
        },
        key_phrases: key_phrases(text),
    })
}

/// Flesch reading-ease score for a cleaned text.
///
/// Also used by the content-quality aggregate, which averages it across
/// all product descriptions.
pub fn reading_ease(text: &str) -> f64 {
    let (words, sentences, syllables) = text_counts(text);
    206.835
        - 1.015 * (words as f64 / sentences.max(1) as f64)
        - 84.6 * (syllables as f64 / words.max(1) as f64)
}

/// Flesch-Kincaid grade level for a cleaned text.
pub fn kincaid_grade(text: &str) -> f64 {
    let (words, sentences, syllables) = text_counts(text);
    0.39 * (words as f64 / sentences.max(1) as f64)
        + 11.8 * (syllables as f64 / words.max(1) as f64)
        - 15.59
}

fn text_counts(text: &str) -> (usize, usize, usize) {
    let words: Vec<&str> = text.split_whitespace().collect();
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    (words.len(), count_sentences(text), syllables)
}

/// Count sentences by splitting on terminator runs and keeping only
/// segments with actual content.
fn count_sentences(text: &str) -> usize {
    SENTENCE_SPLIT_RE
        .split(text)
        .filter(|segment| segment.chars().any(char::is_alphanumeric))
        .count()
}

/// Vowel-group syllable heuristic: each maximal run of vowels is one
/// syllable, a trailing silent "e" is dropped, and every word has at
/// least one syllable.
fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_lowercase();
    if letters.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut previous_was_vowel = false;
    for c in letters.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if letters.ends_with('e') && !letters.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Count tokens hitting the positive and negative seed lexicons.
fn sentiment_counts(text: &str) -> (usize, usize) {
    let mut positive = 0;
    let mut negative = 0;
    for token in text.split_whitespace() {
        let normalized = normalize_token(token);
        if POSITIVE_WORDS.contains(&normalized.as_str()) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&normalized.as_str()) {
            negative += 1;
        }
    }
    (positive, negative)
}

/// Extract the top multi-word key phrases from a text.
///
/// Each sentence is chunked at stopwords and punctuation-only tokens;
/// chunks of two or more words survive as candidate phrases. Phrases are
/// lowercased, frequency-counted, and the top five are returned with ties
/// broken by first appearance (the sort must stay stable).
pub fn key_phrases(text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sentence in SENTENCE_SPLIT_RE.split(text) {
        let mut chunk: Vec<String> = Vec::new();
        for token in sentence.split_whitespace() {
            let normalized = normalize_token(token);
            if normalized.is_empty() || STOPWORDS.contains(&normalized.as_str()) {
                flush_chunk(&mut chunk, &mut counts, &mut index);
            } else {
                chunk.push(normalized);
            }
        }
        flush_chunk(&mut chunk, &mut counts, &mut index);
    }

    let mut ranked = counts;
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(5).map(|(phrase, _)| phrase).collect()
}

fn flush_chunk(
    chunk: &mut Vec<String>,
    counts: &mut Vec<(String, usize)>,
    index: &mut HashMap<String, usize>,
) {
    if chunk.len() >= 2 {
        let phrase = chunk.join(" ");
        match index.get(&phrase) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(phrase.clone(), counts.len());
                counts.push((phrase, 1));
            }
        }
    }
    chunk.clear();
}

/// Lowercase a token and trim non-alphanumeric edges. Tokens with no
/// alphanumeric content normalize to the empty string.
fn normalize_token(token: &str) -> String {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.chars().any(char::is_alphanumeric) {
        trimmed.to_lowercase()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_text_empty_is_error_marker() {
        assert_eq!(analyze_text(""), Section::unavailable("No text provided"));
    }

    #[test]
    fn test_word_and_sentence_counts() {
        let section = analyze_text("This pump is reliable. It moves water fast!");
        let analysis = section.value().unwrap();
        assert_eq!(analysis.word_count, 8);
        assert_eq!(analysis.sentence_count, 2);
        assert_eq!(analysis.avg_sentence_length, 4.0);
    }

    #[test]
    fn test_sentence_count_without_terminator() {
        let section = analyze_text("no terminator here");
        assert_eq!(section.value().unwrap().sentence_count, 1);
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("quality"), 3);
        // Trailing silent e drops, "-le" endings keep theirs.
        assert_eq!(count_syllables("plate"), 1);
        assert_eq!(count_syllables("table"), 2);
        // Every word carries at least one syllable.
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_readability_orders_simple_before_complex() {
        let simple = "The cat sat. The dog ran. It was fun.";
        let complex = "Notwithstanding considerable organizational transformation, \
                       interdepartmental communication methodologies remained \
                       fundamentally unsatisfactory throughout implementation.";
        assert!(reading_ease(simple) > reading_ease(complex));
        assert!(kincaid_grade(simple) < kincaid_grade(complex));
    }

    #[test]
    fn test_sentiment_counts_and_score() {
        let section = analyze_text("good good great bad");
        let analysis = section.value().unwrap();
        assert_eq!(analysis.sentiment.positive_word_count, 3);
        assert_eq!(analysis.sentiment.negative_word_count, 1);
        assert_eq!(analysis.sentiment.score, 50.0);
        assert_eq!(analysis.sentiment.interpretation, "Very Positive");
    }

    #[test]
    fn test_sentiment_symmetric_in_sign() {
        // Swapping positive hits for negative hits negates the score.
        let positive = analyze_text("a durable reliable innovative pump design");
        let negative = analyze_text("a unreliable inferior cheap pump design");
        let p = positive.value().unwrap().sentiment.score;
        let n = negative.value().unwrap().sentiment.score;
        assert!(p > 0.0);
        assert_eq!(p, -n);
    }

    #[test]
    fn test_sentiment_ignores_case_and_punctuation() {
        let section = analyze_text("Excellent! Truly excellent.");
        assert_eq!(section.value().unwrap().sentiment.positive_word_count, 2);
    }

    #[test]
    fn test_key_phrases_multi_word_only() {
        let phrases = key_phrases("The stainless steel housing protects the stainless steel pump.");
        assert_eq!(
            phrases,
            vec![
                "stainless steel housing protects".to_string(),
                "stainless steel pump".to_string(),
            ]
        );
        assert!(phrases.iter().all(|p| p.split(' ').count() >= 2));
    }

    #[test]
    fn test_key_phrases_ranked_by_frequency_with_stable_ties() {
        let text = "The pipe plug is sturdy. The pipe plug is reusable. \
                    A test plug is lighter. The inflatable bladder is optional.";
        let phrases = key_phrases(text);
        assert_eq!(phrases[0], "pipe plug");
        // Single-count ties keep first-seen order.
        assert_eq!(phrases[1], "test plug");
        assert_eq!(phrases[2], "inflatable bladder");
    }

    #[test]
    fn test_key_phrases_capped_at_five() {
        let text = "alpha one runs. beta two runs. gamma three runs. delta four runs. \
                    epsilon five runs. zeta six runs.";
        assert_eq!(key_phrases(text).len(), 5);
    }
}
