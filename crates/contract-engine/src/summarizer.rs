//! Extractive document summary
//!
//! Sentences are scored by mean TF-IDF over their content words, with a
//! positional boost for the opening and closing sentences. The best
//! `count` sentences are returned in document order.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::segmenter::split_sentences;

pub const EMPTY_SUMMARY: &str = "No text available for summarization.";

/// Sentences this short (in chars) are headings or numbering, not content
const MIN_SENTENCE_CHARS: usize = 11;

const FIRST_SENTENCE_BOOST: f64 = 1.5;
const LAST_SENTENCE_BOOST: f64 = 1.2;
const OPENING_SENTENCE_BOOST: f64 = 1.1;
const OPENING_SENTENCES: usize = 3;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b[a-zA-Z\x{0900}-\x{097F}]{2,}\b").unwrap();
}

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can", "to",
    "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through", "during",
    "before", "after", "above", "below", "between", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "both", "each", "few", "more", "most",
    "other", "some", "such", "no", "nor", "not", "only", "same", "so", "than", "too", "very",
    "and", "but", "or", "if", "this", "that", "these", "those", "it", "its", "he", "she", "they",
    "them", "his", "her", "their", "what", "which", "who", "whom",
];

pub fn summarize(text: &str, count: usize) -> String {
    if text.trim().is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let sentences: Vec<&str> = split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .collect();

    if sentences.len() <= count {
        return text.trim().to_string();
    }

    let scores = score_sentences(&sentences);
    let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
    // Stable, so equal scores keep document order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected: Vec<usize> = ranked.iter().take(count).map(|(i, _)| *i).collect();
    selected.sort_unstable();

    let summary = selected
        .iter()
        .map(|&i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ");

    info!(
        selected = selected.len(),
        sentences = sentences.len(),
        "Summary generated"
    );
    summary
}

fn score_sentences(sentences: &[&str]) -> Vec<f64> {
    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();
    let total = sentences.len();

    let mut df: HashMap<&str, usize> = HashMap::new();
    for words in &tokenized {
        let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
        for word in unique {
            *df.entry(word).or_insert(0) += 1;
        }
    }

    tokenized
        .iter()
        .enumerate()
        .map(|(index, words)| {
            if words.is_empty() {
                return 0.0;
            }

            let len = words.len() as f64;
            let mut tf: HashMap<&str, usize> = HashMap::new();
            for word in words {
                *tf.entry(word.as_str()).or_insert(0) += 1;
            }

            // Repeated words contribute once per occurrence
            let mut score = 0.0;
            for word in words {
                let term_freq = tf[word.as_str()] as f64 / len;
                let idf = (total as f64 / (df[word.as_str()] + 1) as f64).ln() + 1.0;
                score += term_freq * idf;
            }
            score /= len;

            if index == 0 {
                score * FIRST_SENTENCE_BOOST
            } else if index == total - 1 {
                score * LAST_SENTENCE_BOOST
            } else if index < OPENING_SENTENCES {
                score * OPENING_SENTENCE_BOOST
            } else {
                score
            }
        })
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
