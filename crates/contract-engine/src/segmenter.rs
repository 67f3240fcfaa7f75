//! Clause segmentation
//!
//! Legal numbering ("1.", "1.2.3", "(a)", "Section 4", "IV.", "धारा 5") marks
//! clause starts. Documents without usable numbering are split into sentences
//! which are grouped into clause-sized chunks. Short fragments are folded into
//! the following clause and ids are reassigned `1..N`.

use shared_types::{Clause, Language};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::patterns;

/// A candidate clause start found by one of the section patterns
#[derive(Debug, Clone)]
struct Boundary {
    /// Byte offset where the marker match begins
    start: usize,
    /// Char offset of `start`, used for de-duplication distance
    start_char: usize,
    /// Byte offset where clause text begins
    body_start: usize,
    section: String,
}

/// Segment a document into an ordered list of clauses.
///
/// Whitespace-only input yields an empty list.
pub fn segment(text: &str, language: Language, config: &EngineConfig) -> Vec<Clause> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let boundaries = find_boundaries(text, language, config.boundary_dedup_distance);
    let structural = clauses_between(text, &boundaries);

    // A lone marker still defines one clause; otherwise numbering that yields
    // at most one clause is not structure.
    let use_structure =
        structural.len() > 1 || (boundaries.len() == 1 && structural.len() == 1);

    let clauses = if use_structure {
        structural
    } else {
        debug!(
            boundaries = boundaries.len(),
            "No usable section numbering, grouping sentences"
        );
        group_sentences(
            text,
            config.sentences_per_clause,
            config.max_fallback_clause_chars,
        )
    };

    let merged = merge_short_clauses(clauses, config.min_clause_length);
    info!(clauses = merged.len(), language = %language, "Segmented document");
    merged
}

fn find_boundaries(text: &str, language: Language, dedup_distance: usize) -> Vec<Boundary> {
    let mut boundaries = Vec::new();

    for pattern in patterns::section_patterns(language) {
        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            boundaries.push(Boundary {
                start: whole.start(),
                start_char: text[..whole.start()].chars().count(),
                body_start: whole.end(),
                section: caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            });
        }
    }

    // Stable sort keeps pattern priority for boundaries at the same offset
    boundaries.sort_by_key(|b| b.start);

    let mut accepted: Vec<Boundary> = Vec::with_capacity(boundaries.len());
    for boundary in boundaries {
        match accepted.last() {
            Some(last) if boundary.start_char - last.start_char <= dedup_distance => {}
            _ => accepted.push(boundary),
        }
    }
    accepted
}

/// Text between consecutive boundaries; the preamble before the first is dropped
fn clauses_between(text: &str, boundaries: &[Boundary]) -> Vec<Clause> {
    let mut clauses = Vec::new();

    for (i, boundary) in boundaries.iter().enumerate() {
        let end = boundaries
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());
        if boundary.body_start >= end {
            continue;
        }
        let body = text[boundary.body_start..end].trim();
        if !body.is_empty() {
            clauses.push(Clause::new(i + 1, body, boundary.section.clone()));
        }
    }

    clauses
}

/// Split on sentence-final punctuation (including the danda) followed by whitespace
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?' | '।') {
            continue;
        }
        let end = idx + c.len_utf8();
        if !matches!(chars.peek(), Some((_, next)) if next.is_whitespace()) {
            continue;
        }
        sentences.push(&text[start..end]);
        while let Some((_, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            chars.next();
        }
        start = chars.peek().map(|(i, _)| *i).unwrap_or(text.len());
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

fn group_sentences(text: &str, per_clause: usize, max_chars: usize) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        current.push(sentence);
        current_len += sentence.chars().count();

        if current_len > max_chars || current.len() >= per_clause {
            clauses.push(Clause::new(clauses.len() + 1, current.join(" "), ""));
            current.clear();
            current_len = 0;
        }
    }
    if !current.is_empty() {
        clauses.push(Clause::new(clauses.len() + 1, current.join(" "), ""));
    }

    clauses
}

/// Fold clauses shorter than `min_len` chars into the next one.
///
/// The buffer keeps growing until it reaches `min_len`; a trailing buffer is
/// appended to the last clause, or becomes the only clause.
fn merge_short_clauses(clauses: Vec<Clause>, min_len: usize) -> Vec<Clause> {
    let mut merged: Vec<Clause> = Vec::with_capacity(clauses.len());
    let mut buffer: Option<(String, String)> = None;

    for clause in clauses {
        let (text, section) = match buffer.take() {
            Some((pending, pending_section)) => {
                let section = if clause.section_number.is_empty() {
                    pending_section
                } else {
                    clause.section_number
                };
                (format!("{} {}", pending, clause.text), section)
            }
            None => (clause.text, clause.section_number),
        };

        if text.chars().count() < min_len {
            buffer = Some((text, section));
            continue;
        }
        merged.push(Clause::new(merged.len() + 1, text, section));
    }

    if let Some((rest, section)) = buffer {
        match merged.last_mut() {
            Some(last) => {
                last.text.push(' ');
                last.text.push_str(&rest);
            }
            None => merged.push(Clause::new(1, rest, section)),
        }
    }

    merged
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn non_whitespace(s: &str) -> Vec<char> {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn is_subsequence(needle: &[char], haystack: &[char]) -> bool {
        let mut it = haystack.iter();
        needle.iter().all(|c| it.any(|h| h == c))
    }

    proptest! {
        #[test]
        fn segment_never_panics(text in "\\PC*") {
            let _ = segment(&text, Language::English, &EngineConfig::default());
            let _ = segment(&text, Language::Hindi, &EngineConfig::default());
        }

        #[test]
        fn segment_is_deterministic(text in "\\PC*") {
            let config = EngineConfig::default();
            prop_assert_eq!(
                segment(&text, Language::English, &config),
                segment(&text, Language::English, &config)
            );
        }

        #[test]
        fn ids_are_sequential(text in "\\PC*") {
            let clauses = segment(&text, Language::English, &EngineConfig::default());
            for (i, clause) in clauses.iter().enumerate() {
                prop_assert_eq!(clause.id, i + 1);
            }
        }

        #[test]
        fn clause_content_preserves_order(text in "\\PC*") {
            let clauses = segment(&text, Language::English, &EngineConfig::default());
            let joined: String = clauses.iter().map(|c| c.text.as_str()).collect();
            prop_assert!(is_subsequence(&non_whitespace(&joined), &non_whitespace(&text)));
        }

        #[test]
        fn unnumbered_text_loses_nothing(text in "[a-z .]{1,400}") {
            let clauses = segment(&text, Language::English, &EngineConfig::default());
            let joined: String = clauses.iter().map(|c| c.text.as_str()).collect();
            prop_assert_eq!(non_whitespace(&joined), non_whitespace(&text));
        }
    }
}
