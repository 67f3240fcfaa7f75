//! Obligation extraction
//!
//! Each sentence yields at most one obligation: modal families are tried in
//! priority order (mandatory, recommended, optional) and the first modal that
//! matches decides the strength. Party and action come from the dependency
//! parser when one is available, otherwise from the text around the modal.

use std::collections::BTreeMap;

use shared_types::{
    Clause, Language, Obligation, ObligationStrength, ObligationType, PartyBalance,
};
use tracing::{debug, info, warn};

use super::PARSE_CHAR_LIMIT;
use crate::capabilities::DependencyParser;
use crate::config::EngineConfig;
use crate::patterns::{self, Modal};
use crate::segmenter::split_sentences;
use crate::text::truncate_chars;

const ACTION_CHARS: usize = 200;
const CONDITION_CHARS: usize = 200;
const FALLBACK_PARTY_WORDS: usize = 3;
const PARTY_TRIM: &[char] = &[' ', ',', ';', ':'];
const ACTION_TRIM: &[char] = &[' ', ',', ';', ':', '.'];

pub fn detect_obligations(
    clauses: &[Clause],
    language: Language,
    parser: Option<&dyn DependencyParser>,
    config: &EngineConfig,
) -> Vec<Obligation> {
    let mut obligations = Vec::new();

    for clause in clauses {
        for sentence in sentences(&clause.text, language) {
            if let Some(obligation) = analyze_sentence(sentence, clause.id, language, parser) {
                obligations.push(obligation);
            }
        }
    }

    let balance = party_balance_at(&obligations, config.power_imbalance_ratio);
    if balance.is_imbalanced {
        let dominant = balance.dominant_party.as_deref();
        // Obligations without a party keep their unilateral default
        for obligation in &mut obligations {
            if let Some(party) = normalized_party(obligation) {
                obligation.obligation_type = if Some(party.as_str()) == dominant {
                    ObligationType::Unilateral
                } else {
                    ObligationType::Mutual
                };
            }
        }
        debug!(
            dominant = ?balance.dominant_party,
            share = balance.dominant_share,
            "Power imbalance detected"
        );
    }

    info!(obligations = obligations.len(), "Obligation detection complete");
    obligations
}

/// Obligation counts per normalized party at the default imbalance ratio
pub fn party_balance(obligations: &[Obligation]) -> PartyBalance {
    party_balance_at(obligations, EngineConfig::default().power_imbalance_ratio)
}

/// A party is dominant when it holds more than `ratio` of all attributed
/// obligations and at least two distinct parties are attributed.
pub fn party_balance_at(obligations: &[Obligation], ratio: f64) -> PartyBalance {
    let mut order: Vec<String> = Vec::new();
    let mut party_counts: BTreeMap<String, usize> = BTreeMap::new();

    for party in obligations.iter().filter_map(normalized_party) {
        let count = party_counts.entry(party.clone()).or_insert(0);
        if *count == 0 {
            order.push(party);
        }
        *count += 1;
    }

    let total: usize = party_counts.values().sum();
    if total == 0 {
        return PartyBalance::default();
    }

    // Ties go to the party seen first
    let mut dominant: Option<(&String, usize)> = None;
    for party in &order {
        let count = party_counts[party];
        if dominant.map_or(true, |(_, best)| count > best) {
            dominant = Some((party, count));
        }
    }

    let (dominant_party, dominant_count) = match dominant {
        Some((party, count)) => (Some(party.clone()), count),
        None => (None, 0),
    };
    let dominant_share = dominant_count as f64 / total as f64;

    PartyBalance {
        is_imbalanced: party_counts.len() >= 2 && dominant_share > ratio,
        party_counts,
        dominant_party,
        dominant_share,
    }
}

fn normalized_party(obligation: &Obligation) -> Option<String> {
    obligation
        .party
        .as_deref()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
}

fn sentences(text: &str, language: Language) -> Vec<&str> {
    match language {
        Language::Hindi => text
            .split_inclusive('।')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
        Language::English => split_sentences(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

fn find_modal(
    sentence: &str,
    language: Language,
) -> Option<(&'static Modal, usize, usize, ObligationStrength)> {
    for family in patterns::modal_families(language) {
        for modal in &family.modals {
            if let Some(m) = modal.regex.find(sentence) {
                return Some((modal, m.start(), m.end(), family.strength));
            }
        }
    }
    None
}

fn analyze_sentence(
    sentence: &str,
    clause_id: usize,
    language: Language,
    parser: Option<&dyn DependencyParser>,
) -> Option<Obligation> {
    let (modal, start, end, strength) = find_modal(sentence, language)?;

    let mut party = None;
    let mut action = None;
    let mut is_passive = patterns::passive_patterns(language)
        .iter()
        .any(|p| p.is_match(sentence));

    if let Some(parser) = parser {
        match parser.parse(&truncate_chars(sentence, PARSE_CHAR_LIMIT), language) {
            Ok(parsed) => {
                if let Some(parsed_sentence) = parsed.sentences.first() {
                    party = parsed_sentence
                        .subject_phrase()
                        .map(|p| p.trim_matches(PARTY_TRIM).to_string())
                        .filter(|p| !p.is_empty());
                    action = parsed_sentence.root_phrase().filter(|a| !a.is_empty());
                    is_passive |= parsed_sentence.has_passive_subject();
                }
            }
            Err(e) => warn!(parser = parser.name(), "Parse failed, using text fallback: {}", e),
        }
    }

    if party.is_none() && language == Language::English {
        party = party_before(&sentence[..start]);
    }
    let action = action.unwrap_or_else(|| match language {
        Language::English => sentence[end..].trim_matches(ACTION_TRIM).to_string(),
        Language::Hindi => sentence.to_string(),
    });

    Some(Obligation {
        clause_id,
        text: sentence.to_string(),
        strength,
        modal: modal.phrase.to_string(),
        party,
        action: truncate_chars(&action, ACTION_CHARS),
        deadline: first_capture(patterns::deadline_patterns(language), sentence),
        condition: first_capture(patterns::condition_patterns(language), sentence)
            .map(|c| truncate_chars(&c, CONDITION_CHARS)),
        obligation_type: ObligationType::Unilateral,
        is_passive,
    })
}

/// Last few words before the modal
fn party_before(prefix: &str) -> Option<String> {
    let words: Vec<&str> = prefix.split_whitespace().collect();
    let tail = &words[words.len().saturating_sub(FALLBACK_PARTY_WORDS)..];
    let party = tail.join(" ");
    let party = party.trim_matches(PARTY_TRIM);
    (!party.is_empty()).then(|| party.to_string())
}

fn first_capture(patterns: &[regex::Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}
