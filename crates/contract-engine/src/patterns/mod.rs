//! Static, language-keyed pattern tables
//!
//! Risk signatures, the essential-clause checklist with its structural
//! validators, obligation modals, vague terms and section markers. Everything
//! here is compiled once on first use and read-only afterwards.

mod english;
mod hindi;

use regex::Regex;
use shared_types::{Language, ObligationStrength, Severity};

/// One risk type: severity plus ordered patterns, first match wins
#[derive(Debug)]
pub struct RiskSignature {
    pub risk_type: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub patterns: Vec<Regex>,
}

/// Canonical example sentences for embedding-based risk matching
#[derive(Debug)]
pub struct RiskPrototype {
    pub risk_type: &'static str,
    pub severity: Severity,
    pub sentences: &'static [&'static str],
}

/// One essential clause type
#[derive(Debug)]
pub struct ChecklistItem {
    pub clause_type: &'static str,
    pub keywords: &'static [&'static str],
    pub weight: u32,
    pub description: &'static str,
}

/// Named sub-check; passes when any of its patterns matches
#[derive(Debug)]
pub struct QualityRule {
    pub name: &'static str,
    pub label: &'static str,
    pub patterns: Vec<Regex>,
}

#[derive(Debug)]
pub struct QualityValidator {
    pub clause_type: &'static str,
    pub checks: Vec<QualityRule>,
    /// Quality floor for a clause that is present but passes no check
    pub weight_factor: f64,
}

/// A modal word or phrase with its word-bounded matcher
#[derive(Debug)]
pub struct Modal {
    pub phrase: &'static str,
    pub regex: Regex,
}

#[derive(Debug)]
pub struct ModalFamily {
    pub strength: ObligationStrength,
    pub modals: Vec<Modal>,
}

#[derive(Debug)]
pub struct VagueTerm {
    pub term: &'static str,
    pub regex: Regex,
}

// ============================================================================
// Lookups
// ============================================================================

/// Section markers in priority order: numeric, lettered, keyword, Roman
pub fn section_patterns(language: Language) -> &'static [Regex] {
    match language {
        Language::English => &english::SECTION_PATTERNS,
        Language::Hindi => &hindi::SECTION_PATTERNS,
    }
}

pub fn risk_signatures(language: Language) -> &'static [RiskSignature] {
    match language {
        Language::English => &english::RISK_SIGNATURES,
        Language::Hindi => &hindi::RISK_SIGNATURES,
    }
}

/// Prototypes are English only; the encoder bridges languages
pub fn risk_prototypes() -> &'static [RiskPrototype] {
    &english::RISK_PROTOTYPES
}

/// Description of a risk type from the English table
pub fn risk_description(risk_type: &str) -> Option<&'static str> {
    english::RISK_SIGNATURES
        .iter()
        .find(|s| s.risk_type == risk_type)
        .map(|s| s.description)
}

pub fn checklist(language: Language) -> &'static [ChecklistItem] {
    match language {
        Language::English => english::CHECKLIST,
        Language::Hindi => hindi::CHECKLIST,
    }
}

pub fn quality_validator(language: Language, clause_type: &str) -> Option<&'static QualityValidator> {
    let validators: &'static [QualityValidator] = match language {
        Language::English => &english::QUALITY_VALIDATORS,
        Language::Hindi => &hindi::QUALITY_VALIDATORS,
    };
    validators.iter().find(|v| v.clause_type == clause_type)
}

/// Modal families in strict priority order: mandatory, recommended, optional
pub fn modal_families(language: Language) -> &'static [ModalFamily] {
    match language {
        Language::English => &english::MODAL_FAMILIES,
        Language::Hindi => &hindi::MODAL_FAMILIES,
    }
}

pub fn vague_terms(language: Language) -> &'static [VagueTerm] {
    match language {
        Language::English => &english::VAGUE_TERMS,
        Language::Hindi => &hindi::VAGUE_TERMS,
    }
}

pub fn passive_patterns(language: Language) -> &'static [Regex] {
    match language {
        Language::English => &english::PASSIVE_PATTERNS,
        Language::Hindi => &hindi::PASSIVE_PATTERNS,
    }
}

/// Constructions with no identifiable agent; English only
pub fn missing_subject_patterns() -> &'static [Regex] {
    &english::MISSING_SUBJECT_PATTERNS
}

/// Deadline phrases; capture group 1 is the deadline
pub fn deadline_patterns(language: Language) -> &'static [Regex] {
    match language {
        Language::English => &english::DEADLINE_PATTERNS,
        Language::Hindi => &hindi::DEADLINE_PATTERNS,
    }
}

/// Conditional phrases; capture group 1 is the condition
pub fn condition_patterns(language: Language) -> &'static [Regex] {
    match language {
        Language::English => &english::CONDITION_PATTERNS,
        Language::Hindi => &hindi::CONDITION_PATTERNS,
    }
}

// ============================================================================
// Table builders
// ============================================================================

/// Case-insensitive regexes from static pattern sources
fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

/// Whole-word, case-insensitive matcher; inner spaces match any whitespace run
fn word_regex(phrase: &str) -> Regex {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i)\b{}\b", body)).unwrap()
}

fn modals(strength: ObligationStrength, phrases: &[&'static str]) -> ModalFamily {
    ModalFamily {
        strength,
        modals: phrases
            .iter()
            .map(|&phrase| Modal {
                phrase,
                regex: word_regex(phrase),
            })
            .collect(),
    }
}

fn vague(terms: &[&'static str]) -> Vec<VagueTerm> {
    terms
        .iter()
        .map(|&term| VagueTerm {
            term,
            regex: word_regex(term),
        })
        .collect()
}

fn rule(name: &'static str, label: &'static str, patterns: &[&str]) -> QualityRule {
    QualityRule {
        name,
        label,
        patterns: compile_all(patterns),
    }
}
