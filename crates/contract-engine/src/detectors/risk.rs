//! Risk detection
//!
//! Two layers. The pattern layer scans each clause against the language's
//! risk signatures and emits at most one finding per (clause, risk type).
//! The optional semantic layer compares clause embeddings against English
//! prototype sentences and only adds pairs the pattern layer missed.

use std::collections::HashSet;

use shared_types::{Clause, DetectionMethod, Language, RiskFinding, RiskReport, Severity};
use tracing::{debug, info, warn};

use crate::capabilities::SentenceEncoder;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::patterns;
use crate::similarity::cosine_similarity;
use crate::text::truncate_chars;

/// Findings keep this many chars of the clause text
const CLAUSE_EXCERPT_CHARS: usize = 300;

/// Score reported for a document without any finding
pub const MINIMUM_RISK_SCORE: u32 = 5;

/// Pattern layer plus, when an encoder is given, the semantic layer.
///
/// Encoder failures are logged and leave the pattern findings untouched.
pub fn detect_risks(
    clauses: &[Clause],
    language: Language,
    encoder: Option<&dyn SentenceEncoder>,
    config: &EngineConfig,
) -> RiskReport {
    let mut findings = detect_pattern_risks(clauses, language);

    if let Some(encoder) = encoder {
        let found: HashSet<(usize, String)> = findings
            .iter()
            .map(|f| (f.clause_id, f.risk_type.clone()))
            .collect();
        match detect_semantic_risks(clauses, encoder, &found, config) {
            Ok(semantic) => findings.extend(semantic),
            Err(e) => warn!(encoder = encoder.name(), "Semantic risk layer skipped: {}", e),
        }
    }

    let score = overall_risk_score(&findings);
    info!(findings = findings.len(), score, "Risk detection complete");
    RiskReport { findings, score }
}

/// Regex layer: first matching pattern per risk type wins
pub fn detect_pattern_risks(clauses: &[Clause], language: Language) -> Vec<RiskFinding> {
    let signatures = patterns::risk_signatures(language);
    let mut findings = Vec::new();

    for clause in clauses {
        let text_lower = clause.text.to_lowercase();

        for signature in signatures {
            let Some(matched) = signature
                .patterns
                .iter()
                .find_map(|pattern| pattern.find(&text_lower))
            else {
                continue;
            };

            findings.push(RiskFinding {
                clause_id: clause.id,
                clause_text: truncate_chars(&clause.text, CLAUSE_EXCERPT_CHARS),
                risk_type: signature.risk_type.to_string(),
                severity: signature.severity,
                description: signature.description.to_string(),
                matched_text: matched.as_str().to_string(),
                risk_score: signature.severity.base_score(),
                detection_method: DetectionMethod::Pattern,
                original_severity: None,
                jurisdiction_note: None,
            });
        }
    }

    findings
}

/// Embedding layer over all clauses, batched into two encode calls.
///
/// `already_found` holds `(clause_id, risk_type)` pairs to skip.
pub fn detect_semantic_risks(
    clauses: &[Clause],
    encoder: &dyn SentenceEncoder,
    already_found: &HashSet<(usize, String)>,
    config: &EngineConfig,
) -> Result<Vec<RiskFinding>> {
    if clauses.is_empty() {
        return Ok(Vec::new());
    }

    let prototypes = patterns::risk_prototypes();
    let prototype_texts: Vec<String> = prototypes
        .iter()
        .flat_map(|p| p.sentences.iter().map(|s| s.to_string()))
        .collect();
    let prototype_vectors = encode_exact(encoder, &prototype_texts)?;

    let clause_texts: Vec<String> = clauses
        .iter()
        .map(|c| truncate_chars(&c.text, config.embedding_char_limit))
        .collect();
    let clause_vectors = encode_exact(encoder, &clause_texts)?;

    // Slice the flat prototype batch back into one group per risk type
    let mut groups: Vec<&[Vec<f32>]> = Vec::with_capacity(prototypes.len());
    let mut offset = 0;
    for prototype in prototypes {
        let end = offset + prototype.sentences.len();
        groups.push(&prototype_vectors[offset..end]);
        offset = end;
    }

    let mut findings = Vec::new();
    for (clause, clause_vector) in clauses.iter().zip(&clause_vectors) {
        for (prototype, group) in prototypes.iter().zip(&groups) {
            if already_found.contains(&(clause.id, prototype.risk_type.to_string())) {
                continue;
            }

            let best = group
                .iter()
                .map(|v| cosine_similarity(clause_vector, v))
                .fold(f64::MIN, f64::max);
            if best <= config.semantic_risk_threshold {
                continue;
            }

            debug!(
                clause_id = clause.id,
                risk_type = prototype.risk_type,
                similarity = best,
                "Semantic risk match"
            );
            findings.push(RiskFinding {
                clause_id: clause.id,
                clause_text: truncate_chars(&clause.text, CLAUSE_EXCERPT_CHARS),
                risk_type: prototype.risk_type.to_string(),
                severity: prototype.severity,
                description: patterns::risk_description(prototype.risk_type)
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        format!("Semantic match for {}", prototype.risk_type.replace('_', " "))
                    }),
                matched_text: format!("[semantic match: {:.2}]", best),
                risk_score: prototype.severity.semantic_score(),
                detection_method: DetectionMethod::Semantic,
                original_severity: None,
                jurisdiction_note: None,
            });
        }
    }

    Ok(findings)
}

fn encode_exact(encoder: &dyn SentenceEncoder, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let vectors = encoder.encode(texts)?;
    if vectors.len() != texts.len() {
        return Err(EngineError::EncodeError(format!(
            "{} returned {} vectors for {} texts",
            encoder.name(),
            vectors.len(),
            texts.len()
        )));
    }
    Ok(vectors)
}

/// Document risk score in `[5, 100]`.
///
/// Mean finding score scaled to 100, plus 5 per high-severity finding
/// (at most 25). No findings scores exactly 5.
pub fn overall_risk_score(findings: &[RiskFinding]) -> u32 {
    if findings.is_empty() {
        return MINIMUM_RISK_SCORE;
    }

    let total: u32 = findings.iter().map(|f| f.risk_score).sum();
    let count = findings.len() as u32;
    let high = findings
        .iter()
        .filter(|f| f.severity == Severity::High)
        .count() as u32;

    // total / (count * 10) * 100, truncated
    let normalized = total * 10 / count;
    let boost = (high * 5).min(25);

    (normalized + boost).clamp(MINIMUM_RISK_SCORE, 100)
}
