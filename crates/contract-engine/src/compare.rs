//! Cross-document clause comparison
//!
//! Both documents are segmented and scored independently, then each
//! document-1 clause greedily claims its most similar unclaimed document-2
//! clause in document order. Similarity is the lexical ratio, or embedding
//! cosine when an encoder is available (which also aligns clauses across
//! languages).

use shared_types::{
    ChangeKind, Clause, ClauseChange, ClauseMatch, ComparisonResult, DocumentSummary, Language,
    MatchMethod, ModifiedClause, PowerShift, UnchangedClause, WordChange,
};
use tracing::{debug, info, warn};

use crate::capabilities::SentenceEncoder;
use crate::config::EngineConfig;
use crate::detectors::{compliance, risk};
use crate::error::{EngineError, Result};
use crate::segmenter;
use crate::similarity::{cosine_similarity, lexical_ratio, OpTag, SequenceMatcher};
use crate::text::{round2, truncate_chars};

/// Risk deltas beyond this many points count as a power shift
const POWER_SHIFT_POINTS: i32 = 10;

/// One side of a comparison
#[derive(Debug, Clone, Copy)]
pub struct NamedText<'a> {
    pub name: &'a str,
    pub text: &'a str,
}

impl<'a> NamedText<'a> {
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }
}

struct ScoredDocument {
    clauses: Vec<Clause>,
    risk_score: u32,
    compliance_score: u32,
}

/// Segment, score and align two documents
pub fn compare_contracts(
    doc1: NamedText<'_>,
    doc2: NamedText<'_>,
    language: Language,
    encoder: Option<&dyn SentenceEncoder>,
    config: &EngineConfig,
) -> ComparisonResult {
    let (scored1, scored2) = rayon::join(
        || score_document(doc1.text, language, encoder, config),
        || score_document(doc2.text, language, encoder, config),
    );
    let (clauses1, clauses2) = (&scored1.clauses, &scored2.clauses);

    let (matches, match_method) = align(clauses1, clauses2, encoder, config);

    let mut claimed = vec![false; clauses2.len()];
    let mut removed = Vec::new();
    let mut modified = Vec::new();
    let mut unchanged = Vec::new();

    for m in &matches {
        let clause1 = &clauses1[m.index1];
        let Some(index2) = m.index2 else {
            removed.push(ClauseChange {
                clause: clause1.clone(),
                document: doc1.name.to_string(),
            });
            continue;
        };
        claimed[index2] = true;
        let clause2 = &clauses2[index2];

        if m.similarity > config.unchanged_threshold {
            unchanged.push(UnchangedClause {
                clause1_id: clause1.id,
                clause2_id: clause2.id,
                similarity: round2(m.similarity),
            });
        } else {
            modified.push(ModifiedClause {
                clause1: clause1.clone(),
                clause2: clause2.clone(),
                similarity: round2(m.similarity),
                changes: word_changes(&clause1.text, &clause2.text),
            });
        }
    }

    let added: Vec<ClauseChange> = clauses2
        .iter()
        .zip(&claimed)
        .filter(|(_, taken)| !**taken)
        .map(|(clause, _)| ClauseChange {
            clause: clause.clone(),
            document: doc2.name.to_string(),
        })
        .collect();

    let risk_delta = scored2.risk_score as i32 - scored1.risk_score as i32;
    let compliance_delta = scored2.compliance_score as i32 - scored1.compliance_score as i32;
    let power_shift = if risk_delta > POWER_SHIFT_POINTS {
        PowerShift::RiskIncreased
    } else if risk_delta < -POWER_SHIFT_POINTS {
        PowerShift::RiskDecreased
    } else {
        PowerShift::Similar
    };

    let shift_text = match power_shift {
        PowerShift::RiskIncreased => format!("Risk increased by {} points in {}.", risk_delta, doc2.name),
        PowerShift::RiskDecreased => format!(
            "Risk decreased by {} points in {}.",
            risk_delta.abs(),
            doc2.name
        ),
        PowerShift::Similar => "Risk level is similar between both versions.".to_string(),
    };
    let summary = format!(
        "Compared {} clauses ({}) vs {} clauses ({}). {} added, {} removed, {} modified, {} unchanged. {}",
        clauses1.len(),
        doc1.name,
        clauses2.len(),
        doc2.name,
        added.len(),
        removed.len(),
        modified.len(),
        unchanged.len(),
        shift_text
    );
    info!(method = ?match_method, risk_delta, compliance_delta, "{}", summary);

    ComparisonResult {
        document1: summarize(doc1.name, &scored1),
        document2: summarize(doc2.name, &scored2),
        matches,
        added,
        removed,
        modified,
        unchanged,
        risk_delta,
        compliance_delta,
        power_shift,
        match_method,
        summary,
    }
}

fn score_document(
    text: &str,
    language: Language,
    encoder: Option<&dyn SentenceEncoder>,
    config: &EngineConfig,
) -> ScoredDocument {
    let clauses = segmenter::segment(text, language, config);
    let risks = risk::detect_risks(&clauses, language, encoder, config);
    let compliance = compliance::check_compliance(&clauses, text, language);
    ScoredDocument {
        clauses,
        risk_score: risks.score,
        compliance_score: compliance.score,
    }
}

fn summarize(name: &str, scored: &ScoredDocument) -> DocumentSummary {
    DocumentSummary {
        name: name.to_string(),
        clause_count: scored.clauses.len(),
        risk_score: scored.risk_score,
        compliance_score: scored.compliance_score,
    }
}

/// Semantic alignment when possible, lexical otherwise
fn align(
    clauses1: &[Clause],
    clauses2: &[Clause],
    encoder: Option<&dyn SentenceEncoder>,
    config: &EngineConfig,
) -> (Vec<ClauseMatch>, MatchMethod) {
    if let Some(encoder) = encoder {
        if !clauses1.is_empty() && !clauses2.is_empty() {
            match match_clauses_semantic(clauses1, clauses2, encoder, config) {
                Ok(matches) => return (matches, MatchMethod::Semantic),
                Err(e) => warn!(
                    encoder = encoder.name(),
                    "Semantic matching failed, falling back to lexical: {}", e
                ),
            }
        }
    }
    (
        match_clauses_lexical(clauses1, clauses2, config.lexical_match_threshold),
        MatchMethod::Lexical,
    )
}

/// Greedy alignment on the case-insensitive character ratio
pub fn match_clauses_lexical(
    clauses1: &[Clause],
    clauses2: &[Clause],
    threshold: f64,
) -> Vec<ClauseMatch> {
    greedy_align(clauses1.len(), clauses2.len(), threshold, |i, j| {
        lexical_ratio(&clauses1[i].text, &clauses2[j].text)
    })
}

/// Greedy alignment on embedding cosine, one encode call per document
pub fn match_clauses_semantic(
    clauses1: &[Clause],
    clauses2: &[Clause],
    encoder: &dyn SentenceEncoder,
    config: &EngineConfig,
) -> Result<Vec<ClauseMatch>> {
    let vectors1 = encode_clauses(clauses1, encoder, config.embedding_char_limit)?;
    let vectors2 = encode_clauses(clauses2, encoder, config.embedding_char_limit)?;

    Ok(greedy_align(
        clauses1.len(),
        clauses2.len(),
        config.semantic_match_threshold,
        |i, j| cosine_similarity(&vectors1[i], &vectors2[j]),
    ))
}

fn encode_clauses(
    clauses: &[Clause],
    encoder: &dyn SentenceEncoder,
    char_limit: usize,
) -> Result<Vec<Vec<f32>>> {
    let texts: Vec<String> = clauses
        .iter()
        .map(|c| truncate_chars(&c.text, char_limit))
        .collect();
    let vectors = encoder.encode(&texts)?;
    if vectors.len() != texts.len() {
        return Err(EngineError::EncodeError(format!(
            "{} returned {} vectors for {} clauses",
            encoder.name(),
            vectors.len(),
            texts.len()
        )));
    }
    Ok(vectors)
}

/// First clause picks first. Below-threshold best scores leave the clause
/// unmatched with similarity 0.
fn greedy_align<F>(count1: usize, count2: usize, threshold: f64, similarity: F) -> Vec<ClauseMatch>
where
    F: Fn(usize, usize) -> f64,
{
    let mut claimed = vec![false; count2];
    let mut matches = Vec::with_capacity(count1);

    for index1 in 0..count1 {
        let mut best: Option<(usize, f64)> = None;
        for (index2, taken) in claimed.iter().enumerate() {
            if *taken {
                continue;
            }
            let score = similarity(index1, index2);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((index2, score));
            }
        }

        match best {
            Some((index2, score)) if score >= threshold => {
                claimed[index2] = true;
                debug!(index1, index2, similarity = score, "Clause matched");
                matches.push(ClauseMatch {
                    index1,
                    index2: Some(index2),
                    similarity: score,
                });
            }
            _ => matches.push(ClauseMatch {
                index1,
                index2: None,
                similarity: 0.0,
            }),
        }
    }

    matches
}

/// Word-level edits from `old` to `new`, equal spans omitted
pub fn word_changes(old: &str, new: &str) -> Vec<WordChange> {
    let words1: Vec<&str> = old.split_whitespace().collect();
    let words2: Vec<&str> = new.split_whitespace().collect();

    SequenceMatcher::new(&words1, &words2)
        .opcodes()
        .into_iter()
        .filter_map(|op| {
            let removed = words1[op.a_start..op.a_end].join(" ");
            let inserted = words2[op.b_start..op.b_end].join(" ");
            let (kind, old, new) = match op.tag {
                OpTag::Equal => return None,
                OpTag::Replace => (ChangeKind::Modified, removed, inserted),
                OpTag::Delete => (ChangeKind::Removed, removed, String::new()),
                OpTag::Insert => (ChangeKind::Added, String::new(), inserted),
            };
            Some(WordChange { kind, old, new })
        })
        .collect()
}
