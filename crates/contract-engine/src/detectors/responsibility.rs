//! Responsibility and ambiguity analysis
//!
//! Flags passive constructions (who acts?), vague qualifiers (how much, how
//! soon?) and modal sentences without an identifiable agent, then folds the
//! issue count into a 0-100 ambiguity score.

use std::collections::HashSet;

use shared_types::{
    AnalysisMethod, Clause, Language, MissingSubjectFinding, PassiveVoiceFinding,
    ResponsibilityResult, VagueTermFinding,
};
use tracing::{info, warn};

use crate::capabilities::{DependencyParser, DependencyRelation, ParsedText};
use crate::config::EngineConfig;
use crate::patterns;
use crate::segmenter::split_sentences;
use crate::text::{context_window, truncate_chars};

const PARSER_PASSIVE_CONFIDENCE: f64 = 0.90;
const HINDI_PARSER_PASSIVE_CONFIDENCE: f64 = 0.88;
const PATTERN_PASSIVE_CONFIDENCE: f64 = 0.85;
const HINDI_PATTERN_PASSIVE_CONFIDENCE: f64 = 0.80;
const VAGUE_TERM_CONFIDENCE: f64 = 0.80;
const MISSING_SUBJECT_CONFIDENCE: f64 = 0.75;

/// Whole clauses are parsed up to this many chars
const CLAUSE_PARSE_CHARS: usize = 5000;
const SENTENCE_CHARS: usize = 200;
const MISSING_SUBJECT_CHARS: usize = 150;
const VAGUE_CONTEXT_RADIUS: usize = 30;
const HINDI_PASSIVE_CONTEXT_RADIUS: usize = 50;

pub fn analyze_responsibility(
    clauses: &[Clause],
    language: Language,
    parser: Option<&dyn DependencyParser>,
    config: &EngineConfig,
) -> ResponsibilityResult {
    let mut passive_voice = Vec::new();
    let mut vague_terms = Vec::new();
    let mut missing_subjects = Vec::new();

    for clause in clauses {
        let parsed = parser.and_then(|p| {
            p.parse(&truncate_chars(&clause.text, CLAUSE_PARSE_CHARS), language)
                .map_err(|e| warn!(parser = p.name(), "Parse failed, using patterns: {}", e))
                .ok()
        });

        match language {
            Language::English => {
                passive_voice.extend(passive_english(clause, parsed.as_ref()));
                missing_subjects.extend(missing_subject(clause));
            }
            Language::Hindi => passive_voice.extend(passive_hindi(clause, parsed.as_ref())),
        }
        vague_terms.extend(vague_terms_in(clause, language));
    }

    let total_issues = passive_voice.len() + vague_terms.len() + missing_subjects.len();
    let ambiguity_score = ambiguity_score(total_issues, clauses.len(), config.ambiguity_scale);

    info!(
        passive = passive_voice.len(),
        vague = vague_terms.len(),
        missing_subjects = missing_subjects.len(),
        ambiguity_score,
        "Responsibility analysis complete"
    );

    ResponsibilityResult {
        passive_voice,
        vague_terms,
        missing_subjects,
        total_issues,
        ambiguity_score,
    }
}

/// `min(100, floor(scale * issues / max(clauses, 1)))`
pub fn ambiguity_score(issues: usize, clause_count: usize, scale: f64) -> u32 {
    let raw = scale * issues as f64 / clause_count.max(1) as f64;
    (raw.floor() as u32).min(100)
}

fn passive_english(clause: &Clause, parsed: Option<&ParsedText>) -> Vec<PassiveVoiceFinding> {
    if let Some(parsed) = parsed {
        let mut seen = HashSet::new();
        let mut findings = Vec::new();

        for sentence in &parsed.sentences {
            let sentence_text = sentence.text.trim();
            for token in &sentence.tokens {
                if token.relation != DependencyRelation::PassiveSubject {
                    continue;
                }
                if !seen.insert(sentence_text.to_string()) {
                    continue;
                }
                let verb = sentence
                    .tokens
                    .get(token.head)
                    .map(|t| t.text.as_str())
                    .unwrap_or_default();
                findings.push(PassiveVoiceFinding {
                    clause_id: clause.id,
                    sentence: truncate_chars(sentence_text, SENTENCE_CHARS),
                    matched_text: format!("{} ... {}", token.text, verb),
                    confidence: PARSER_PASSIVE_CONFIDENCE,
                    method: AnalysisMethod::DependencyParse,
                });
            }
        }
        return findings;
    }

    let excerpt = truncate_chars(&clause.text, SENTENCE_CHARS);
    patterns::passive_patterns(Language::English)
        .iter()
        .flat_map(|pattern| pattern.find_iter(&clause.text))
        .map(|m| PassiveVoiceFinding {
            clause_id: clause.id,
            sentence: excerpt.clone(),
            matched_text: m.as_str().to_string(),
            confidence: PATTERN_PASSIVE_CONFIDENCE,
            method: AnalysisMethod::Pattern,
        })
        .collect()
}

/// Parser labels first, then passive markers; one finding per sentence or context
fn passive_hindi(clause: &Clause, parsed: Option<&ParsedText>) -> Vec<PassiveVoiceFinding> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut findings = Vec::new();

    if let Some(parsed) = parsed {
        for sentence in &parsed.sentences {
            let sentence_text = sentence.text.trim();
            let marker = sentence.tokens.iter().find(|t| {
                matches!(
                    t.relation,
                    DependencyRelation::PassiveSubject | DependencyRelation::PassiveAuxiliary
                )
            });
            if let Some(token) = marker {
                if seen.insert(sentence_text.to_string()) {
                    findings.push(PassiveVoiceFinding {
                        clause_id: clause.id,
                        sentence: truncate_chars(sentence_text, SENTENCE_CHARS),
                        matched_text: token.text.clone(),
                        confidence: HINDI_PARSER_PASSIVE_CONFIDENCE,
                        method: AnalysisMethod::DependencyParse,
                    });
                }
            }
        }
    }

    for pattern in patterns::passive_patterns(Language::Hindi) {
        for m in pattern.find_iter(&clause.text) {
            let context = context_window(
                &clause.text,
                m.start(),
                m.end(),
                HINDI_PASSIVE_CONTEXT_RADIUS,
            )
            .trim();
            if !seen.insert(context.to_string()) {
                continue;
            }
            findings.push(PassiveVoiceFinding {
                clause_id: clause.id,
                sentence: truncate_chars(context, SENTENCE_CHARS),
                matched_text: m.as_str().to_string(),
                confidence: HINDI_PATTERN_PASSIVE_CONFIDENCE,
                method: AnalysisMethod::Pattern,
            });
        }
    }

    findings
}

/// First occurrence of each vague term in the clause
fn vague_terms_in(clause: &Clause, language: Language) -> Vec<VagueTermFinding> {
    patterns::vague_terms(language)
        .iter()
        .filter_map(|vague| {
            let m = vague.regex.find(&clause.text)?;
            let context = context_window(&clause.text, m.start(), m.end(), VAGUE_CONTEXT_RADIUS);
            Some(VagueTermFinding {
                clause_id: clause.id,
                term: vague.term.to_string(),
                context: format!("...{}...", context),
                confidence: VAGUE_TERM_CONFIDENCE,
            })
        })
        .collect()
}

/// At most one finding per sentence
fn missing_subject(clause: &Clause) -> Vec<MissingSubjectFinding> {
    split_sentences(&clause.text)
        .into_iter()
        .map(str::trim)
        .filter(|s| {
            !s.is_empty()
                && patterns::missing_subject_patterns()
                    .iter()
                    .any(|p| p.is_match(s))
        })
        .map(|s| MissingSubjectFinding {
            clause_id: clause.id,
            matched_text: truncate_chars(s, MISSING_SUBJECT_CHARS),
            confidence: MISSING_SUBJECT_CONFIDENCE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{ParsedSentence, Token};
    use crate::error::Result;

    fn analyze(texts: &[&str]) -> ResponsibilityResult {
        let clauses: Vec<Clause> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Clause::new(i + 1, *t, ""))
            .collect();
        analyze_responsibility(&clauses, Language::English, None, &EngineConfig::default())
    }

    struct PassiveParser;

    impl DependencyParser for PassiveParser {
        fn parse(&self, text: &str, _language: Language) -> Result<ParsedText> {
            Ok(ParsedText {
                sentences: vec![ParsedSentence {
                    text: text.to_string(),
                    tokens: vec![
                        Token::new("Payment", DependencyRelation::PassiveSubject, 2),
                        Token::new("was", DependencyRelation::PassiveAuxiliary, 2),
                        Token::new("made", DependencyRelation::Root, 2),
                        Token::new("fees", DependencyRelation::PassiveSubject, 2),
                    ],
                }],
                entities: Vec::new(),
            })
        }

        fn name(&self) -> &str {
            "passive"
        }
    }

    #[test]
    fn test_empty_clause_list_scores_zero() {
        let result = analyze(&[]);
        assert_eq!(result.total_issues, 0);
        assert_eq!(result.ambiguity_score, 0);
    }

    #[test]
    fn test_vague_term_counted_once_per_clause() {
        let result = analyze(&[
            "The Vendor shall use reasonable care and reasonable skill at all times here.",
        ]);
        let reasonable: Vec<&VagueTermFinding> = result
            .vague_terms
            .iter()
            .filter(|v| v.term == "reasonable")
            .collect();
        assert_eq!(reasonable.len(), 1);
        assert!(reasonable[0].context.starts_with("..."));
        assert!(reasonable[0].context.contains("reasonable care"));
        assert_eq!(reasonable[0].confidence, 0.80);
    }

    #[test]
    fn test_vague_terms_respect_word_boundaries() {
        // "unfair" must not count as "fair"; "normally" not as "normal"
        let result = analyze(&["The unfair clause normally applies to the seller only."]);
        assert!(result.vague_terms.is_empty());
    }

    #[test]
    fn test_passive_voice_fallback_patterns() {
        // Both the auxiliary and the modal pattern fire; every match is reported
        let result = analyze(&["The goods shall be delivered to the warehouse."]);
        let matched: Vec<&str> = result
            .passive_voice
            .iter()
            .map(|f| f.matched_text.as_str())
            .collect();
        assert_eq!(matched, vec!["be delivered", "shall be delivered"]);
        assert!(result
            .passive_voice
            .iter()
            .all(|f| f.confidence == 0.85 && f.method == AnalysisMethod::Pattern));
    }

    #[test]
    fn test_missing_subject() {
        let result = analyze(&["It shall remain in force until the end of the term."]);
        assert_eq!(result.missing_subjects.len(), 1);
        assert_eq!(result.missing_subjects[0].confidence, 0.75);
    }

    #[test]
    fn test_ambiguity_score_formula() {
        assert_eq!(ambiguity_score(0, 0, 25.0), 0);
        assert_eq!(ambiguity_score(3, 4, 25.0), 18);
        assert_eq!(ambiguity_score(10, 1, 25.0), 100);
        assert_eq!(ambiguity_score(4, 5, 25.0), 20);
    }

    #[test]
    fn test_parser_passive_deduplicated_by_sentence() {
        let clauses = vec![Clause::new(1, "Payment was made and fees were paid.", "")];
        let result = analyze_responsibility(
            &clauses,
            Language::English,
            Some(&PassiveParser),
            &EngineConfig::default(),
        );
        assert_eq!(result.passive_voice.len(), 1);
        assert_eq!(result.passive_voice[0].matched_text, "Payment ... made");
        assert_eq!(result.passive_voice[0].confidence, 0.90);
        assert_eq!(
            result.passive_voice[0].method,
            AnalysisMethod::DependencyParse
        );
    }

    #[test]
    fn test_hindi_passive_markers() {
        let clauses = vec![Clause::new(1, "भुगतान तीस दिनों में किया जाएगा।", "")];
        let result = analyze_responsibility(
            &clauses,
            Language::Hindi,
            None,
            &EngineConfig::default(),
        );
        assert_eq!(result.passive_voice.len(), 1);
        assert_eq!(result.passive_voice[0].matched_text, "किया जाएगा");
        assert_eq!(result.passive_voice[0].confidence, 0.80);
        assert!(result.missing_subjects.is_empty());
    }
}
