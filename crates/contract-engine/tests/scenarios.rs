//! End-to-end scenarios for the contract engine
//!
//! Runs the public surface with the regex-only engine and with deterministic
//! capability fakes standing in for the embedding and parsing backends.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use contract_engine::capabilities::{
    DependencyRelation, EntityCategory, EntitySpan, ParsedSentence, ParsedText, Token,
};
use contract_engine::{
    AnalysisOptions, Capabilities, ContractEngine, ContractType, DependencyParser, EngineConfig,
    EngineError, Jurisdiction, LazyCapability, NamedText, Result, SentenceEncoder,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shared_types::{
    AnalysisMethod, Clause, DetectionMethod, ImportanceTier, Language, MatchMethod,
    ObligationStrength, PowerShift, Severity,
};

// ============================================================
// Capability fakes
// ============================================================

const BAG_DIMENSIONS: usize = 64;

/// Hashes each lowercase word into a fixed-size count vector
struct BagOfWordsEncoder;

impl BagOfWordsEncoder {
    fn vector(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; BAG_DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let bucket = word
                .to_lowercase()
                .bytes()
                .fold(2166136261u32, |hash, b| (hash ^ b as u32).wrapping_mul(16777619));
            vector[bucket as usize % BAG_DIMENSIONS] += 1.0;
        }
        vector
    }
}

impl SentenceEncoder for BagOfWordsEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn name(&self) -> &str {
        "bag-of-words"
    }
}

struct UnreachableEncoder;

impl SentenceEncoder for UnreachableEncoder {
    fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(EngineError::EncodeError("connection refused".into()))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

/// Returns canned parses for the two sentence shapes used below
struct ScriptedParser;

impl DependencyParser for ScriptedParser {
    fn parse(&self, text: &str, _language: Language) -> Result<ParsedText> {
        let tokens = if text.contains("was submitted") {
            vec![
                Token::new("The", DependencyRelation::Other, 1),
                Token::new("report", DependencyRelation::PassiveSubject, 3),
                Token::new("was", DependencyRelation::PassiveAuxiliary, 3),
                Token::new("submitted", DependencyRelation::Root, 3),
                Token::new(".", DependencyRelation::Punctuation, 3),
            ]
        } else if text.contains("shall repair") {
            vec![
                Token::new("The", DependencyRelation::Other, 1),
                Token::new("Landlord", DependencyRelation::Subject, 3),
                Token::new("shall", DependencyRelation::Other, 3),
                Token::new("repair", DependencyRelation::Root, 3),
                Token::new("roof", DependencyRelation::Object, 3),
                Token::new(".", DependencyRelation::Punctuation, 3),
            ]
        } else {
            Vec::new()
        };

        Ok(ParsedText {
            sentences: vec![ParsedSentence {
                text: text.to_string(),
                tokens,
            }],
            entities: vec![EntitySpan {
                text: "Acme Builders".to_string(),
                category: EntityCategory::Organization,
            }],
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn clauses(texts: &[&str]) -> Vec<Clause> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Clause::new(i + 1, *text, ""))
        .collect()
}

const LEASE: &str = "1. Rent\n\
    The Tenant shall pay the monthly rent of Rs. 25,000 on or before the 5th day of each month.\n\
    2. Security Deposit\n\
    The Tenant shall pay a refundable security deposit which the Landlord shall return within 30 days.\n\
    3. Maintenance\n\
    The Landlord shall carry out structural repairs as soon as practicable after written notice.\n\
    4. Termination\n\
    Either party may terminate this lease by giving 60 days written notice to the other party.\n\
    5. Governing Law\n\
    This lease is governed by the laws of India and disputes are subject to arbitration.";

// ============================================================
// Segmentation
// ============================================================

#[test]
fn segmentation_fallback_groups_sentences_in_threes() {
    let text = "This is one sentence. This is a second sentence. And a third one. A fourth sentence follows.";
    let config = EngineConfig::default()
        .with_fallback_grouping(3, 200)
        .with_min_clause_length(0);
    let engine = ContractEngine::with_config(config);

    let clauses = engine.segment(text, Language::English);

    assert_eq!(clauses.len(), 2);
    assert_eq!(
        clauses[0].text,
        "This is one sentence. This is a second sentence. And a third one."
    );
    assert_eq!(clauses[1].text, "A fourth sentence follows.");
    assert_eq!(clauses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn segmentation_default_merges_short_remainder() {
    let text = "This is one sentence. This is a second sentence. And a third one. A fourth sentence follows.";
    let clauses = ContractEngine::new().segment(text, Language::English);

    assert_eq!(clauses.len(), 1);
    assert!(clauses[0].text.ends_with("A fourth sentence follows."));
}

#[test]
fn empty_input_yields_default_scores() {
    let engine = ContractEngine::new();
    let clauses = engine.segment("   \n\t ", Language::English);

    assert!(clauses.is_empty());
    assert_eq!(engine.detect_risks(&clauses, Language::English).score, 5);
    assert_eq!(engine.check_compliance(&clauses, "", Language::English).score, 0);
    assert_eq!(
        engine
            .analyze_responsibility(&clauses, Language::English)
            .ambiguity_score,
        0
    );
    assert!(engine.detect_obligations(&clauses, Language::English).is_empty());
}

// ============================================================
// Detectors
// ============================================================

#[test]
fn risk_detection_flags_unlimited_liability() {
    let engine = ContractEngine::new();
    let clauses = clauses(&["The Contractor shall be liable for all damages without any limitation."]);

    let report = engine.detect_risks(&clauses, Language::English);
    let finding = report
        .findings
        .iter()
        .find(|f| f.risk_type == "unlimited_liability")
        .expect("unlimited liability finding");

    assert_eq!(finding.severity, Severity::High);
    assert_eq!(finding.severity.as_str(), "high");
    assert_eq!(finding.risk_score, 8);
    assert_eq!(finding.detection_method, DetectionMethod::Pattern);
}

#[test]
fn compliance_reports_missing_termination_as_critical() {
    let engine = ContractEngine::new();
    let text = "The Supplier shall deliver the goods every month. The Buyer shall pay each invoice promptly.";
    let clauses = engine.segment(text, Language::English);

    let result = engine.check_compliance(&clauses, text, Language::English);
    let missing = result
        .missing_clauses
        .iter()
        .find(|m| m.clause_type == "termination")
        .expect("termination reported missing");

    assert_eq!(missing.weight, 10);
    assert_eq!(missing.importance, ImportanceTier::Critical);
    assert!(result.score <= 100);
}

#[test]
fn mandatory_modal_wins_over_optional() {
    let engine = ContractEngine::new();
    let clauses = clauses(&["The Tenant shall pay the rent and may request a receipt."]);

    let obligations = engine.detect_obligations(&clauses, Language::English);

    assert_eq!(obligations.len(), 1);
    assert_eq!(obligations[0].strength, ObligationStrength::Mandatory);
}

#[test]
fn full_analysis_of_lease() {
    let engine = ContractEngine::new();
    let analysis = engine.analyze(LEASE, AnalysisOptions::default());

    assert_eq!(analysis.language, Language::English);
    assert_eq!(analysis.clauses.len(), 5);
    assert_eq!(
        analysis.clauses.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert!(analysis.obligations.len() >= 4);
    assert!(!analysis.party_balance.party_counts.is_empty());
    assert!(analysis
        .responsibility
        .vague_terms
        .iter()
        .any(|v| v.term == "as soon as practicable"));
    assert!(!analysis.entities.monetary_values.is_empty());
    assert!(analysis.compliance.found_clauses.contains(&"termination".to_string()));
    assert!(analysis.timeline.len() >= 2);
}

#[test]
fn analysis_carries_summary_and_explanations() {
    let engine = ContractEngine::new();
    let analysis = engine.analyze(
        LEASE,
        AnalysisOptions::default().with_contract_type(ContractType::Rental),
    );

    assert_eq!(analysis.summary, engine.summarize(LEASE));
    assert!(!analysis.summary.is_empty());
    assert!(analysis.summary.len() < LEASE.len());

    let explanations = &analysis.explanations;
    assert_eq!(
        explanations.risk_explanations.len(),
        analysis.risks.findings.len()
    );
    assert_eq!(
        explanations
            .compliance_explanations
            .iter()
            .map(|e| e.clause_type.as_str())
            .collect::<Vec<_>>(),
        analysis
            .compliance
            .missing_clauses
            .iter()
            .map(|m| m.clause_type.as_str())
            .collect::<Vec<_>>()
    );
    assert!(explanations
        .overall_summary
        .contains(&format!("Compliance score: {}/100", analysis.compliance.score)));

    let profile = analysis.contract_type.expect("rental profile");
    assert_eq!(profile.name, "Rental Agreement");
}

#[test]
fn hindi_analysis_explains_in_hindi() {
    let engine = ContractEngine::new();
    let text = "1. भुगतान\nकिरायेदार प्रत्येक माह की 5 तारीख तक किराया देगा।";
    let analysis = engine.analyze(text, AnalysisOptions::default());

    assert_eq!(analysis.language, Language::Hindi);
    assert!(analysis.explanations.overall_summary.contains("अनुपालन स्कोर"));
}

#[test]
fn jurisdiction_attaches_legal_references() {
    let engine = ContractEngine::new();
    let analysis = engine.analyze(
        LEASE,
        AnalysisOptions::default().with_jurisdiction(Jurisdiction::India),
    );

    assert_eq!(analysis.jurisdiction.as_deref(), Some("india"));
    let termination = analysis
        .compliance
        .details
        .iter()
        .find(|d| d.clause_type == "termination")
        .expect("termination detail");
    assert!(termination.legal_reference.is_some());
}

// ============================================================
// Comparison
// ============================================================

#[test]
fn identical_documents_compare_unchanged() {
    let engine = ContractEngine::new();
    let clause_count = engine.segment(LEASE, Language::English).len();

    let result = engine.compare(LEASE, LEASE, Language::English);

    assert_eq!(result.added.len(), 0);
    assert_eq!(result.removed.len(), 0);
    assert_eq!(result.modified.len(), 0);
    assert_eq!(result.unchanged.len(), clause_count);
    assert_eq!(result.risk_delta, 0);
    assert_eq!(result.compliance_delta, 0);
    assert_eq!(result.power_shift, PowerShift::Similar);
    assert_eq!(result.match_method, MatchMethod::Lexical);
}

#[test]
fn revised_lease_reports_modified_and_added_clauses() {
    let revised = LEASE.replace("60 days", "7 days")
        + "\n6. Indemnity\nThe Tenant shall indemnify the Landlord against all claims arising from use of the premises.";
    let engine = ContractEngine::new();

    let result = engine.compare_named(
        NamedText::new("lease-v1", LEASE),
        NamedText::new("lease-v2", &revised),
        Language::English,
    );

    assert_eq!(result.document2.clause_count, 6);
    assert_eq!(result.added.len(), 1);
    assert_eq!(result.added[0].document, "lease-v2");
    assert_eq!(result.removed.len(), 0);
    assert_eq!(result.modified.len() + result.unchanged.len(), 5);
    assert!(result.summary.starts_with("Compared 5 clauses (lease-v1) vs 6 clauses (lease-v2)."));

    let matched: Vec<usize> = result.matches.iter().filter_map(|m| m.index2).collect();
    let unique: HashSet<usize> = matched.iter().copied().collect();
    assert_eq!(matched.len(), unique.len());
    assert_eq!(result.added.len() + matched.len(), result.document2.clause_count);
}

// ============================================================
// Capabilities
// ============================================================

#[test]
fn semantic_layer_adds_prototype_matches() {
    let engine = ContractEngine::new()
        .with_capabilities(Capabilities::none().with_encoder(Arc::new(BagOfWordsEncoder)));
    let clauses = clauses(&["The company has exclusive right to end this contract."]);

    let report = engine.detect_risks(&clauses, Language::English);

    assert!(report.findings.iter().any(|f| {
        f.risk_type == "one_sided_termination" && f.detection_method == DetectionMethod::Semantic
    }));
    let pairs: HashSet<(usize, &str)> = report
        .findings
        .iter()
        .map(|f| (f.clause_id, f.risk_type.as_str()))
        .collect();
    assert_eq!(pairs.len(), report.findings.len());
}

#[test]
fn semantic_comparison_with_encoder() {
    let engine = ContractEngine::new()
        .with_capabilities(Capabilities::none().with_encoder(Arc::new(BagOfWordsEncoder)));

    let result = engine.compare(LEASE, LEASE, Language::English);

    assert_eq!(result.match_method, MatchMethod::Semantic);
    assert!(result.modified.is_empty());
    assert_eq!(result.unchanged.len(), 5);
}

#[test]
fn failing_encoder_degrades_to_patterns() {
    let plain = ContractEngine::new();
    let degraded = ContractEngine::new()
        .with_capabilities(Capabilities::none().with_encoder(Arc::new(UnreachableEncoder)));

    let expected = plain.analyze(LEASE, AnalysisOptions::default());
    let actual = degraded.analyze(LEASE, AnalysisOptions::default());

    assert_eq!(actual.risks, expected.risks);
    assert_eq!(
        degraded.compare(LEASE, LEASE, Language::English).match_method,
        MatchMethod::Lexical
    );
}

#[test]
fn scripted_parser_drives_responsibility_and_obligations() {
    let engine = ContractEngine::new()
        .with_capabilities(Capabilities::none().with_parser(Arc::new(ScriptedParser)));

    let clauses = clauses(&["The report was submitted."]);
    let result = engine.analyze_responsibility(&clauses, Language::English);
    assert_eq!(result.passive_voice.len(), 1);
    assert_eq!(result.passive_voice[0].method, AnalysisMethod::DependencyParse);
    assert_eq!(result.passive_voice[0].matched_text, "report ... submitted");

    let clauses = self::clauses(&["The Landlord shall repair the roof."]);
    let obligations = engine.detect_obligations(&clauses, Language::English);
    assert_eq!(obligations.len(), 1);
    assert_eq!(obligations[0].party.as_deref(), Some("The Landlord"));
    assert_eq!(obligations[0].action, "repair roof");

    let entities = engine.extract_entities("Agreement with Acme Builders.", Language::English);
    assert_eq!(entities.parties.len(), 1);
    assert_eq!(entities.parties[0].text, "Acme Builders");
}

#[test]
fn lazy_encoder_loads_once_under_concurrency() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let lazy = LazyCapability::<dyn SentenceEncoder>::new("bag-of-words", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(Arc::new(BagOfWordsEncoder) as Arc<dyn SentenceEncoder>)
    });

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| assert!(lazy.get().is_some()));
        }
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(lazy.is_initialized());
}

#[test]
fn lazy_encoder_shared_by_engine_operations() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let lazy = LazyCapability::<dyn SentenceEncoder>::new("bag-of-words", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(BagOfWordsEncoder) as Arc<dyn SentenceEncoder>)
    });
    let engine =
        ContractEngine::new().with_capabilities(Capabilities::none().with_lazy_encoder(lazy));

    engine.analyze(LEASE, AnalysisOptions::default());
    engine.compare(LEASE, LEASE, Language::English);

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_lazy_load_is_remembered() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let lazy = LazyCapability::<dyn SentenceEncoder>::new("missing-model", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::CapabilityUnavailable("model files not found".into()))
    });
    let engine =
        ContractEngine::new().with_capabilities(Capabilities::none().with_lazy_encoder(lazy));

    let first = engine.analyze(LEASE, AnalysisOptions::default());
    let second = engine.analyze(LEASE, AnalysisOptions::default());

    assert_eq!(first.risks, second.risks);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

// ============================================================
// Properties
// ============================================================

fn plain_sentence() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,10}){0,12}\\.".prop_map(|s| s.to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn segmentation_preserves_content(sentences in prop::collection::vec(plain_sentence(), 1..12)) {
        let text = sentences.join(" ");
        let clauses = ContractEngine::new().segment(&text, Language::English);

        let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let emitted: String = clauses
            .iter()
            .flat_map(|c| c.text.chars())
            .filter(|c| !c.is_whitespace())
            .collect();
        prop_assert_eq!(emitted, original);
    }

    #[test]
    fn segmentation_is_deterministic_with_sequential_ids(
        sentences in prop::collection::vec(plain_sentence(), 1..12)
    ) {
        let text = sentences.join(" ");
        let engine = ContractEngine::new();
        let first = engine.segment(&text, Language::English);
        let second = engine.segment(&text, Language::English);

        prop_assert_eq!(&first, &second);
        for (i, clause) in first.iter().enumerate() {
            prop_assert_eq!(clause.id, i + 1);
        }
    }

    #[test]
    fn risk_score_stays_in_bounds(
        picks in prop::collection::vec(0usize..4, 0..8)
    ) {
        const TEXTS: [&str; 4] = [
            "The Contractor shall be liable for all damages without any limitation.",
            "The Employee shall not compete with the Company anywhere in the world.",
            "This agreement shall automatically renew for successive one year terms.",
            "The Client shall pay the invoice within thirty days.",
        ];
        let texts: Vec<&str> = picks.iter().map(|i| TEXTS[*i]).collect();
        let report = ContractEngine::new().detect_risks(&clauses(&texts), Language::English);

        if report.findings.is_empty() {
            prop_assert_eq!(report.score, 5);
        } else {
            prop_assert!((5..=100).contains(&report.score));
        }
    }
}
