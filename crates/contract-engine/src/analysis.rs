//! Full single-document analysis pipeline

use shared_types::{ContractAnalysis, Language};
use tracing::info;

use crate::contract_types::ContractType;
use crate::detectors::obligations::party_balance_at;
use crate::detectors::risk::overall_risk_score;
use crate::extractors::extract_entities;
use crate::jurisdiction::{adjust_risk_severity, annotate_compliance, Jurisdiction};
use crate::timeline::extract_timeline;
use crate::ContractEngine;

/// Knobs for [`ContractEngine::analyze`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Skip identification and analyze in this language
    pub language: Option<Language>,
    /// Adjust risk severities and annotate compliance for this jurisdiction
    pub jurisdiction: Option<Jurisdiction>,
    /// Attach the focus areas for this kind of contract
    pub contract_type: Option<ContractType>,
}

impl AnalysisOptions {
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    pub fn with_contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = Some(contract_type);
        self
    }
}

pub(crate) fn run(engine: &ContractEngine, text: &str, options: AnalysisOptions) -> ContractAnalysis {
    let language = options
        .language
        .unwrap_or_else(|| engine.detect_language(text));
    let clauses = engine.segment(text, language);

    let parser = engine.capabilities().parser();
    let entities = extract_entities(text, language, parser.as_deref());

    let (((mut risks, mut compliance), (obligations, responsibility)), summary) = rayon::join(
        || {
            rayon::join(
                || {
                    rayon::join(
                        || engine.detect_risks(&clauses, language),
                        || engine.check_compliance(&clauses, text, language),
                    )
                },
                || {
                    rayon::join(
                        || engine.detect_obligations(&clauses, language),
                        || engine.analyze_responsibility(&clauses, language),
                    )
                },
            )
        },
        || engine.summarize(text),
    );

    let party_balance = party_balance_at(&obligations, engine.config().power_imbalance_ratio);
    let timeline = extract_timeline(&clauses, &entities);

    let jurisdiction = options.jurisdiction.map(|jurisdiction| {
        let rules = engine.jurisdiction_rules();
        let code = jurisdiction.code();

        risks.findings = adjust_risk_severity(&risks.findings, &rules.severity_overrides(code));
        risks.score = overall_risk_score(&risks.findings);
        compliance = annotate_compliance(&compliance, &rules.legal_references(code));
        code.to_string()
    });

    // After jurisdiction overrides so severities match the reported risks
    let explanations = engine.explain(&risks.findings, &compliance, language);

    info!(
        language = %language,
        clauses = clauses.len(),
        risk_score = risks.score,
        compliance_score = compliance.score,
        obligations = obligations.len(),
        events = timeline.len(),
        jurisdiction = jurisdiction.as_deref().unwrap_or("none"),
        "Contract analysis complete"
    );

    ContractAnalysis {
        language,
        clauses,
        entities,
        obligations,
        party_balance,
        risks,
        compliance,
        responsibility,
        timeline,
        jurisdiction,
        contract_type: options.contract_type.map(|t| t.profile()),
        summary,
        explanations,
    }
}
