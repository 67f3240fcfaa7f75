pub mod analysis;
pub mod capabilities;
pub mod compare;
pub mod config;
pub mod contract_types;
pub mod detectors;
pub mod error;
pub mod explanations;
pub mod extractors;
pub mod jurisdiction;
pub mod patterns;
pub mod segmenter;
pub mod similarity;
pub mod summarizer;
pub mod text;
pub mod timeline;

pub use analysis::AnalysisOptions;
pub use capabilities::{
    Capabilities, DependencyParser, JurisdictionRuleProvider, LanguageIdentifier, LazyCapability,
    ScriptLanguageIdentifier, SentenceEncoder,
};
pub use compare::NamedText;
pub use config::EngineConfig;
pub use contract_types::ContractType;
pub use error::{EngineError, Result};
pub use jurisdiction::{BuiltinJurisdictions, Jurisdiction, SeverityOverride};

use shared_types::{
    Clause, ComparisonResult, ComplianceResult, ContractAnalysis, EntitySet, Explanations,
    Language, Obligation, ResponsibilityResult, RiskFinding, RiskReport, Timeline,
};

/// ContractEngine entry point
///
/// Holds the tuning configuration and the optional capabilities. Every
/// operation works without capabilities and degrades to its pattern layer
/// when one is missing or fails.
pub struct ContractEngine {
    config: EngineConfig,
    capabilities: Capabilities,
    language_identifier: Box<dyn LanguageIdentifier>,
    jurisdiction_rules: Box<dyn JurisdictionRuleProvider>,
}

impl ContractEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            capabilities: Capabilities::none(),
            language_identifier: Box::new(ScriptLanguageIdentifier),
            jurisdiction_rules: Box::new(BuiltinJurisdictions),
        }
    }

    /// Engine configured from `CLAUSECHECK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(EngineConfig::from_env()?))
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_language_identifier(mut self, identifier: impl LanguageIdentifier + 'static) -> Self {
        self.language_identifier = Box::new(identifier);
        self
    }

    pub fn with_jurisdiction_rules(
        mut self,
        rules: impl JurisdictionRuleProvider + 'static,
    ) -> Self {
        self.jurisdiction_rules = Box::new(rules);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub(crate) fn jurisdiction_rules(&self) -> &dyn JurisdictionRuleProvider {
        self.jurisdiction_rules.as_ref()
    }

    pub fn detect_language(&self, text: &str) -> Language {
        self.language_identifier.detect(text)
    }

    pub fn segment(&self, text: &str, language: Language) -> Vec<Clause> {
        segmenter::segment(text, language, &self.config)
    }

    pub fn detect_risks(&self, clauses: &[Clause], language: Language) -> RiskReport {
        let encoder = self.capabilities.encoder();
        detectors::risk::detect_risks(clauses, language, encoder.as_deref(), &self.config)
    }

    pub fn check_compliance(
        &self,
        clauses: &[Clause],
        full_text: &str,
        language: Language,
    ) -> ComplianceResult {
        detectors::compliance::check_compliance(clauses, full_text, language)
    }

    pub fn detect_obligations(&self, clauses: &[Clause], language: Language) -> Vec<Obligation> {
        let parser = self.capabilities.parser();
        detectors::obligations::detect_obligations(clauses, language, parser.as_deref(), &self.config)
    }

    pub fn analyze_responsibility(
        &self,
        clauses: &[Clause],
        language: Language,
    ) -> ResponsibilityResult {
        let parser = self.capabilities.parser();
        detectors::responsibility::analyze_responsibility(
            clauses,
            language,
            parser.as_deref(),
            &self.config,
        )
    }

    pub fn extract_entities(&self, text: &str, language: Language) -> EntitySet {
        let parser = self.capabilities.parser();
        extractors::extract_entities(text, language, parser.as_deref())
    }

    pub fn extract_timeline(&self, clauses: &[Clause], entities: &EntitySet) -> Timeline {
        timeline::extract_timeline(clauses, entities)
    }

    /// Extractive summary of `config.summary_sentences` sentences
    pub fn summarize(&self, text: &str) -> String {
        summarizer::summarize(text, self.config.summary_sentences)
    }

    pub fn explain(
        &self,
        risks: &[RiskFinding],
        compliance: &ComplianceResult,
        language: Language,
    ) -> Explanations {
        explanations::explain(risks, compliance, language)
    }

    /// Run every detector over one document.
    ///
    /// The language comes from `options` or, when absent, from the engine's
    /// language identifier.
    pub fn analyze(&self, text: &str, options: AnalysisOptions) -> ContractAnalysis {
        analysis::run(self, text, options)
    }

    /// Compare two versions, named "Document 1" and "Document 2"
    pub fn compare(&self, text1: &str, text2: &str, language: Language) -> ComparisonResult {
        self.compare_named(
            NamedText::new("Document 1", text1),
            NamedText::new("Document 2", text2),
            language,
        )
    }

    pub fn compare_named(
        &self,
        doc1: NamedText<'_>,
        doc2: NamedText<'_>,
        language: Language,
    ) -> ComparisonResult {
        let encoder = self.capabilities.encoder();
        compare::compare_contracts(doc1, doc2, language, encoder.as_deref(), &self.config)
    }
}

impl Default for ContractEngine {
    fn default() -> Self {
        Self::new()
    }
}
