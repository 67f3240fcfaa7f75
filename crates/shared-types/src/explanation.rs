//! Plain-language explanations of findings.

use crate::compliance::ImportanceTier;
use crate::types::Severity;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RiskExplanation {
    pub clause_id: usize,
    pub risk_type: String,
    pub severity: Severity,
    pub explanation: String,
    pub flagged_text: String,
    pub clause_excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceExplanation {
    pub clause_type: String,
    pub importance: ImportanceTier,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Explanations {
    pub risk_explanations: Vec<RiskExplanation>,
    pub compliance_explanations: Vec<ComplianceExplanation>,
    pub overall_summary: String,
}

/// Focus areas and extra review points for one kind of contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContractTypeProfile {
    pub code: String,
    pub name: String,
    pub focus: Vec<String>,
    pub extra_checks: Vec<String>,
}
