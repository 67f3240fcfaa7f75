//! Detector outputs that reference clauses by id.

use std::collections::BTreeMap;

use crate::types::Severity;

/// Which layer of the risk detector produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Pattern,
    Semantic,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RiskFinding {
    pub clause_id: usize,
    pub clause_text: String,
    pub risk_type: String,
    pub severity: Severity,
    pub description: String,
    pub matched_text: String,
    pub risk_score: u32,
    pub detection_method: DetectionMethod,
    /// Severity before a jurisdiction override; `None` when never adjusted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RiskReport {
    pub findings: Vec<RiskFinding>,
    pub score: u32,
}

impl RiskReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationStrength {
    Mandatory,
    Recommended,
    Optional,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationType {
    #[default]
    Unilateral,
    Mutual,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obligation {
    pub clause_id: usize,
    pub text: String, // sentence the modal was found in
    pub strength: ObligationStrength,
    pub modal: String,
    pub party: Option<String>,
    pub action: String,
    pub deadline: Option<String>,
    pub condition: Option<String>,
    pub obligation_type: ObligationType,
    pub is_passive: bool,
}

/// Distribution of obligations over normalized party names.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartyBalance {
    pub party_counts: BTreeMap<String, usize>,
    pub dominant_party: Option<String>,
    pub dominant_share: f64,
    pub is_imbalanced: bool,
}

/// How a responsibility finding was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    DependencyParse,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PassiveVoiceFinding {
    pub clause_id: usize,
    pub sentence: String,
    pub matched_text: String,
    pub confidence: f64,
    pub method: AnalysisMethod,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VagueTermFinding {
    pub clause_id: usize,
    pub term: String,
    pub context: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissingSubjectFinding {
    pub clause_id: usize,
    pub matched_text: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResponsibilityResult {
    pub passive_voice: Vec<PassiveVoiceFinding>,
    pub vague_terms: Vec<VagueTermFinding>,
    pub missing_subjects: Vec<MissingSubjectFinding>,
    pub total_issues: usize,
    pub ambiguity_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> RiskFinding {
        RiskFinding {
            clause_id: 1,
            clause_text: "text".to_string(),
            risk_type: "auto_renewal".to_string(),
            severity,
            description: String::new(),
            matched_text: String::new(),
            risk_score: severity.base_score(),
            detection_method: DetectionMethod::Pattern,
            original_severity: None,
            jurisdiction_note: None,
        }
    }

    #[test]
    fn test_risk_report_counts_by_severity() {
        let report = RiskReport {
            findings: vec![
                finding(Severity::High),
                finding(Severity::High),
                finding(Severity::Low),
            ],
            score: 50,
        };
        assert_eq!(report.count(Severity::High), 2);
        assert_eq!(report.count(Severity::Medium), 0);
        assert_eq!(report.count(Severity::Low), 1);
    }

    #[test]
    fn test_unadjusted_finding_omits_jurisdiction_fields() {
        let json = serde_json::to_value(finding(Severity::Medium)).unwrap();
        assert!(json.get("original_severity").is_none());
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["detection_method"], "pattern");
    }

    #[test]
    fn test_obligation_enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ObligationStrength::Mandatory).unwrap(),
            "\"mandatory\""
        );
        assert_eq!(
            serde_json::to_string(&ObligationType::Mutual).unwrap(),
            "\"mutual\""
        );
    }
}
