//! Top-level analysis and comparison records.

use crate::compliance::ComplianceResult;
use crate::explanation::{ContractTypeProfile, Explanations};
use crate::findings::{Obligation, PartyBalance, ResponsibilityResult, RiskReport};
use crate::timeline::{EntitySet, Timeline};
use crate::types::{Clause, Language};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContractAnalysis {
    pub language: Language,
    pub clauses: Vec<Clause>,
    pub entities: EntitySet,
    pub obligations: Vec<Obligation>,
    pub party_balance: PartyBalance,
    pub risks: RiskReport,
    pub compliance: ComplianceResult,
    pub responsibility: ResponsibilityResult,
    pub timeline: Timeline,
    /// Jurisdiction code applied to risks and compliance, if any.
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractTypeProfile>,
    /// Extractive summary of the full text.
    pub summary: String,
    pub explanations: Explanations,
}

/// Alignment of one document-1 clause, by index into each clause list.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClauseMatch {
    pub index1: usize,
    pub index2: Option<usize>, // None = removed
    pub similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Modified,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WordChange {
    pub kind: ChangeKind,
    pub old: String,
    pub new: String,
}

/// A clause present in only one document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClauseChange {
    pub clause: Clause,
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModifiedClause {
    pub clause1: Clause,
    pub clause2: Clause,
    pub similarity: f64,
    pub changes: Vec<WordChange>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnchangedClause {
    pub clause1_id: usize,
    pub clause2_id: usize,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub clause_count: usize,
    pub risk_score: u32,
    pub compliance_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerShift {
    RiskIncreased,
    RiskDecreased,
    Similar,
}

impl PowerShift {
    pub fn description(&self) -> &'static str {
        match self {
            PowerShift::RiskIncreased => "Risk increased in the second document",
            PowerShift::RiskDecreased => "Risk decreased in the second document",
            PowerShift::Similar => "Risk levels are similar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Lexical,
    Semantic,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonResult {
    pub document1: DocumentSummary,
    pub document2: DocumentSummary,
    pub matches: Vec<ClauseMatch>,
    pub added: Vec<ClauseChange>,
    pub removed: Vec<ClauseChange>,
    pub modified: Vec<ModifiedClause>,
    pub unchanged: Vec<UnchangedClause>,
    pub risk_delta: i32,
    pub compliance_delta: i32,
    pub power_shift: PowerShift,
    pub match_method: MatchMethod,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_shift_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PowerShift::RiskIncreased).unwrap(),
            "\"risk_increased\""
        );
        assert_eq!(PowerShift::Similar.description(), "Risk levels are similar");
    }

    #[test]
    fn test_removed_match_has_no_second_index() {
        let m = ClauseMatch {
            index1: 3,
            index2: None,
            similarity: 0.12,
        };
        let json = serde_json::to_value(m).unwrap();
        assert!(json["index2"].is_null());
    }
}
