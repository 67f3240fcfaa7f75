//! Essential-clause checklist results.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    Critical,
    Important,
    Recommended,
}

impl ImportanceTier {
    /// weight >= 9 is critical, >= 7 important, anything lower recommended.
    pub fn from_weight(weight: u32) -> Self {
        if weight >= 9 {
            ImportanceTier::Critical
        } else if weight >= 7 {
            ImportanceTier::Important
        } else {
            ImportanceTier::Recommended
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QualityCheck {
    pub name: String,
    pub label: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClauseDetail {
    pub clause_type: String,
    pub description: String,
    pub weight: u32,
    pub found: bool,
    pub matched_keyword: Option<String>,
    /// First clause whose text contains the matched keyword.
    pub clause_id: Option<usize>,
    pub quality_score: f64,
    pub quality_checks: Vec<QualityCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissingClause {
    pub clause_type: String,
    pub description: String,
    pub weight: u32,
    pub importance: ImportanceTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceResult {
    pub score: u32,
    pub found_clauses: Vec<String>,
    pub missing_clauses: Vec<MissingClause>,
    pub details: Vec<ClauseDetail>,
    pub total_checked: usize,
    pub total_found: usize,
    pub total_missing: usize,
}

impl ComplianceResult {
    pub fn is_missing(&self, clause_type: &str) -> bool {
        self.missing_clauses
            .iter()
            .any(|m| m.clause_type == clause_type)
    }

    pub fn detail(&self, clause_type: &str) -> Option<&ClauseDetail> {
        self.details.iter().find(|d| d.clause_type == clause_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_tiers_follow_weight_thresholds() {
        assert_eq!(ImportanceTier::from_weight(10), ImportanceTier::Critical);
        assert_eq!(ImportanceTier::from_weight(9), ImportanceTier::Critical);
        assert_eq!(ImportanceTier::from_weight(8), ImportanceTier::Important);
        assert_eq!(ImportanceTier::from_weight(7), ImportanceTier::Important);
        assert_eq!(ImportanceTier::from_weight(6), ImportanceTier::Recommended);
        assert_eq!(ImportanceTier::from_weight(0), ImportanceTier::Recommended);
    }

    #[test]
    fn test_default_result_is_empty() {
        let result = ComplianceResult::default();
        assert_eq!(result.score, 0);
        assert!(!result.is_missing("termination"));
        assert!(result.detail("termination").is_none());
    }
}
