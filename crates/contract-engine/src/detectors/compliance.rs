//! Essential-clause compliance
//!
//! Presence is a case-insensitive keyword search over the whole document.
//! Present clause types that have a structural validator are scored on how
//! many of its sub-checks pass, starting from the validator's floor.

use shared_types::{
    ClauseDetail, Clause, ComplianceResult, ImportanceTier, Language, MissingClause, QualityCheck,
};
use tracing::{debug, info};

use crate::patterns::{self, QualityValidator};
use crate::text::round2;

pub fn check_compliance(clauses: &[Clause], full_text: &str, language: Language) -> ComplianceResult {
    let checklist = patterns::checklist(language);
    let text_lower = full_text.to_lowercase();
    let clauses_lower: Vec<String> = clauses.iter().map(|c| c.text.to_lowercase()).collect();

    let total_weight: u32 = checklist.iter().map(|item| item.weight).sum();
    let mut earned = 0.0;
    let mut found_clauses = Vec::new();
    let mut missing_clauses = Vec::new();
    let mut details = Vec::with_capacity(checklist.len());

    for item in checklist {
        let matched_keyword = item
            .keywords
            .iter()
            .find(|keyword| text_lower.contains(&keyword.to_lowercase()))
            .copied();

        let (quality, quality_checks) = match matched_keyword {
            Some(_) => match patterns::quality_validator(language, item.clause_type) {
                Some(validator) => validate_quality(&text_lower, validator),
                None => (1.0, Vec::new()),
            },
            None => (0.0, Vec::new()),
        };

        let clause_id = matched_keyword.and_then(|keyword| {
            let keyword = keyword.to_lowercase();
            clauses
                .iter()
                .zip(&clauses_lower)
                .find(|(_, lower)| lower.contains(&keyword))
                .map(|(clause, _)| clause.id)
        });

        if matched_keyword.is_some() {
            found_clauses.push(item.clause_type.to_string());
            earned += item.weight as f64 * quality;
        } else {
            missing_clauses.push(MissingClause {
                clause_type: item.clause_type.to_string(),
                description: item.description.to_string(),
                weight: item.weight,
                importance: ImportanceTier::from_weight(item.weight),
                legal_reference: None,
            });
        }

        debug!(
            clause_type = item.clause_type,
            found = matched_keyword.is_some(),
            quality,
            "Checklist item evaluated"
        );

        details.push(ClauseDetail {
            clause_type: item.clause_type.to_string(),
            description: item.description.to_string(),
            weight: item.weight,
            found: matched_keyword.is_some(),
            matched_keyword: matched_keyword.map(str::to_string),
            clause_id,
            quality_score: round2(quality),
            quality_checks,
            legal_reference: None,
        });
    }

    let score = if total_weight > 0 {
        (100.0 * earned / total_weight as f64).round() as u32
    } else {
        0
    };

    info!(
        found = found_clauses.len(),
        checked = checklist.len(),
        score,
        "Compliance check complete"
    );

    ComplianceResult {
        score: score.min(100),
        total_checked: checklist.len(),
        total_found: found_clauses.len(),
        total_missing: missing_clauses.len(),
        found_clauses,
        missing_clauses,
        details,
    }
}

/// `weight_factor + (1 - weight_factor) * passed / total`
fn validate_quality(text_lower: &str, validator: &QualityValidator) -> (f64, Vec<QualityCheck>) {
    let checks: Vec<QualityCheck> = validator
        .checks
        .iter()
        .map(|rule| QualityCheck {
            name: rule.name.to_string(),
            label: rule.label.to_string(),
            passed: rule.patterns.iter().any(|p| p.is_match(text_lower)),
        })
        .collect();

    if checks.is_empty() {
        return (1.0, checks);
    }

    let passed = checks.iter().filter(|c| c.passed).count() as f64;
    let quality =
        validator.weight_factor + (1.0 - validator.weight_factor) * passed / checks.len() as f64;
    (quality, checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> ComplianceResult {
        let clauses = vec![Clause::new(1, text, "")];
        check_compliance(&clauses, text, Language::English)
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let result = check_compliance(&[], "", Language::English);
        assert_eq!(result.score, 0);
        assert_eq!(result.total_checked, 12);
        assert_eq!(result.total_found, 0);
        assert_eq!(result.total_missing, 12);
    }

    #[test]
    fn test_missing_termination_is_critical() {
        let result = run("The Buyer shall pay the fee within 30 days.");
        let missing = result
            .missing_clauses
            .iter()
            .find(|m| m.clause_type == "termination")
            .unwrap();
        assert_eq!(missing.weight, 10);
        assert_eq!(missing.importance, ImportanceTier::Critical);
        assert!(result.found_clauses.contains(&"payment_terms".to_string()));
    }

    #[test]
    fn test_first_keyword_is_recorded() {
        let result = run("Upon expiry or termination of this agreement the goods return.");
        let detail = result.detail("termination").unwrap();
        assert!(detail.found);
        // "terminat" comes before "expiry" in the keyword list
        assert_eq!(detail.matched_keyword.as_deref(), Some("terminat"));
        assert_eq!(detail.clause_id, Some(1));
    }

    #[test]
    fn test_quality_floor_and_partial_credit() {
        // Termination present, no sub-check passes: quality is the 0.6 floor
        let result = run("This contract ends on termination.");
        let detail = result.detail("termination").unwrap();
        assert_eq!(detail.quality_score, 0.6);
        assert_eq!(detail.quality_checks.len(), 4);
        assert!(detail.quality_checks.iter().all(|c| !c.passed));

        // Two of four checks pass: 0.6 + 0.4 * 0.5
        let result =
            run("Either party may end this contract by termination with 30 days written notice.");
        let detail = result.detail("termination").unwrap();
        assert_eq!(detail.quality_score, 0.8);
    }

    #[test]
    fn test_found_without_validator_has_full_quality() {
        let result = run("Any amendment must be in writing.");
        let detail = result.detail("amendment").unwrap();
        assert!(detail.found);
        assert_eq!(detail.quality_score, 1.0);
        assert!(detail.quality_checks.is_empty());
    }

    #[test]
    fn test_score_weighting() {
        // Only amendment (6 of 96) with full quality: round(6.25) = 6
        let result = run("Any amendment must be in writing.");
        assert_eq!(result.found_clauses, vec!["amendment".to_string()]);
        assert_eq!(result.score, 6);
    }

    #[test]
    fn test_hindi_checklist() {
        let text = "भुगतान तीस दिनों में किया जाएगा। किसी भी विवाद का समाधान मध्यस्थता से होगा।";
        let clauses = vec![Clause::new(1, text, "")];
        let result = check_compliance(&clauses, text, Language::Hindi);
        assert_eq!(result.total_checked, 5);
        assert!(result.found_clauses.contains(&"payment_terms".to_string()));
        assert!(result.found_clauses.contains(&"dispute_resolution".to_string()));
        assert!(result.is_missing("termination"));
        // (9 + 9) / 47 = 38.3
        assert_eq!(result.score, 38);
    }
}
