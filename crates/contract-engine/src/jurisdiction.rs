//! Jurisdiction profiles for risk and compliance adjustment
//!
//! Each profile carries its governing laws, the legal reference behind each
//! essential clause type, advisory notes per risk type and a severity
//! override table. Profiles are applied as pure transforms over detector
//! output; nothing here re-runs detection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_types::{ComplianceResult, RiskFinding, Severity};
use tracing::debug;

use crate::capabilities::JurisdictionRuleProvider;

/// Replacement severity for one risk type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityOverride {
    pub risk_type: String,
    pub severity: Severity,
    pub reason: String,
}

impl SeverityOverride {
    fn new(risk_type: &str, severity: Severity, reason: &str) -> Self {
        Self {
            risk_type: risk_type.to_string(),
            severity,
            reason: reason.to_string(),
        }
    }
}

/// Essential clause type with its jurisdiction-specific weight and authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredClause {
    pub clause_type: &'static str,
    pub weight: u32,
    pub reference: &'static str,
}

const fn required(clause_type: &'static str, weight: u32, reference: &'static str) -> RequiredClause {
    RequiredClause {
        clause_type,
        weight,
        reference,
    }
}

const INDIA_CLAUSES: &[RequiredClause] = &[
    required("governing_law", 10, "Section 73, Indian Contract Act"),
    required("dispute_resolution", 10, "Arbitration Act, 1996"),
    required("termination", 9, "Section 39-40, Indian Contract Act"),
    required("liability", 9, "Section 73-74, Indian Contract Act"),
    required("confidentiality", 8, "IT Act, Section 72A"),
    required("payment_terms", 9, "Section 56, Indian Contract Act"),
    required("force_majeure", 7, "Section 56, Doctrine of Frustration"),
    required("indemnity", 8, "Section 124-125, Indian Contract Act"),
    required("notice", 6, "General contract practice"),
    required("stamp_duty", 7, "Indian Stamp Act, 1899"),
    required(
        "non_compete",
        6,
        "Section 27, Indian Contract Act (void if unreasonable)",
    ),
];

const US_CLAUSES: &[RequiredClause] = &[
    required("governing_law", 10, "Choice of law principles"),
    required("dispute_resolution", 9, "Federal Arbitration Act"),
    required("termination", 9, "At-will vs for-cause termination"),
    required("liability", 10, "Common law liability principles"),
    required("confidentiality", 8, "Trade Secrets Act"),
    required("payment_terms", 9, "UCC Article 2"),
    required("force_majeure", 7, "Common law impracticability"),
    required("indemnity", 9, "Common law indemnification"),
    required("warranties", 8, "UCC implied warranties"),
    required("intellectual_property", 9, "Work for hire doctrine"),
];

const UK_CLAUSES: &[RequiredClause] = &[
    required("governing_law", 10, "Rome I Regulation (retained)"),
    required("dispute_resolution", 9, "Arbitration Act 1996"),
    required("termination", 9, "Common law; Employment Rights Act"),
    required("liability", 10, "Unfair Contract Terms Act 1977"),
    required("confidentiality", 8, "Common law duty; UK GDPR"),
    required("data_protection", 9, "UK GDPR, Data Protection Act 2018"),
    required("force_majeure", 7, "Common law frustration doctrine"),
    required(
        "payment_terms",
        8,
        "Late Payment of Commercial Debts Act 1998",
    ),
];

const GENERAL_CLAUSES: &[RequiredClause] = &[
    required("governing_law", 10, "Essential for international contracts"),
    required(
        "dispute_resolution",
        10,
        "Arbitration recommended for cross-border",
    ),
    required("termination", 9, "Standard practice"),
    required("liability", 9, "Standard practice"),
    required("confidentiality", 8, "Standard practice"),
    required("payment_terms", 9, "Standard practice"),
    required("force_majeure", 8, "ICC Force Majeure Clause 2020"),
    required("indemnity", 7, "Standard practice"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "india")]
    India,
    #[serde(rename = "us")]
    UnitedStates,
    #[serde(rename = "uk")]
    UnitedKingdom,
    #[default]
    #[serde(rename = "general")]
    General,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 4] = [
        Jurisdiction::India,
        Jurisdiction::UnitedStates,
        Jurisdiction::UnitedKingdom,
        Jurisdiction::General,
    ];

    /// Parse from code or name (case-insensitive)
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "india" | "in" => Some(Jurisdiction::India),
            "us" | "usa" | "united states" => Some(Jurisdiction::UnitedStates),
            "uk" | "gb" | "united kingdom" => Some(Jurisdiction::UnitedKingdom),
            "general" | "international" => Some(Jurisdiction::General),
            _ => None,
        }
    }

    /// Like [`Jurisdiction::parse_code`], unknown codes fall back to `General`
    pub fn from_code(s: &str) -> Self {
        Self::parse_code(s).unwrap_or(Jurisdiction::General)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::India => "india",
            Jurisdiction::UnitedStates => "us",
            Jurisdiction::UnitedKingdom => "uk",
            Jurisdiction::General => "general",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Jurisdiction::India => "India",
            Jurisdiction::UnitedStates => "United States",
            Jurisdiction::UnitedKingdom => "United Kingdom",
            Jurisdiction::General => "General / International",
        }
    }

    /// Governing laws by area
    pub fn laws(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Jurisdiction::India => &[
                ("contract", "Indian Contract Act, 1872"),
                (
                    "employment",
                    "Industrial Disputes Act, 1947; Shops and Establishments Act",
                ),
                ("it", "Information Technology Act, 2000"),
                ("consumer", "Consumer Protection Act, 2019"),
                ("arbitration", "Arbitration and Conciliation Act, 1996"),
                ("companies", "Companies Act, 2013"),
                (
                    "ip",
                    "Patents Act, 1970; Copyright Act, 1957; Trademarks Act, 1999",
                ),
                ("privacy", "Digital Personal Data Protection Act, 2023"),
            ],
            Jurisdiction::UnitedStates => &[
                (
                    "contract",
                    "Uniform Commercial Code (UCC); Restatement of Contracts",
                ),
                (
                    "employment",
                    "Fair Labor Standards Act; National Labor Relations Act",
                ),
                ("privacy", "CCPA (California); State privacy laws"),
                (
                    "ip",
                    "17 U.S.C. (Copyright); 35 U.S.C. (Patent); Lanham Act (Trademark)",
                ),
                ("arbitration", "Federal Arbitration Act"),
            ],
            Jurisdiction::UnitedKingdom => &[
                (
                    "contract",
                    "Contract Act (common law); Unfair Contract Terms Act 1977",
                ),
                ("employment", "Employment Rights Act 1996; Equality Act 2010"),
                ("privacy", "UK GDPR; Data Protection Act 2018"),
                ("consumer", "Consumer Rights Act 2015"),
            ],
            Jurisdiction::General => &[
                ("contract", "General contract law principles"),
                (
                    "trade",
                    "CISG (UN Convention on Contracts for the International Sale of Goods)",
                ),
            ],
        }
    }

    pub fn required_clauses(&self) -> &'static [RequiredClause] {
        match self {
            Jurisdiction::India => INDIA_CLAUSES,
            Jurisdiction::UnitedStates => US_CLAUSES,
            Jurisdiction::UnitedKingdom => UK_CLAUSES,
            Jurisdiction::General => GENERAL_CLAUSES,
        }
    }

    /// Advisory note for a risk type, if this jurisdiction has one
    pub fn risk_note(&self, risk_type: &str) -> Option<&'static str> {
        let notes: &[(&str, &str)] = match self {
            Jurisdiction::India => &[
                ("non_compete", "Non-compete clauses are generally void under Section 27 of Indian Contract Act unless during employment."),
                ("unlimited_liability", "Courts may reduce penalty under Section 74 if deemed unreasonable."),
                ("exclusive_jurisdiction", "Parties can agree on jurisdiction but courts retain protective jurisdiction."),
            ],
            Jurisdiction::UnitedStates => &[
                ("non_compete", "Enforceability varies by state. California bans most non-competes."),
                ("auto_renewal", "Many states require advance notice before auto-renewal (e.g., NY GBL § 527-a)."),
            ],
            Jurisdiction::UnitedKingdom => &[
                ("unlimited_liability", "UCTA 1977 restricts exclusion of liability for negligence causing injury."),
                ("non_compete", "Must be reasonable in scope, duration, and geography to be enforceable."),
            ],
            Jurisdiction::General => &[],
        };
        notes
            .iter()
            .find(|(kind, _)| *kind == risk_type)
            .map(|(_, note)| *note)
    }

    pub fn severity_overrides(&self) -> Vec<SeverityOverride> {
        match self {
            Jurisdiction::India => vec![
                SeverityOverride::new(
                    "non_compete_broad",
                    Severity::High,
                    "Non-compete clauses are generally void under Section 27 of Indian Contract Act. High risk of unenforceability.",
                ),
                SeverityOverride::new(
                    "unlimited_liability",
                    Severity::High,
                    "Courts may reduce penalty under Section 74, but unlimited liability poses significant risk.",
                ),
                SeverityOverride::new(
                    "exclusive_jurisdiction",
                    Severity::Low,
                    "Indian courts retain protective jurisdiction regardless of contractual clause.",
                ),
                SeverityOverride::new(
                    "auto_renewal",
                    Severity::Medium,
                    "Auto-renewal is generally valid but must be clearly communicated.",
                ),
            ],
            Jurisdiction::UnitedStates => vec![
                SeverityOverride::new(
                    "non_compete_broad",
                    Severity::Medium,
                    "Enforceability varies by state. California bans most non-competes; other states may enforce if reasonable.",
                ),
                SeverityOverride::new(
                    "unlimited_liability",
                    Severity::High,
                    "US courts may enforce unlimited liability unless unconscionable.",
                ),
                SeverityOverride::new(
                    "auto_renewal",
                    Severity::Medium,
                    "Many states require advance cancellation notice. Check state-specific laws.",
                ),
                SeverityOverride::new(
                    "waiver_of_rights",
                    Severity::High,
                    "Broad waivers may be challenged as unconscionable but can be enforced.",
                ),
            ],
            Jurisdiction::UnitedKingdom => vec![
                SeverityOverride::new(
                    "non_compete_broad",
                    Severity::Medium,
                    "Must be reasonable in scope, duration, and geography to be enforceable under UK common law.",
                ),
                SeverityOverride::new(
                    "unlimited_liability",
                    Severity::High,
                    "UCTA 1977 restricts exclusion of liability for negligence causing personal injury.",
                ),
                SeverityOverride::new(
                    "exclusive_jurisdiction",
                    Severity::Low,
                    "Generally enforceable but may be challenged under consumer protection laws.",
                ),
            ],
            Jurisdiction::General => Vec::new(),
        }
    }

    /// (clause type, legal reference) for every required clause
    pub fn legal_references(&self) -> Vec<(String, String)> {
        self.required_clauses()
            .iter()
            .map(|c| (c.clause_type.to_string(), c.reference.to_string()))
            .collect()
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Rule provider backed by the four built-in profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinJurisdictions;

impl JurisdictionRuleProvider for BuiltinJurisdictions {
    fn legal_references(&self, code: &str) -> Vec<(String, String)> {
        Jurisdiction::from_code(code).legal_references()
    }

    fn severity_overrides(&self, code: &str) -> Vec<SeverityOverride> {
        Jurisdiction::from_code(code).severity_overrides()
    }
}

/// Apply severity overrides to a copy of the findings.
///
/// Overridden findings record their previous severity, carry the override
/// reason as a note and are re-scored from the new severity.
pub fn adjust_risk_severity(
    findings: &[RiskFinding],
    overrides: &[SeverityOverride],
) -> Vec<RiskFinding> {
    let by_type: HashMap<&str, &SeverityOverride> = overrides
        .iter()
        .map(|o| (o.risk_type.as_str(), o))
        .collect();

    findings
        .iter()
        .map(|finding| {
            let mut finding = finding.clone();
            if let Some(rule) = by_type.get(finding.risk_type.as_str()) {
                debug!(
                    risk_type = %finding.risk_type,
                    from = %finding.severity,
                    to = %rule.severity,
                    "Severity adjusted"
                );
                finding.original_severity = Some(finding.severity);
                finding.severity = rule.severity;
                finding.risk_score = rule.severity.base_score();
                finding.jurisdiction_note = Some(rule.reason.clone());
            }
            finding
        })
        .collect()
}

/// Attach legal references to compliance details and missing clauses
pub fn annotate_compliance(
    result: &ComplianceResult,
    references: &[(String, String)],
) -> ComplianceResult {
    let lookup: HashMap<&str, &str> = references
        .iter()
        .map(|(kind, reference)| (kind.as_str(), reference.as_str()))
        .collect();
    let reference_for = |clause_type: &str| lookup.get(clause_type).map(|r| r.to_string());

    let mut annotated = result.clone();
    for detail in &mut annotated.details {
        detail.legal_reference = reference_for(&detail.clause_type);
    }
    for missing in &mut annotated.missing_clauses {
        missing.legal_reference = reference_for(&missing.clause_type);
    }
    annotated
}
