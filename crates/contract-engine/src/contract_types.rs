//! Contract kinds and the areas worth checking closely in each

use serde::{Deserialize, Serialize};
use shared_types::ContractTypeProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    #[default]
    General,
    Employment,
    Nda,
    Service,
    Rental,
    Freelance,
}

impl ContractType {
    pub const ALL: [ContractType; 6] = [
        ContractType::General,
        ContractType::Employment,
        ContractType::Nda,
        ContractType::Service,
        ContractType::Rental,
        ContractType::Freelance,
    ];

    /// Parse a code (case-insensitive)
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "general" => Some(ContractType::General),
            "employment" => Some(ContractType::Employment),
            "nda" => Some(ContractType::Nda),
            "service" => Some(ContractType::Service),
            "rental" | "lease" => Some(ContractType::Rental),
            "freelance" | "consulting" => Some(ContractType::Freelance),
            _ => None,
        }
    }

    /// Unknown codes fall back to `General`
    pub fn from_code(s: &str) -> Self {
        Self::parse_code(s).unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContractType::General => "general",
            ContractType::Employment => "employment",
            ContractType::Nda => "nda",
            ContractType::Service => "service",
            ContractType::Rental => "rental",
            ContractType::Freelance => "freelance",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContractType::General => "General Contract",
            ContractType::Employment => "Employment Contract",
            ContractType::Nda => "Non-Disclosure Agreement",
            ContractType::Service => "Service Agreement",
            ContractType::Rental => "Rental Agreement",
            ContractType::Freelance => "Freelance/Consulting",
        }
    }

    pub fn focus(&self) -> &'static [&'static str] {
        match self {
            ContractType::General => &[],
            ContractType::Employment => &[
                "non_compete",
                "notice",
                "termination",
                "confidentiality",
                "benefits",
            ],
            ContractType::Nda => &["confidentiality", "duration", "scope", "exclusions"],
            ContractType::Service => &[
                "payment_terms",
                "deliverables",
                "intellectual_property",
                "liability",
            ],
            ContractType::Rental => &["payment_terms", "termination", "notice", "maintenance"],
            ContractType::Freelance => &[
                "payment_terms",
                "intellectual_property",
                "termination",
                "scope",
            ],
        }
    }

    pub fn extra_checks(&self) -> &'static [&'static str] {
        match self {
            ContractType::General => &[],
            ContractType::Employment => &[
                "probation period",
                "notice period",
                "non-compete",
                "non-solicitation",
                "benefits",
            ],
            ContractType::Nda => &[
                "definition of confidential info",
                "duration of obligation",
                "exclusions",
                "return of materials",
            ],
            ContractType::Service => &[
                "scope of work",
                "delivery schedule",
                "acceptance criteria",
                "IP ownership",
            ],
            ContractType::Rental => &[
                "security deposit",
                "rent escalation",
                "maintenance responsibility",
                "subletting",
            ],
            ContractType::Freelance => &[
                "deliverables",
                "payment schedule",
                "IP ownership",
                "independent contractor status",
            ],
        }
    }

    pub fn profile(&self) -> ContractTypeProfile {
        ContractTypeProfile {
            code: self.code().to_string(),
            name: self.name().to_string(),
            focus: self.focus().iter().map(|s| s.to_string()).collect(),
            extra_checks: self.extra_checks().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for contract_type in ContractType::ALL {
            assert_eq!(ContractType::parse_code(contract_type.code()), Some(contract_type));
        }
        assert_eq!(ContractType::parse_code(" NDA "), Some(ContractType::Nda));
        assert_eq!(ContractType::parse_code("lease"), Some(ContractType::Rental));
        assert_eq!(ContractType::parse_code("charter"), None);
        assert_eq!(ContractType::from_code("charter"), ContractType::General);
    }

    #[test]
    fn test_profiles() {
        let rental = ContractType::Rental.profile();
        assert_eq!(rental.name, "Rental Agreement");
        assert_eq!(rental.focus, vec!["payment_terms", "termination", "notice", "maintenance"]);
        assert!(rental.extra_checks.contains(&"security deposit".to_string()));

        let general = ContractType::General.profile();
        assert!(general.focus.is_empty());
        assert!(general.extra_checks.is_empty());
    }

    #[test]
    fn test_every_specific_type_has_focus_areas() {
        assert!(ContractType::ALL
            .iter()
            .filter(|t| **t != ContractType::General)
            .all(|t| !t.focus().is_empty() && !t.extra_checks().is_empty()));
    }
}
