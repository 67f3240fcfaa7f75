use std::fmt;

/// Document language used to pick pattern tables.
///
/// Only English and Hindi carry their own tables; every other code maps to English.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// Resolve a language code. Devanagari-script relatives share the Hindi tables.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "hi" | "mr" | "ne" | "sa" | "hindi" => Language::Hindi,
            _ => Language::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One segmented unit of a contract.
///
/// `id` is 1-based and only stable within a single segmentation run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Clause {
    pub id: usize,
    pub text: String,
    pub section_number: String, // e.g. "1.2", "a", "IV"; empty when unnumbered
}

impl Clause {
    pub fn new(id: usize, text: impl Into<String>, section_number: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            section_number: section_number.into(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Score contributed by a pattern-layer finding.
    pub fn base_score(&self) -> u32 {
        match self {
            Severity::High => 8,
            Severity::Medium => 5,
            Severity::Low => 2,
        }
    }

    /// Slightly reduced score for semantic-layer findings.
    pub fn semantic_score(&self) -> u32 {
        match self {
            Severity::High => 7,
            Severity::Medium => 4,
            Severity::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_code_falls_back_to_english() {
        assert_eq!(Language::from_code("hi"), Language::Hindi);
        assert_eq!(Language::from_code(" MR "), Language::Hindi);
        assert_eq!(Language::from_code("fr"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
    }

    #[test]
    fn test_language_serializes_as_code() {
        let json = serde_json::to_string(&Language::Hindi).unwrap();
        assert_eq!(json, "\"hi\"");
        let back: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Language::English);
    }

    #[test]
    fn test_severity_scores() {
        assert_eq!(Severity::High.base_score(), 8);
        assert_eq!(Severity::Medium.base_score(), 5);
        assert_eq!(Severity::Low.base_score(), 2);
        assert_eq!(Severity::High.semantic_score(), 7);
        assert_eq!(Severity::Medium.semantic_score(), 4);
        assert_eq!(Severity::Low.semantic_score(), 2);
    }

    #[test]
    fn test_clause_char_len_counts_chars() {
        let clause = Clause::new(1, "धारा 1", "1");
        assert_eq!(clause.char_len(), 6);
    }
}
