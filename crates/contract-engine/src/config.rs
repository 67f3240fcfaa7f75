//! Tunable constants for segmentation, detection and comparison
//!
//! Defaults reproduce the reference behavior exactly. The boundary de-dup
//! distance, the unchanged threshold and the ambiguity scale are empirical.

use std::str::FromStr;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Clauses shorter than this (in chars) are merged into the next one
    pub min_clause_length: usize,
    /// Boundaries closer than this to the previous accepted one are dropped
    pub boundary_dedup_distance: usize,
    pub sentences_per_clause: usize,
    /// Fallback grouping flushes once the accumulated text exceeds this
    pub max_fallback_clause_chars: usize,
    pub semantic_risk_threshold: f64,
    pub lexical_match_threshold: f64,
    pub semantic_match_threshold: f64,
    pub unchanged_threshold: f64,
    pub ambiguity_scale: f64,
    pub power_imbalance_ratio: f64,
    /// Clause text is truncated to this many chars before encoding
    pub embedding_char_limit: usize,
    /// Sentences kept by the extractive summary
    pub summary_sentences: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_clause_length: 30,
            boundary_dedup_distance: 20,
            sentences_per_clause: 3,
            max_fallback_clause_chars: 200,
            semantic_risk_threshold: 0.65,
            lexical_match_threshold: 0.40,
            semantic_match_threshold: 0.55,
            unchanged_threshold: 0.95,
            ambiguity_scale: 25.0,
            power_imbalance_ratio: 0.70,
            embedding_char_limit: 500,
            summary_sentences: 5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Every field can be overridden with `CLAUSECHECK_<FIELD>` in upper case,
    /// e.g. `CLAUSECHECK_MIN_CLAUSE_LENGTH=40`. Unset variables keep the default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_from(&lookup, "CLAUSECHECK_MIN_CLAUSE_LENGTH", &mut config.min_clause_length)?;
        override_from(
            &lookup,
            "CLAUSECHECK_BOUNDARY_DEDUP_DISTANCE",
            &mut config.boundary_dedup_distance,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_SENTENCES_PER_CLAUSE",
            &mut config.sentences_per_clause,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_MAX_FALLBACK_CLAUSE_CHARS",
            &mut config.max_fallback_clause_chars,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_SEMANTIC_RISK_THRESHOLD",
            &mut config.semantic_risk_threshold,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_LEXICAL_MATCH_THRESHOLD",
            &mut config.lexical_match_threshold,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_SEMANTIC_MATCH_THRESHOLD",
            &mut config.semantic_match_threshold,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_UNCHANGED_THRESHOLD",
            &mut config.unchanged_threshold,
        )?;
        override_from(&lookup, "CLAUSECHECK_AMBIGUITY_SCALE", &mut config.ambiguity_scale)?;
        override_from(
            &lookup,
            "CLAUSECHECK_POWER_IMBALANCE_RATIO",
            &mut config.power_imbalance_ratio,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_EMBEDDING_CHAR_LIMIT",
            &mut config.embedding_char_limit,
        )?;
        override_from(
            &lookup,
            "CLAUSECHECK_SUMMARY_SENTENCES",
            &mut config.summary_sentences,
        )?;

        if config.sentences_per_clause == 0 {
            return Err(EngineError::InvalidConfig {
                key: "CLAUSECHECK_SENTENCES_PER_CLAUSE".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(config)
    }

    pub fn with_min_clause_length(mut self, chars: usize) -> Self {
        self.min_clause_length = chars;
        self
    }

    pub fn with_fallback_grouping(mut self, sentences: usize, max_chars: usize) -> Self {
        self.sentences_per_clause = sentences.max(1);
        self.max_fallback_clause_chars = max_chars;
        self
    }

    pub fn with_semantic_risk_threshold(mut self, threshold: f64) -> Self {
        self.semantic_risk_threshold = threshold;
        self
    }

    pub fn with_match_thresholds(mut self, lexical: f64, semantic: f64) -> Self {
        self.lexical_match_threshold = lexical;
        self.semantic_match_threshold = semantic;
        self
    }

    pub fn with_unchanged_threshold(mut self, threshold: f64) -> Self {
        self.unchanged_threshold = threshold;
        self
    }

    pub fn with_summary_sentences(mut self, sentences: usize) -> Self {
        self.summary_sentences = sentences;
        self
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse::<T>()
            .map_err(|_| EngineError::InvalidConfig {
                key: key.to_string(),
                value: raw.clone(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.min_clause_length, 30);
        assert_eq!(config.boundary_dedup_distance, 20);
        assert_eq!(config.sentences_per_clause, 3);
        assert_eq!(config.max_fallback_clause_chars, 200);
        assert_eq!(config.semantic_risk_threshold, 0.65);
        assert_eq!(config.lexical_match_threshold, 0.40);
        assert_eq!(config.semantic_match_threshold, 0.55);
        assert_eq!(config.unchanged_threshold, 0.95);
        assert_eq!(config.ambiguity_scale, 25.0);
        assert_eq!(config.power_imbalance_ratio, 0.70);
        assert_eq!(config.embedding_char_limit, 500);
        assert_eq!(config.summary_sentences, 5);
    }

    #[test]
    fn test_lookup_overrides_values() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("CLAUSECHECK_MIN_CLAUSE_LENGTH", "40"),
            ("CLAUSECHECK_UNCHANGED_THRESHOLD", " 0.9 "),
            ("CLAUSECHECK_SUMMARY_SENTENCES", "3"),
        ]))
        .unwrap();
        assert_eq!(config.min_clause_length, 40);
        assert_eq!(config.summary_sentences, 3);
        assert_eq!(config.unchanged_threshold, 0.9);
        assert_eq!(config.boundary_dedup_distance, 20);
    }

    #[test]
    fn test_lookup_rejects_unparsable_value() {
        let err = EngineConfig::from_lookup(lookup_from(&[(
            "CLAUSECHECK_AMBIGUITY_SCALE",
            "lots",
        )]))
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { ref key, .. } if key == "CLAUSECHECK_AMBIGUITY_SCALE"));
    }

    #[test]
    fn test_lookup_rejects_zero_sentences() {
        let result = EngineConfig::from_lookup(lookup_from(&[(
            "CLAUSECHECK_SENTENCES_PER_CLAUSE",
            "0",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_min_clause_length(10)
            .with_fallback_grouping(0, 50)
            .with_match_thresholds(0.5, 0.6);
        assert_eq!(config.min_clause_length, 10);
        assert_eq!(config.sentences_per_clause, 1);
        assert_eq!(config.max_fallback_clause_chars, 50);
        assert_eq!(config.lexical_match_threshold, 0.5);
        assert_eq!(config.semantic_match_threshold, 0.6);
    }
}
