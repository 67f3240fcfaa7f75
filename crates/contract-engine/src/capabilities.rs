//! Pluggable NLP capabilities
//!
//! Sentence embedding and dependency parsing are external services. Detectors
//! receive them as optional trait objects and fall back to their regex paths
//! when a capability is absent or fails.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use shared_types::Language;
use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::jurisdiction::SeverityOverride;

// ============================================================================
// Capability traits
// ============================================================================

/// Turns sentences into fixed-dimension vectors
pub trait SentenceEncoder: Send + Sync {
    /// Encode a batch of texts; the output has one vector per input, in order
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn name(&self) -> &str;
}

/// Syntactic relation of a token to its head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyRelation {
    Subject,
    PassiveSubject,
    PassiveAuxiliary,
    Root,
    Object,
    Punctuation,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub relation: DependencyRelation,
    /// Index of the head token within the same sentence
    pub head: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, relation: DependencyRelation, head: usize) -> Self {
        Self {
            text: text.into(),
            relation,
            head,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl ParsedSentence {
    pub fn has_passive_subject(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| t.relation == DependencyRelation::PassiveSubject)
    }

    /// Subject token text together with the tokens that attach to it
    pub fn subject_phrase(&self) -> Option<String> {
        let (index, _) = self.tokens.iter().enumerate().find(|(_, t)| {
            matches!(
                t.relation,
                DependencyRelation::Subject | DependencyRelation::PassiveSubject
            )
        })?;

        let phrase: Vec<&str> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(i, t)| {
                *i == index
                    || (t.head == index
                        && *i != t.head
                        && t.relation != DependencyRelation::Punctuation)
            })
            .map(|(_, t)| t.text.as_str())
            .collect();

        Some(phrase.join(" "))
    }

    /// Root token followed by the tokens it governs
    pub fn root_phrase(&self) -> Option<String> {
        let (index, _) = self
            .tokens
            .iter()
            .enumerate()
            .find(|(_, t)| t.relation == DependencyRelation::Root)?;

        let phrase: Vec<&str> = self
            .tokens
            .iter()
            .enumerate()
            .skip(index)
            .filter(|(i, t)| {
                *i == index
                    || (t.head == index
                        && !matches!(
                            t.relation,
                            DependencyRelation::Punctuation
                                | DependencyRelation::Subject
                                | DependencyRelation::PassiveSubject
                        ))
            })
            .map(|(_, t)| t.text.as_str())
            .collect();

        Some(phrase.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Person,
    Organization,
    Date,
    Money,
    Duration,
    Law,
}

impl EntityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Organization => "ORG",
            EntityCategory::Date => "DATE",
            EntityCategory::Money => "MONEY",
            EntityCategory::Duration => "DURATION",
            EntityCategory::Law => "LAW",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub text: String,
    pub category: EntityCategory,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedText {
    pub sentences: Vec<ParsedSentence>,
    pub entities: Vec<EntitySpan>,
}

/// Sentence splitting, dependency relations and named entities
pub trait DependencyParser: Send + Sync {
    fn parse(&self, text: &str, language: Language) -> Result<ParsedText>;

    fn name(&self) -> &str;
}

pub trait LanguageIdentifier: Send + Sync {
    fn detect(&self, text: &str) -> Language;
}

/// Supplies jurisdiction-specific legal references and severity overrides
pub trait JurisdictionRuleProvider: Send + Sync {
    /// (clause type, legal reference) pairs
    fn legal_references(&self, code: &str) -> Vec<(String, String)>;

    fn severity_overrides(&self, code: &str) -> Vec<SeverityOverride>;
}

// ============================================================================
// Script-based language identification
// ============================================================================

pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

pub fn contains_devanagari(text: &str) -> bool {
    text.chars().any(is_devanagari)
}

/// Classifies text as Hindi when at least half of its letters are Devanagari
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptLanguageIdentifier;

impl LanguageIdentifier for ScriptLanguageIdentifier {
    fn detect(&self, text: &str) -> Language {
        if text.chars().filter(|c| !c.is_whitespace()).count() < 10 {
            return Language::English;
        }

        let (devanagari, letters) = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(dev, all), c| {
                (dev + usize::from(is_devanagari(c)), all + 1)
            });

        if letters > 0 && devanagari * 2 >= letters {
            Language::Hindi
        } else {
            Language::English
        }
    }
}

// ============================================================================
// Lazy, initialize-once capability cells
// ============================================================================

type Loader<T> = Box<dyn Fn() -> Result<Arc<T>> + Send + Sync>;

/// A capability loaded on first use
///
/// Concurrent first calls run the loader exactly once; the others block until
/// it finishes. A failed load is remembered and the capability stays
/// unavailable for the lifetime of the cell.
pub struct LazyCapability<T: ?Sized> {
    name: String,
    loader: Loader<T>,
    cell: OnceCell<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> LazyCapability<T> {
    pub fn new<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    /// Already-loaded capability
    pub fn ready(name: impl Into<String>, value: Arc<T>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(Some(value));
        Self {
            name: name.into(),
            loader: Box::new(|| -> Result<Arc<T>> {
                Err(EngineError::CapabilityUnavailable("preloaded".into()))
            }),
            cell,
        }
    }

    pub fn unavailable(name: impl Into<String>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(None);
        Self {
            name: name.into(),
            loader: Box::new(|| -> Result<Arc<T>> {
                Err(EngineError::CapabilityUnavailable("not configured".into()))
            }),
            cell,
        }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.cell
            .get_or_init(|| match (self.loader)() {
                Ok(value) => {
                    info!("Loaded capability {}", self.name);
                    Some(value)
                }
                Err(e) => {
                    warn!("Capability {} unavailable, using fallback: {}", self.name, e);
                    None
                }
            })
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: ?Sized> fmt::Debug for LazyCapability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.cell.get() {
            None => "pending",
            Some(Some(_)) => "loaded",
            Some(None) => "unavailable",
        };
        f.debug_struct("LazyCapability")
            .field("name", &self.name)
            .field("state", &state)
            .finish()
    }
}

/// Optional NLP capabilities handed to the engine
#[derive(Debug)]
pub struct Capabilities {
    encoder: LazyCapability<dyn SentenceEncoder>,
    parser: LazyCapability<dyn DependencyParser>,
}

impl Capabilities {
    /// Regex-only mode
    pub fn none() -> Self {
        Self {
            encoder: LazyCapability::unavailable("sentence-encoder"),
            parser: LazyCapability::unavailable("dependency-parser"),
        }
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn SentenceEncoder>) -> Self {
        self.encoder = LazyCapability::ready(encoder.name().to_string(), encoder);
        self
    }

    pub fn with_lazy_encoder(mut self, encoder: LazyCapability<dyn SentenceEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn DependencyParser>) -> Self {
        self.parser = LazyCapability::ready(parser.name().to_string(), parser);
        self
    }

    pub fn with_lazy_parser(mut self, parser: LazyCapability<dyn DependencyParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn encoder(&self) -> Option<Arc<dyn SentenceEncoder>> {
        self.encoder.get()
    }

    pub fn parser(&self) -> Option<Arc<dyn DependencyParser>> {
        self.parser.get()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::none()
    }
}
