//! Named entity extraction
//!
//! Three layers, each only adding text not already present in its category:
//! parser NER spans when a parser is available, regex enrichment for dates,
//! money, durations and legal references, and for Hindi a gazetteer of
//! well-known Indian acts.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Entity, EntitySet, Language};
use tracing::{debug, info, warn};

use super::dates::hindi_month_alternation;
use crate::capabilities::{DependencyParser, EntityCategory};
use crate::text::truncate_chars;

/// NER input limits per language
const ENGLISH_NER_CHARS: usize = 100_000;
const HINDI_NER_CHARS: usize = 50_000;

/// Hindi legal matches at or below this many chars are noise
const MIN_HINDI_LEGAL_CHARS: usize = 3;

const HINDI_LEGAL_GAZETTEER: &[&str] = &[
    "भारतीय अनुबंध अधिनियम, 1872",
    "भारतीय अनुबंध अधिनियम",
    "सूचना प्रौद्योगिकी अधिनियम, 2000",
    "सूचना प्रौद्योगिकी अधिनियम",
    "उपभोक्ता संरक्षण अधिनियम, 2019",
    "उपभोक्ता संरक्षण अधिनियम",
    "कंपनी अधिनियम, 2013",
    "कंपनी अधिनियम",
    "मध्यस्थता एवं सुलह अधिनियम, 1996",
    "मध्यस्थता एवं सुलह अधिनियम",
    "औद्योगिक विवाद अधिनियम, 1947",
    "औद्योगिक विवाद अधिनियम",
    "भारतीय दंड संहिता",
    "भारतीय स्टाम्प अधिनियम, 1899",
    "भारतीय स्टाम्प अधिनियम",
    "डिजिटल व्यक्तिगत डेटा संरक्षण अधिनियम, 2023",
    "पेटेंट अधिनियम, 1970",
    "कॉपीराइट अधिनियम, 1957",
    "ट्रेडमार्क अधिनियम, 1999",
    "विशिष्ट अनुतोष अधिनियम, 1963",
    "भारतीय साक्ष्य अधिनियम",
    "सिविल प्रक्रिया संहिता",
    "दीवानी प्रक्रिया संहिता",
];

lazy_static! {
    static ref HINDI_LEGAL_PATTERNS: Vec<Regex> = [
        r"धारा\s+\d+[क-ह]*(?:\s+(?:का|के|की))?(?:\s*(?:\w+\s+){1,4}अधिनियम(?:\s*,?\s*\d{4})?)?",
        r"अनुच्छेद\s+\d+[क-ह]*",
        r"(?:\w+\s+){1,4}अधिनियम(?:\s*,?\s*\d{4})?",
        r"नियम\s+\d+",
        r"उप-धारा\s*\(\s*\d+\s*\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    pub(crate) static ref DATE_PATTERNS: Vec<Regex> = compile(&[
        r"\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b",
        r"\b\d{1,2}\s+(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{4}\b",
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}\b",
    ]);
    pub(crate) static ref HINDI_DATE_PATTERN: Regex = Regex::new(&format!(
        r"\d{{1,2}}\s+(?:{})\s*,?\s*\d{{4}}",
        hindi_month_alternation()
    ))
    .unwrap();

    static ref MONEY_PATTERNS: Vec<Regex> = compile(&[
        r"(?:Rs\.?|INR|₹|USD|\$|€)\s*[\d,]+(?:\.\d{1,2})?(?:\s*(?:crore|lakh|million|billion))?",
        r"[\d,]+(?:\.\d{1,2})?\s*(?:rupees|dollars|euros)",
    ]);
    static ref HINDI_MONEY_PATTERN: Regex =
        Regex::new(r"(?:₹|रु\.?|रुपये)\s*[\d,]+(?:\.\d{1,2})?(?:\s*(?:करोड़|लाख))?").unwrap();

    static ref DURATION_PATTERNS: Vec<Regex> = compile(&[
        r"\b\d+\s*(?:days?|weeks?|months?|years?|business\s+days?)\b",
        r"\b(?:one|two|three|four|five|six|seven|eight|nine|ten|thirty|sixty|ninety)\s*(?:days?|weeks?|months?|years?)\b",
    ]);
    static ref HINDI_DURATION_PATTERN: Regex =
        Regex::new(r"\d+\s*(?:दिन|सप्ताह|महीने|महीना|वर्ष|साल)").unwrap();

    static ref LEGAL_PATTERNS: Vec<Regex> = compile(&[
        r"(?:Indian\s+)?(?:Contract\s+Act|Companies\s+Act|IT\s+Act|Consumer\s+Protection\s+Act|Arbitration\s+Act|Information\s+Technology\s+Act|GDPR|CCPA)(?:\s*,?\s*\d{4})?",
        r"Section\s+\d+[A-Za-z]*(?:\s+of\s+the\s+[\w\s]+?Act(?:\s*,?\s*\d{4})?)?",
    ]);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

/// Extract entities from the full document text
pub fn extract_entities(
    text: &str,
    language: Language,
    parser: Option<&dyn DependencyParser>,
) -> EntitySet {
    let mut entities = EntitySet::default();

    if let Some(parser) = parser {
        add_parser_entities(&mut entities, text, language, parser);
    }

    if language == Language::Hindi {
        add_hindi_legal_references(&mut entities, text);
    }

    enrich_with_regex(&mut entities, text, language);

    info!(
        parties = entities.parties.len(),
        dates = entities.dates.len(),
        money = entities.monetary_values.len(),
        durations = entities.durations.len(),
        legal = entities.legal_references.len(),
        "Entity extraction complete"
    );
    entities
}

fn add_parser_entities(
    entities: &mut EntitySet,
    text: &str,
    language: Language,
    parser: &dyn DependencyParser,
) {
    let limit = match language {
        Language::English => ENGLISH_NER_CHARS,
        Language::Hindi => HINDI_NER_CHARS,
    };
    let parsed = match parser.parse(&truncate_chars(text, limit), language) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(parser = parser.name(), "Named entity layer skipped: {}", e);
            return;
        }
    };

    for span in parsed.entities {
        let category = match span.category {
            EntityCategory::Person | EntityCategory::Organization => &mut entities.parties,
            EntityCategory::Date => &mut entities.dates,
            EntityCategory::Money => &mut entities.monetary_values,
            EntityCategory::Duration => &mut entities.durations,
            EntityCategory::Law => &mut entities.legal_references,
        };
        push_unique(category, span.text.trim(), span.category.label());
    }
    debug!(total = entities.total(), "Parser entities collected");
}

/// Hindi legal regexes, then gazetteer lookups
fn add_hindi_legal_references(entities: &mut EntitySet, text: &str) {
    for pattern in HINDI_LEGAL_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let matched = m.as_str().trim();
            if matched.chars().count() > MIN_HINDI_LEGAL_CHARS {
                push_unique(&mut entities.legal_references, matched, "LAW");
            }
        }
    }

    for act in HINDI_LEGAL_GAZETTEER {
        if text.contains(act) {
            push_unique(&mut entities.legal_references, act, "LAW");
        }
    }
}

fn enrich_with_regex(entities: &mut EntitySet, text: &str, language: Language) {
    let hindi = language == Language::Hindi;

    let mut date_patterns: Vec<&Regex> = DATE_PATTERNS.iter().collect();
    let mut money_patterns: Vec<&Regex> = MONEY_PATTERNS.iter().collect();
    let mut duration_patterns: Vec<&Regex> = DURATION_PATTERNS.iter().collect();
    if hindi {
        date_patterns.push(&HINDI_DATE_PATTERN);
        money_patterns.push(&HINDI_MONEY_PATTERN);
        duration_patterns.push(&HINDI_DURATION_PATTERN);
    }

    collect_matches(&mut entities.dates, &date_patterns, text, "DATE");
    collect_matches(&mut entities.monetary_values, &money_patterns, text, "MONEY");
    collect_matches(&mut entities.durations, &duration_patterns, text, "DURATION");

    let legal_patterns: Vec<&Regex> = LEGAL_PATTERNS.iter().collect();
    collect_matches(&mut entities.legal_references, &legal_patterns, text, "LAW");
}

fn collect_matches(list: &mut Vec<Entity>, patterns: &[&Regex], text: &str, label: &str) {
    for pattern in patterns {
        for m in pattern.find_iter(text) {
            push_unique(list, m.as_str(), label);
        }
    }
}

fn push_unique(list: &mut Vec<Entity>, text: &str, label: &str) {
    if text.is_empty() || list.iter().any(|e| e.text == text) {
        return;
    }
    list.push(Entity::new(text, label));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{EntitySpan, ParsedText};
    use crate::error::{EngineError, Result};

    struct NerParser;

    impl DependencyParser for NerParser {
        fn parse(&self, _text: &str, _language: Language) -> Result<ParsedText> {
            Ok(ParsedText {
                sentences: Vec::new(),
                entities: vec![
                    EntitySpan {
                        text: "Acme Pvt Ltd".into(),
                        category: EntityCategory::Organization,
                    },
                    EntitySpan {
                        text: " Acme Pvt Ltd ".into(),
                        category: EntityCategory::Organization,
                    },
                    EntitySpan {
                        text: "1 January 2024".into(),
                        category: EntityCategory::Date,
                    },
                ],
            })
        }

        fn name(&self) -> &str {
            "ner"
        }
    }

    struct FailingParser;

    impl DependencyParser for FailingParser {
        fn parse(&self, _text: &str, _language: Language) -> Result<ParsedText> {
            Err(EngineError::ParseError("model not loaded".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn texts(list: &[Entity]) -> Vec<&str> {
        list.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_regex_layer_english() {
        let text = "Payment of Rs. 50,000 is due on 1 January 2024 and again on 15/06/2024. \
                    The term is 12 months under Section 73 of the Indian Contract Act, 1872.";
        let entities = extract_entities(text, Language::English, None);

        assert!(entities.parties.is_empty());
        assert_eq!(texts(&entities.dates), vec!["15/06/2024", "1 January 2024"]);
        assert_eq!(texts(&entities.monetary_values), vec!["Rs. 50,000"]);
        assert_eq!(texts(&entities.durations), vec!["12 months"]);
        assert!(entities
            .legal_references
            .iter()
            .any(|e| e.text == "Contract Act, 1872" || e.text == "Indian Contract Act, 1872"));
        assert!(entities
            .legal_references
            .iter()
            .any(|e| e.text.starts_with("Section 73 of the")));
    }

    #[test]
    fn test_spelled_out_durations() {
        let entities =
            extract_entities("Notice of thirty days is required.", Language::English, None);
        assert_eq!(texts(&entities.durations), vec!["thirty days"]);
    }

    #[test]
    fn test_parser_entities_come_first_and_dedup() {
        let text = "Acme Pvt Ltd signed on 1 January 2024.";
        let entities = extract_entities(text, Language::English, Some(&NerParser));

        assert_eq!(texts(&entities.parties), vec!["Acme Pvt Ltd"]);
        assert_eq!(entities.parties[0].label, "ORG");
        // Regex layer finds the same date again and skips it
        assert_eq!(texts(&entities.dates), vec!["1 January 2024"]);
    }

    #[test]
    fn test_parser_failure_keeps_regex_layer() {
        let text = "Fee: $1,200.50 payable within 30 days.";
        let entities = extract_entities(text, Language::English, Some(&FailingParser));
        assert_eq!(texts(&entities.monetary_values), vec!["$1,200.50"]);
        assert_eq!(texts(&entities.durations), vec!["30 days"]);
    }

    #[test]
    fn test_hindi_layers() {
        let text = "यह अनुबंध भारतीय अनुबंध अधिनियम, 1872 के अधीन है। \
                    भुगतान ₹ 5,000 लाख 15 जनवरी 2024 तक 30 दिन के भीतर किया जाएगा।";
        let entities = extract_entities(text, Language::Hindi, None);

        assert!(entities
            .legal_references
            .iter()
            .any(|e| e.text == "भारतीय अनुबंध अधिनियम, 1872"));
        assert!(entities.dates.iter().any(|e| e.text == "15 जनवरी 2024"));
        assert!(entities
            .monetary_values
            .iter()
            .any(|e| e.text.starts_with("₹ 5,000")));
        assert!(entities.durations.iter().any(|e| e.text == "30 दिन"));
        assert!(entities.legal_references.iter().all(|e| e.label == "LAW"));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_entities("", Language::English, None).is_empty());
    }
}
