//! Timeline extraction
//!
//! Scans every clause for dates, deadlines, durations, renewals, notice
//! periods, payment deadlines and termination provisions, then folds in the
//! document-level date entities. Events are de-duplicated, dated events are
//! sorted chronologically ahead of undated ones, and ids are reassigned.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Clause, EntitySet, EventType, Timeline, TimelineEvent};
use tracing::{debug, info};

use crate::capabilities::contains_devanagari;
use crate::extractors::dates::{normalize_date, normalize_hindi_date};
use crate::extractors::entities::{DATE_PATTERNS, HINDI_DATE_PATTERN};
use crate::text::truncate_chars;

const VALUE_CHARS: usize = 100;
const CONTEXT_CHARS: usize = 150;

/// Hindi tables apply when any of the first clauses carries Devanagari
const SCRIPT_SAMPLE_CLAUSES: usize = 5;

lazy_static! {
    static ref DEADLINE_PATTERNS: Vec<Regex> = compile(&[
        r"within\s+(\d+\s*(?:days?|weeks?|months?|years?|business\s+days?))",
        r"no\s+later\s+than\s+(.+?)(?:\.|,|;|$)",
        r"before\s+(.+?)(?:\.|,|;|$)",
        r"on\s+or\s+before\s+(.+?)(?:\.|,|;|$)",
        r"not\s+(?:to\s+)?exceed\s+(\d+\s*(?:days?|months?|years?))",
    ]);
    static ref HINDI_DEADLINE_PATTERNS: Vec<Regex> = [
        r"(\d+\s*(?:दिन|सप्ताह|महीने|महीना|वर्ष|साल))\s+के\s+भीतर",
        r"(.+?)\s+से\s+पहले(?:\s|।|$)",
        r"(.+?)\s+तक(?:\s|।|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
    static ref DURATION_PATTERNS: Vec<Regex> = compile(&[
        r"(?:for\s+)?(?:a\s+)?(?:period|term|duration)\s+of\s+(\d+\s*(?:days?|weeks?|months?|years?))",
        r"(\d+)[\s-](?:year|month|week|day)\s+(?:term|period|contract|agreement)",
        r"(?:valid|effective)\s+(?:for|until)\s+(.+?)(?:\.|,|;|$)",
    ]);
    static ref RENEWAL_PATTERNS: Vec<Regex> = compile(&[
        r"(?:auto(?:matic(?:ally)?)?[\s-]+)?renew(?:ed|al)?\s+(?:for\s+)?(.+?)(?:\.|,|;|$)",
    ]);
    static ref NOTICE_PATTERNS: Vec<Regex> = compile(&[
        r"(\d+\s*(?:days?|weeks?|months?))\s*(?:prior\s+)?(?:written\s+)?notice",
        r"notice\s+(?:period\s+)?(?:of\s+)?(\d+\s*(?:days?|weeks?|months?))",
    ]);
    static ref PAYMENT_TRIGGER: Regex =
        Regex::new(r"(?i)\b(?:payment|pay|invoice|billing|due|remit)\b").unwrap();
    static ref PAYMENT_DEADLINE: Regex =
        Regex::new(r"(?i)(?:within|by|before|no later than)\s+(.+?)(?:\.|,|;|$)").unwrap();
    static ref TERMINATION_TRIGGER: Regex =
        Regex::new(r"(?i)\b(?:terminat\w*|expir\w*|end\s+of\s+(?:term|agreement))\b").unwrap();
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

/// Build the document timeline from clauses and previously extracted entities
pub fn extract_timeline(clauses: &[Clause], entities: &EntitySet) -> Timeline {
    let hindi = clauses
        .iter()
        .take(SCRIPT_SAMPLE_CLAUSES)
        .any(|c| contains_devanagari(&c.text));

    let mut events = Vec::new();
    for clause in clauses {
        scan_clause(&mut events, clause, hindi);
    }

    for date in &entities.dates {
        let parsed = normalize_date(&date.text).or_else(|| normalize_hindi_date(&date.text));
        events.push(TimelineEvent {
            id: 0,
            event_type: EventType::Date,
            value: truncate_chars(&date.text, VALUE_CHARS),
            parsed_date: parsed,
            clause_id: None,
            section_number: String::new(),
            description: format!("Referenced date: {}", date.text),
            context: String::new(),
        });
    }

    let found = events.len();
    let events = order_events(deduplicate(events));

    info!(
        events = events.len(),
        duplicates = found - events.len(),
        dated = events.iter().filter(|e| e.parsed_date.is_some()).count(),
        "Timeline extracted"
    );
    Timeline { events }
}

fn scan_clause(events: &mut Vec<TimelineEvent>, clause: &Clause, hindi: bool) {
    let text = clause.text.as_str();
    let before = events.len();

    for pattern in DATE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let mut event = build_event(
                clause,
                EventType::Date,
                m.as_str(),
                format!("Date reference in clause #{}", clause.id),
            );
            event.parsed_date = normalize_date(m.as_str());
            events.push(event);
        }
    }
    if hindi {
        for m in HINDI_DATE_PATTERN.find_iter(text) {
            let mut event = build_event(
                clause,
                EventType::Date,
                m.as_str(),
                format!("दिनांक संदर्भ खंड #{}", clause.id),
            );
            event.parsed_date = normalize_hindi_date(m.as_str());
            events.push(event);
        }
    }

    scan_captures(events, clause, &DEADLINE_PATTERNS, EventType::Deadline, "Deadline");
    if hindi {
        scan_captures(
            events,
            clause,
            &HINDI_DEADLINE_PATTERNS,
            EventType::Deadline,
            "समय सीमा",
        );
    }
    scan_captures(events, clause, &DURATION_PATTERNS, EventType::Duration, "Duration");
    scan_captures(events, clause, &RENEWAL_PATTERNS, EventType::Renewal, "Renewal");
    scan_captures(events, clause, &NOTICE_PATTERNS, EventType::Notice, "Notice period");

    if PAYMENT_TRIGGER.is_match(text) {
        if let Some(deadline) = PAYMENT_DEADLINE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
        {
            events.push(build_event(
                clause,
                EventType::Payment,
                deadline,
                format!("Payment deadline: {}", deadline),
            ));
        }
    }

    if TERMINATION_TRIGGER.is_match(text) {
        events.push(build_event(
            clause,
            EventType::Termination,
            "See clause",
            "Termination provision".to_string(),
        ));
    }

    debug!(clause_id = clause.id, events = events.len() - before, "Clause scanned");
}

/// Every match of every pattern; capture group 1 is the event value
fn scan_captures(
    events: &mut Vec<TimelineEvent>,
    clause: &Clause,
    patterns: &[Regex],
    event_type: EventType,
    label: &str,
) {
    for pattern in patterns {
        for caps in pattern.captures_iter(&clause.text) {
            let Some(value) = caps.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            events.push(build_event(
                clause,
                event_type,
                value,
                format!("{}: {}", label, value),
            ));
        }
    }
}

fn build_event(
    clause: &Clause,
    event_type: EventType,
    value: &str,
    description: String,
) -> TimelineEvent {
    TimelineEvent {
        id: 0,
        event_type,
        value: truncate_chars(value, VALUE_CHARS),
        parsed_date: None,
        clause_id: Some(clause.id),
        section_number: clause.section_number.clone(),
        description,
        context: truncate_chars(&clause.text, CONTEXT_CHARS),
    }
}

/// First occurrence of each `(value, type, clause)` wins
fn deduplicate(events: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|e| seen.insert((e.value.clone(), e.event_type, e.clause_id)))
        .collect()
}

/// Dated events by date (stable), then undated in discovery order; ids 1..N
fn order_events(events: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
    let (mut dated, undated): (Vec<_>, Vec<_>) =
        events.into_iter().partition(|e| e.parsed_date.is_some());
    dated.sort_by_key(|e| e.parsed_date);

    dated
        .into_iter()
        .chain(undated)
        .enumerate()
        .map(|(index, mut event)| {
            event.id = index + 1;
            event
        })
        .collect()
}
