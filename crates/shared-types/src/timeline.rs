//! Named entities and dated contract events.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String, // e.g. "ORG", "DATE", "MONEY", "LAW"
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntitySet {
    pub parties: Vec<Entity>,
    pub dates: Vec<Entity>,
    pub monetary_values: Vec<Entity>,
    pub durations: Vec<Entity>,
    pub legal_references: Vec<Entity>,
}

impl EntitySet {
    pub fn total(&self) -> usize {
        self.parties.len()
            + self.dates.len()
            + self.monetary_values.len()
            + self.durations.len()
            + self.legal_references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Date,
    Deadline,
    Duration,
    Renewal,
    Notice,
    Payment,
    Termination,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Date => "date",
            EventType::Deadline => "deadline",
            EventType::Duration => "duration",
            EventType::Renewal => "renewal",
            EventType::Notice => "notice",
            EventType::Payment => "payment",
            EventType::Termination => "termination",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEvent {
    pub id: usize,
    pub event_type: EventType,
    /// Raw matched text, kept even when the date could not be parsed.
    pub value: String,
    pub parsed_date: Option<NaiveDate>,
    /// `None` for events derived from document-level entities.
    pub clause_id: Option<usize>,
    pub section_number: String,
    pub description: String,
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn of_type(&self, event_type: EventType) -> impl Iterator<Item = &TimelineEvent> {
        self.events
            .iter()
            .filter(move |e| e.event_type == event_type)
    }
}
