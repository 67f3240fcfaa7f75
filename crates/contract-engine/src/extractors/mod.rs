//! Document-level extraction: named entities and date normalization

pub mod dates;
pub mod entities;

pub use dates::{normalize_date, normalize_hindi_date};
pub use entities::extract_entities;
