// Date normalization for timeline and entity extraction
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

const ENGLISH_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Hindi month names with both spellings of February
pub const HINDI_MONTHS: &[(&str, u32)] = &[
    ("जनवरी", 1),
    ("फ़रवरी", 2),
    ("फरवरी", 2),
    ("मार्च", 3),
    ("अप्रैल", 4),
    ("मई", 5),
    ("जून", 6),
    ("जुलाई", 7),
    ("अगस्त", 8),
    ("सितंबर", 9),
    ("अक्टूबर", 10),
    ("नवंबर", 11),
    ("दिसंबर", 12),
];

lazy_static! {
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{1,2})([-/])(\d{1,2})([-/])(\d{4}|\d{2})$").unwrap();
    static ref DAY_MONTH_YEAR: Regex =
        Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})$").unwrap();
    static ref MONTH_DAY_YEAR: Regex =
        Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})\s+(\d{4})$").unwrap();
    static ref HINDI_DATE: Regex = Regex::new(r"^(\d{1,2})\s+(\S+?)\s*,?\s*(\d{4})").unwrap();
}

/// `"जनवरी|फ़रवरी|..."` for embedding in larger patterns
pub fn hindi_month_alternation() -> String {
    HINDI_MONTHS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

/// Parse an English-format date.
///
/// Accepts `d/m/y` (tried before `m/d/y`) with `/` or `-` separators and
/// two- or four-digit years, `"1 January 2024"` and `"January 1, 2024"`.
/// Anything else, including impossible calendar dates, yields `None`.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    if let Some(caps) = NUMERIC_DATE.captures(&cleaned) {
        // Both separators must agree
        if caps[2] != caps[4] {
            return None;
        }
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[3].parse().ok()?;
        let year = expand_year(&caps[5])?;
        return NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second));
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(&cleaned) {
        let day: u32 = caps[1].parse().ok()?;
        let month = english_month(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(&cleaned) {
        let month = english_month(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Parse `"15 जनवरी 2024"` style dates
pub fn normalize_hindi_date(raw: &str) -> Option<NaiveDate> {
    let caps = HINDI_DATE.captures(raw.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month = HINDI_MONTHS
        .iter()
        .find(|(name, _)| *name == &caps[2])
        .map(|(_, number)| *number)?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn english_month(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    ENGLISH_MONTHS
        .iter()
        .position(|m| *m == lower)
        .map(|index| index as u32 + 1)
}

/// Two-digit years pivot at 69: 69..=99 is 19xx, 00..=68 is 20xx
fn expand_year(digits: &str) -> Option<i32> {
    let value: i32 = digits.parse().ok()?;
    if digits.len() == 4 {
        Some(value)
    } else if value >= 69 {
        Some(1900 + value)
    } else {
        Some(2000 + value)
    }
}
