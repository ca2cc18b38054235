use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::model::{
    CleanedRecord, CleanedRecordSet, Record, RecordSet, DROPPED_ID_COLUMNS, FALLBACK_ABSTRACT,
    FALLBACK_AUTHORS, FALLBACK_FILE,
};

/// Display text an absent title coerces to before word counting. Matches
/// the historical behavior of stringifying a missing value, so an absent
/// title always counts as one word. See DESIGN.md.
const ABSENT_TITLE_TEXT: &str = "nan";

/// Cleans a raw record set: substitutes fallback defaults, derives word
/// counts and the publication year. Total and deterministic; malformed
/// values degrade to defaults instead of failing.
pub fn clean(set: &RecordSet) -> CleanedRecordSet {
    let records: Vec<CleanedRecord> = set.records.iter().map(clean_record).collect();
    let with_year = records.iter().filter(|r| r.year.is_some()).count();
    debug!(
        rows = records.len(),
        with_year,
        "cleaned metadata records"
    );
    CleanedRecordSet { records }
}

fn clean_record(record: &Record) -> CleanedRecord {
    let abstract_text = record
        .abstract_text
        .clone()
        .unwrap_or_else(|| FALLBACK_ABSTRACT.to_string());
    let authors = record
        .authors
        .clone()
        .unwrap_or_else(|| FALLBACK_AUTHORS.to_string());
    let pdf_json_files = record
        .pdf_json_files
        .clone()
        .unwrap_or_else(|| FALLBACK_FILE.to_string());
    let pmc_json_files = record
        .pmc_json_files
        .clone()
        .unwrap_or_else(|| FALLBACK_FILE.to_string());
    let sha = record.sha.clone().unwrap_or_else(|| FALLBACK_FILE.to_string());

    let title_text = record.title.as_deref().unwrap_or(ABSENT_TITLE_TEXT);
    let title_word_count = word_count(title_text);
    let abstract_word_count = word_count(&abstract_text);
    let year = record.publish_time.as_deref().and_then(parse_year);

    let extras = record
        .extras
        .iter()
        .filter(|(name, _)| !DROPPED_ID_COLUMNS.contains(&name.as_str()))
        .cloned()
        .collect();

    CleanedRecord {
        title: record.title.clone(),
        abstract_text,
        authors,
        journal: record.journal.clone(),
        source: record.source.clone(),
        publish_time: record.publish_time.clone(),
        pdf_json_files,
        pmc_json_files,
        sha,
        title_word_count,
        abstract_word_count,
        year,
        extras,
    }
}

/// Number of non-empty whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extracts a publication year from free-form date text. Returns `None`
/// on anything unparseable rather than surfacing an error.
pub fn parse_year(value: &str) -> Option<i32> {
    static DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];
    static DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%b %d, %Y",
        "%B %d, %Y",
        "%d %b %Y",
        "%Y %b %d",
    ];
    // Month-granularity text parses with an implied first of the month.
    static MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y %b", "%b %Y", "%B %Y"];

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.year());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.year());
        }
    }
    for fmt in MONTH_FORMATS {
        let padded = format!("{trimmed} 1");
        let padded_fmt = format!("{fmt} %d");
        if let Ok(date) = NaiveDate::parse_from_str(&padded, &padded_fmt) {
            return Some(date.year());
        }
    }

    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse::<i32>().ok();
    }

    None
}
