use std::fmt;

use serde::{Deserialize, Serialize};

/// Substitute for an absent abstract.
pub const FALLBACK_ABSTRACT: &str = "No abstract";
/// Substitute for an absent author list.
pub const FALLBACK_AUTHORS: &str = "Unknown";
/// Substitute for absent file references and hashes.
pub const FALLBACK_FILE: &str = "None";

/// Identifier columns dropped during cleaning. Absence of any of them is
/// not an error.
pub const DROPPED_ID_COLUMNS: &[&str] = &["mag_id", "who_covidence_id", "arxiv_id", "s2_id"];

/// One raw row of paper metadata. Every field may be absent; columns the
/// loader does not recognize are preserved in `extras` in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub source: Option<String>,
    pub publish_time: Option<String>,
    pub pdf_json_files: Option<String>,
    pub pmc_json_files: Option<String>,
    pub sha: Option<String>,
    pub extras: Vec<(String, Option<String>)>,
}

/// The raw record set plus the header it was loaded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Column names in file order, after `source_x` normalization.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A Record after default substitution and feature derivation.
///
/// The fallback fields (`abstract_text`, `authors`, the file references,
/// `sha`) are never absent. `title`, `journal`, `source` and `publish_time`
/// stay optional: the source data genuinely lacks them sometimes and the
/// aggregations treat absence as "not a group member".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: String,
    pub journal: Option<String>,
    pub source: Option<String>,
    pub publish_time: Option<String>,
    pub pdf_json_files: String,
    pub pmc_json_files: String,
    pub sha: String,
    pub title_word_count: usize,
    pub abstract_word_count: usize,
    pub year: Option<i32>,
    pub extras: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedRecordSet {
    pub records: Vec<CleanedRecord>,
}

impl CleanedRecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedRecord> {
        self.records.iter()
    }
}

/// Grouping key for `count_by_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyField {
    Journal,
    Authors,
    Source,
    Year,
}

impl KeyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyField::Journal => "journal",
            KeyField::Authors => "authors",
            KeyField::Source => "source",
            KeyField::Year => "year",
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric field averaged by `mean_by_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueField {
    TitleWordCount,
    AbstractWordCount,
}

impl ValueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueField::TitleWordCount => "title_word_count",
            ValueField::AbstractWordCount => "abstract_word_count",
        }
    }

    pub(crate) fn get(&self, record: &CleanedRecord) -> usize {
        match self {
            ValueField::TitleWordCount => record.title_word_count,
            ValueField::AbstractWordCount => record.abstract_word_count,
        }
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which auxiliary file reference `availability` inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileField {
    PdfJson,
    PmcJson,
}

impl FileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileField::PdfJson => "pdf_json_files",
            FileField::PmcJson => "pmc_json_files",
        }
    }

    pub(crate) fn get<'a>(&self, record: &'a CleanedRecord) -> &'a str {
        match self {
            FileField::PdfJson => &record.pdf_json_files,
            FileField::PmcJson => &record.pmc_json_files,
        }
    }
}

impl fmt::Display for FileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability split for one file-reference field over a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: u64,
    pub missing: u64,
}
