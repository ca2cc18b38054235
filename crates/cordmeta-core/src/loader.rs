use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::errors::{PipelineError, Result};
use crate::model::{Record, RecordSet, DROPPED_ID_COLUMNS};

/// Columns the pipeline requires in the header. `source` may also appear
/// under its CORD-19 name `source_x`; the loader normalizes it.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "title",
    "abstract",
    "authors",
    "journal",
    "source",
    "publish_time",
    "pdf_json_files",
    "pmc_json_files",
    "sha",
];

#[derive(Debug, Clone, Copy)]
enum ColumnRole {
    Title,
    Abstract,
    Authors,
    Journal,
    Source,
    PublishTime,
    PdfJsonFiles,
    PmcJsonFiles,
    Sha,
    DroppedId,
    Extra,
}

fn classify_column(name: &str) -> ColumnRole {
    match name {
        "title" => ColumnRole::Title,
        "abstract" => ColumnRole::Abstract,
        "authors" => ColumnRole::Authors,
        "journal" => ColumnRole::Journal,
        "source" | "source_x" => ColumnRole::Source,
        "publish_time" => ColumnRole::PublishTime,
        "pdf_json_files" => ColumnRole::PdfJsonFiles,
        "pmc_json_files" => ColumnRole::PmcJsonFiles,
        "sha" => ColumnRole::Sha,
        other if DROPPED_ID_COLUMNS.contains(&other) => ColumnRole::DroppedId,
        _ => ColumnRole::Extra,
    }
}

/// Loads a metadata CSV from a path, capping rows at `nrows` if given.
pub fn load_metadata(path: impl AsRef<Path>, nrows: Option<usize>) -> Result<RecordSet> {
    let file = File::open(path.as_ref())?;
    let set = load_metadata_from_reader(file, nrows)?;
    debug!(
        rows = set.len(),
        path = %path.as_ref().display(),
        "loaded metadata records"
    );
    Ok(set)
}

/// Loads a metadata CSV from any reader.
///
/// An empty (after trimming) field is the absent value. Identifier columns
/// are dropped here; columns outside the expected schema are preserved
/// per record in header order.
pub fn load_metadata_from_reader(reader: impl Read, nrows: Option<usize>) -> Result<RecordSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    let roles: Vec<ColumnRole> = names.iter().map(|n| classify_column(n)).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| {
            !names.iter().any(|n| {
                n == *required || (**required == "source" && n == "source_x")
            })
        })
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing));
    }

    let cap = nrows.unwrap_or(usize::MAX);
    let mut records = Vec::new();

    for row in csv_reader.records() {
        if records.len() >= cap {
            break;
        }
        let row = row?;
        let mut record = Record::default();
        for (idx, role) in roles.iter().enumerate() {
            let value = clean_optional(row.get(idx));
            match role {
                ColumnRole::Title => record.title = value,
                ColumnRole::Abstract => record.abstract_text = value,
                ColumnRole::Authors => record.authors = value,
                ColumnRole::Journal => record.journal = value,
                ColumnRole::Source => record.source = value,
                ColumnRole::PublishTime => record.publish_time = value,
                ColumnRole::PdfJsonFiles => record.pdf_json_files = value,
                ColumnRole::PmcJsonFiles => record.pmc_json_files = value,
                ColumnRole::Sha => record.sha = value,
                ColumnRole::DroppedId => {}
                ColumnRole::Extra => record.extras.push((names[idx].clone(), value)),
            }
        }
        records.push(record);
    }

    let columns = names
        .iter()
        .zip(roles.iter())
        .filter(|(_, role)| !matches!(role, ColumnRole::DroppedId))
        .map(|(name, role)| {
            if matches!(role, ColumnRole::Source) {
                "source".to_string()
            } else {
                name.clone()
            }
        })
        .collect();

    Ok(RecordSet { columns, records })
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
