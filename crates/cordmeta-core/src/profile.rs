use crate::model::{Record, RecordSet};

/// (rows, columns) of the raw set.
pub fn shape(set: &RecordSet) -> (usize, usize) {
    (set.records.len(), set.columns.len())
}

/// Fraction of absent values per column, in header order. Columns the
/// loader dropped do not appear.
pub fn missing_ratios(set: &RecordSet) -> Vec<(String, f64)> {
    let total = set.records.len();
    set.columns
        .iter()
        .map(|column| {
            let missing = set
                .records
                .iter()
                .filter(|record| field_value(record, column).is_none())
                .count();
            let ratio = if total == 0 {
                0.0
            } else {
                missing as f64 / total as f64
            };
            (column.clone(), ratio)
        })
        .collect()
}

fn field_value<'a>(record: &'a Record, column: &str) -> Option<&'a str> {
    match column {
        "title" => record.title.as_deref(),
        "abstract" => record.abstract_text.as_deref(),
        "authors" => record.authors.as_deref(),
        "journal" => record.journal.as_deref(),
        "source" => record.source.as_deref(),
        "publish_time" => record.publish_time.as_deref(),
        "pdf_json_files" => record.pdf_json_files.as_deref(),
        "pmc_json_files" => record.pmc_json_files.as_deref(),
        "sha" => record.sha.as_deref(),
        other => record
            .extras
            .iter()
            .find(|(name, _)| name == other)
            .and_then(|(_, value)| value.as_deref()),
    }
}
