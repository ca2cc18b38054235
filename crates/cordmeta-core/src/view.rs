use crate::errors::{PipelineError, Result};
use crate::model::{CleanedRecord, CleanedRecordSet};

/// A read-only, year-bounded subset of a cleaned record set.
///
/// Borrows the underlying records, so any number of aggregations can run
/// against the same view without re-filtering or copying.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a CleanedRecord>,
    min_year: i32,
    max_year: i32,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CleanedRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn records(&self) -> &[&'a CleanedRecord] {
        &self.records
    }
}

/// Filters to records with `min_year <= year <= max_year` (inclusive).
/// Records without a parseable year cannot satisfy the bounds and are
/// excluded.
pub fn filter_by_year_range(
    set: &CleanedRecordSet,
    min_year: i32,
    max_year: i32,
) -> Result<FilteredView<'_>> {
    if min_year > max_year {
        return Err(PipelineError::InvalidRange {
            min: min_year,
            max: max_year,
        });
    }

    let records = set
        .iter()
        .filter(|record| {
            record
                .year
                .map(|year| year >= min_year && year <= max_year)
                .unwrap_or(false)
        })
        .collect();

    Ok(FilteredView {
        records,
        min_year,
        max_year,
    })
}
