use std::collections::{BTreeMap, HashMap, HashSet};

use crate::errors::{PipelineError, Result};
use crate::model::{Availability, FileField, KeyField, ValueField};
use crate::view::FilteredView;

/// Frequency accumulator that remembers the order keys first appeared in,
/// so ties can be broken by first encounter after the count sort.
#[derive(Default)]
struct OrderedCounter {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl OrderedCounter {
    fn push(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Count-descending, first-encountered order within ties, truncated
    /// to `top_n` entries.
    fn into_top(self, top_n: usize) -> Vec<(String, u64)> {
        let OrderedCounter { order, counts } = self;
        let mut entries: Vec<(String, u64)> = order
            .into_iter()
            .map(|key| {
                let count = counts[&key];
                (key, count)
            })
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(top_n);
        entries
    }
}

fn require_positive(top_n: usize) -> Result<()> {
    if top_n == 0 {
        return Err(PipelineError::InvalidArgument(
            "top_n must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Counts exact-equality groups of `key` over the view.
///
/// Records where the key field is absent form no group. String keys come
/// back count-descending (ties by first appearance) truncated to `top_n`;
/// `KeyField::Year` instead returns every year ascending, untruncated.
pub fn count_by_key(
    view: &FilteredView<'_>,
    key: KeyField,
    top_n: usize,
) -> Result<Vec<(String, u64)>> {
    require_positive(top_n)?;

    if key == KeyField::Year {
        let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
        for record in view.iter() {
            if let Some(year) = record.year {
                *by_year.entry(year).or_insert(0) += 1;
            }
        }
        return Ok(by_year
            .into_iter()
            .map(|(year, count)| (year.to_string(), count))
            .collect());
    }

    let mut counter = OrderedCounter::default();
    for record in view.iter() {
        let value = match key {
            KeyField::Journal => record.journal.as_deref(),
            KeyField::Authors => Some(record.authors.as_str()),
            KeyField::Source => record.source.as_deref(),
            KeyField::Year => unreachable!("handled above"),
        };
        if let Some(value) = value {
            counter.push(value);
        }
    }
    Ok(counter.into_top(top_n))
}

/// Mean of a derived numeric field per publication year, ascending.
/// Years appear only when at least one record contributed, so the mean
/// is always well defined.
pub fn mean_by_year(view: &FilteredView<'_>, field: ValueField) -> Vec<(i32, f64)> {
    let mut sums: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for record in view.iter() {
        if let Some(year) = record.year {
            let entry = sums.entry(year).or_insert((0, 0));
            entry.0 += field.get(record) as u64;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(year, (sum, n))| (year, sum as f64 / n as f64))
        .collect()
}

/// Most frequent title words after lower-casing and stopword removal.
///
/// Absent titles contribute nothing here, unlike the word-count feature:
/// token frequency should reflect actual title content, not placeholders.
pub fn tokenize_titles(
    view: &FilteredView<'_>,
    stopwords: &HashSet<String>,
    top_n: usize,
) -> Result<Vec<(String, u64)>> {
    require_positive(top_n)?;

    let mut counter = OrderedCounter::default();
    for record in view.iter() {
        let Some(title) = record.title.as_deref() else {
            continue;
        };
        for token in title.to_lowercase().split_whitespace() {
            if !stopwords.contains(token) {
                counter.push(token);
            }
        }
    }
    Ok(counter.into_top(top_n))
}

/// Splits a view by whether the given file reference is present. A record
/// is available iff the cleaned value is not the literal fallback "None".
pub fn availability(view: &FilteredView<'_>, field: FileField) -> Availability {
    let mut result = Availability::default();
    for record in view.iter() {
        if field.get(record) == crate::model::FALLBACK_FILE {
            result.missing += 1;
        } else {
            result.available += 1;
        }
    }
    result
}

/// All titles in the view, lower-cased and joined with single spaces, for
/// external word-cloud rendering. Absent titles are skipped.
pub fn all_title_text(view: &FilteredView<'_>) -> String {
    let titles: Vec<String> = view
        .iter()
        .filter_map(|record| record.title.as_deref())
        .map(|title| title.to_lowercase())
        .collect();
    titles.join(" ")
}
