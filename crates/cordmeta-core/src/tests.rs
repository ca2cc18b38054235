use std::path::PathBuf;

use crate::aggregate::{
    all_title_text, availability, count_by_key, mean_by_year, tokenize_titles,
};
use crate::clean::{clean, parse_year, word_count};
use crate::errors::PipelineError;
use crate::loader::{load_metadata, load_metadata_from_reader};
use crate::model::{
    CleanedRecord, CleanedRecordSet, FileField, KeyField, Record, RecordSet, ValueField,
};
use crate::profile::{missing_ratios, shape};
use crate::stopwords::{default_stopwords, stopword_set};
use crate::view::filter_by_year_range;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn load_fixture() -> RecordSet {
    load_metadata(fixture_path("metadata_small.csv"), None).expect("fixture load failed")
}

fn cleaned_fixture() -> CleanedRecordSet {
    clean(&load_fixture())
}

#[test]
fn loads_fixture_with_source_alias_and_dropped_ids() {
    let set = load_fixture();
    assert_eq!(set.len(), 6);
    assert!(set.columns.iter().any(|c| c == "source"));
    assert!(!set.columns.iter().any(|c| c == "source_x"));
    assert!(!set.columns.iter().any(|c| c == "mag_id"));

    let first = &set.records[0];
    assert_eq!(first.source.as_deref(), Some("PMC"));
    assert_eq!(first.extras.len(), 1);
    assert_eq!(first.extras[0].0, "url");
    // an identifier value never survives loading
    assert!(first.extras.iter().all(|(name, _)| name != "arxiv_id"));
}

#[test]
fn load_respects_row_cap() {
    let csv = std::fs::read_to_string(fixture_path("metadata_small.csv")).unwrap();
    let set = load_metadata_from_reader(csv.as_bytes(), Some(2)).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn load_rejects_missing_required_columns() {
    let csv = "title,abstract,authors,source,publish_time,pdf_json_files,pmc_json_files,sha\n";
    let err = load_metadata_from_reader(csv.as_bytes(), None).unwrap_err();
    match err {
        PipelineError::MissingColumns(missing) => {
            assert_eq!(missing, vec!["journal".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other}"),
    }
}

#[test]
fn cleaning_substitutes_fallbacks_and_derives_features() {
    let cleaned = cleaned_fixture();

    let first = &cleaned.records[0];
    assert_eq!(first.title_word_count, 3);
    assert_eq!(first.abstract_word_count, 7);
    assert_eq!(first.year, Some(2020));

    let flu_review = &cleaned.records[1];
    assert_eq!(flu_review.abstract_text, "No abstract");
    assert_eq!(flu_review.abstract_word_count, 2);
    assert_eq!(flu_review.authors, "Unknown");
    assert_eq!(flu_review.sha, "None");
    assert_eq!(flu_review.year, None);

    // absent title stringifies to "nan" and counts as one word
    let untitled = &cleaned.records[2];
    assert!(untitled.title.is_none());
    assert_eq!(untitled.title_word_count, 1);
    assert_eq!(untitled.year, Some(2021));
}

#[test]
fn cleaned_fallback_fields_are_never_absent() {
    let cleaned = cleaned_fixture();
    for record in cleaned.iter() {
        assert!(!record.abstract_text.is_empty());
        assert!(!record.authors.is_empty());
        assert!(!record.pdf_json_files.is_empty());
        assert!(!record.pmc_json_files.is_empty());
        assert!(!record.sha.is_empty());
        assert!(record.abstract_word_count >= 1);
    }
}

#[test]
fn clean_is_idempotent() {
    let once = cleaned_fixture();
    let reraw = RecordSet {
        columns: Vec::new(),
        records: once
            .iter()
            .map(|record| Record {
                title: record.title.clone(),
                abstract_text: Some(record.abstract_text.clone()),
                authors: Some(record.authors.clone()),
                journal: record.journal.clone(),
                source: record.source.clone(),
                publish_time: record.publish_time.clone(),
                pdf_json_files: Some(record.pdf_json_files.clone()),
                pmc_json_files: Some(record.pmc_json_files.clone()),
                sha: Some(record.sha.clone()),
                extras: record.extras.clone(),
            })
            .collect(),
    };
    let twice = clean(&reraw);
    assert_eq!(once.records, twice.records);
}

#[test]
fn clean_does_not_mutate_input() {
    let raw = load_fixture();
    let raw_copy = raw.clone();
    let _ = clean(&raw);
    assert_eq!(raw, raw_copy);
}

#[test]
fn filter_by_year_range_is_inclusive_and_excludes_yearless() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();
    assert_eq!(view.len(), 5);
    assert!(view.iter().all(|r| r.year.is_some()));

    let only_2020 = filter_by_year_range(&cleaned, 2020, 2020).unwrap();
    assert_eq!(only_2020.len(), 2);
    assert!(only_2020.iter().all(|r| r.year == Some(2020)));
}

#[test]
fn filter_rejects_inverted_bounds() {
    let cleaned = cleaned_fixture();
    let err = filter_by_year_range(&cleaned, 2021, 2019).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InvalidRange {
            min: 2021,
            max: 2019
        }
    ));
}

#[test]
fn count_by_key_ranks_journals_and_skips_absent() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();

    let journals = count_by_key(&view, KeyField::Journal, 10).unwrap();
    // the journal-less record forms no group
    assert_eq!(
        journals,
        vec![("Nature".to_string(), 3), ("BMJ".to_string(), 1)]
    );

    let top_one = count_by_key(&view, KeyField::Journal, 1).unwrap();
    assert_eq!(top_one, vec![("Nature".to_string(), 3)]);
}

#[test]
fn count_by_key_breaks_ties_by_first_encounter() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();

    let sources = count_by_key(&view, KeyField::Source, 10).unwrap();
    assert_eq!(
        sources,
        vec![
            ("PMC".to_string(), 3),
            ("Elsevier".to_string(), 1),
            ("WHO".to_string(), 1),
        ]
    );
}

#[test]
fn count_by_key_orders_years_ascending_without_truncation() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();

    let years = count_by_key(&view, KeyField::Year, 1).unwrap();
    assert_eq!(
        years,
        vec![
            ("2019".to_string(), 1),
            ("2020".to_string(), 2),
            ("2021".to_string(), 2),
        ]
    );
}

#[test]
fn count_by_key_counts_are_non_increasing() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();
    let authors = count_by_key(&view, KeyField::Authors, 10).unwrap();
    assert!(authors.windows(2).all(|pair| pair[0].1 >= pair[1].1));
}

#[test]
fn count_by_key_rejects_zero_top_n() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();
    let err = count_by_key(&view, KeyField::Journal, 0).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidArgument(_)));
}

#[test]
fn mean_by_year_averages_ascending() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();

    let means = mean_by_year(&view, ValueField::AbstractWordCount);
    assert_eq!(means.len(), 3);
    assert_eq!(means[0], (2019, 2.0));
    assert_eq!(means[1], (2020, 5.0));
    assert_eq!(means[2], (2021, 2.5));
}

#[test]
fn tokenize_titles_lowercases_filters_and_ranks() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();

    let words = tokenize_titles(&view, &default_stopwords(), 3).unwrap();
    assert_eq!(
        words,
        vec![
            ("coronavirus".to_string(), 3),
            ("study".to_string(), 2),
            ("novel".to_string(), 1),
        ]
    );
}

#[test]
fn tokenize_titles_tie_order_matches_first_encounter() {
    let records = vec![
        cleaned_with_title(Some("The Study of Flu"), Some(2020)),
        cleaned_with_title(Some("Flu Study"), Some(2020)),
    ];
    let set = CleanedRecordSet { records };
    let view = filter_by_year_range(&set, 2020, 2020).unwrap();

    let stopwords = stopword_set(&[]);
    let words = tokenize_titles(&view, &stopwords, 5).unwrap();
    assert_eq!(
        words,
        vec![("study".to_string(), 2), ("flu".to_string(), 2)]
    );
}

#[test]
fn tokenize_titles_rejects_zero_top_n() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();
    let err = tokenize_titles(&view, &default_stopwords(), 0).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidArgument(_)));
}

#[test]
fn availability_counts_sum_to_view_size() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2019, 2021).unwrap();

    let pdf = availability(&view, FileField::PdfJson);
    assert_eq!(pdf.available, 3);
    assert_eq!(pdf.missing, 2);
    assert_eq!((pdf.available + pdf.missing) as usize, view.len());

    let pmc = availability(&view, FileField::PmcJson);
    assert_eq!((pmc.available + pmc.missing) as usize, view.len());
    assert_eq!(pmc.available, 1);
}

#[test]
fn title_text_concatenates_lowercased_titles() {
    let cleaned = cleaned_fixture();
    let view = filter_by_year_range(&cleaned, 2020, 2020).unwrap();
    assert_eq!(
        all_title_text(&view),
        "novel coronavirus study coronavirus vaccine trial"
    );
}

#[test]
fn profile_reports_shape_and_missing_ratios() {
    let raw = load_fixture();
    assert_eq!(shape(&raw), (6, 10));

    let ratios = missing_ratios(&raw);
    let lookup = |name: &str| {
        ratios
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, ratio)| *ratio)
            .unwrap_or_else(|| panic!("missing column {name}"))
    };
    assert_eq!(lookup("title"), 1.0 / 6.0);
    assert_eq!(lookup("abstract"), 2.0 / 6.0);
    assert_eq!(lookup("publish_time"), 0.0);
    assert_eq!(lookup("pdf_json_files"), 3.0 / 6.0);
    assert_eq!(lookup("url"), 5.0 / 6.0);
}

#[test]
fn parse_year_accepts_common_forms() {
    assert_eq!(parse_year("2020-03-15"), Some(2020));
    assert_eq!(parse_year("2020-12-01 08:30:00"), Some(2020));
    assert_eq!(parse_year("2021-07"), Some(2021));
    assert_eq!(parse_year("May 2019"), Some(2019));
    assert_eq!(parse_year("2018"), Some(2018));
    assert_eq!(parse_year("bad-date"), None);
    assert_eq!(parse_year(""), None);
    assert_eq!(parse_year("15"), None);
}

#[test]
fn word_count_splits_on_any_whitespace() {
    assert_eq!(word_count("Novel Coronavirus Study"), 3);
    assert_eq!(word_count("  spaced\tout \n words "), 3);
    assert_eq!(word_count(""), 0);
    assert_eq!(word_count("nan"), 1);
}

fn cleaned_with_title(title: Option<&str>, year: Option<i32>) -> CleanedRecord {
    let raw = Record {
        title: title.map(|t| t.to_string()),
        publish_time: year.map(|y| y.to_string()),
        ..Record::default()
    };
    let set = RecordSet {
        columns: Vec::new(),
        records: vec![raw],
    };
    clean(&set).records.remove(0)
}
