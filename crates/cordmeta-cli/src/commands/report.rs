use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use cordmeta_core::{
    all_title_text, availability, clean, count_by_key, filter_by_year_range, load_metadata,
    mean_by_year, stopword_set, tokenize_titles, Availability, FileField, KeyField, ValueField,
};

use crate::config::{ReportConfig, DEFAULT_TOP_N};

use super::{print_section, two_column_table};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the metadata CSV
    #[arg(short, long)]
    pub file: PathBuf,

    /// Load at most this many rows
    #[arg(long)]
    pub nrows: Option<usize>,

    /// Optional TOML config with report defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lower publication-year bound (inclusive)
    #[arg(long)]
    pub min_year: Option<i32>,

    /// Upper publication-year bound (inclusive)
    #[arg(long)]
    pub max_year: Option<i32>,

    /// How many journals to rank
    #[arg(long)]
    pub top_journals: Option<usize>,

    /// How many author groups to rank
    #[arg(long)]
    pub top_authors: Option<usize>,

    /// How many title words to rank
    #[arg(long)]
    pub top_words: Option<usize>,

    /// Write the report data as JSON to this path
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Write the concatenated lower-cased title text (word-cloud input)
    /// to this path
    #[arg(long)]
    pub wordcloud_text_out: Option<PathBuf>,
}

#[derive(Serialize)]
struct RankedCount {
    key: String,
    count: u64,
}

#[derive(Serialize)]
struct YearMean {
    year: i32,
    mean: f64,
}

#[derive(Serialize)]
struct ReportData {
    min_year: i32,
    max_year: i32,
    records_in_view: usize,
    top_journals: Vec<RankedCount>,
    top_authors: Vec<RankedCount>,
    papers_per_year: Vec<RankedCount>,
    papers_per_source: Vec<RankedCount>,
    pdf_json_availability: Availability,
    pmc_json_availability: Availability,
    avg_abstract_words_per_year: Vec<YearMean>,
    top_title_words: Vec<RankedCount>,
}

pub fn run_report(args: ReportArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    let top_journals = args
        .top_journals
        .or(config.top_journals)
        .unwrap_or(DEFAULT_TOP_N);
    let top_authors = args
        .top_authors
        .or(config.top_authors)
        .unwrap_or(DEFAULT_TOP_N);
    let top_words = args.top_words.or(config.top_words).unwrap_or(DEFAULT_TOP_N);

    info!(file = %args.file.display(), "loading metadata");
    let raw = load_metadata(&args.file, args.nrows)?;
    let cleaned = clean(&raw);

    let observed_years: Vec<i32> = cleaned.iter().filter_map(|r| r.year).collect();
    let (observed_min, observed_max) = match (
        observed_years.iter().min().copied(),
        observed_years.iter().max().copied(),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => bail!("no records with a parseable publication year"),
    };
    let min_year = args.min_year.or(config.min_year).unwrap_or(observed_min);
    let max_year = args.max_year.or(config.max_year).unwrap_or(observed_max);

    let view = filter_by_year_range(&cleaned, min_year, max_year)?;
    info!(
        min_year,
        max_year,
        records = view.len(),
        "filtered year-bounded view"
    );

    let data = ReportData {
        min_year,
        max_year,
        records_in_view: view.len(),
        top_journals: ranked(count_by_key(&view, KeyField::Journal, top_journals)?),
        top_authors: ranked(count_by_key(&view, KeyField::Authors, top_authors)?),
        papers_per_year: ranked(count_by_key(&view, KeyField::Year, DEFAULT_TOP_N)?),
        papers_per_source: ranked(count_by_key(&view, KeyField::Source, DEFAULT_TOP_N)?),
        pdf_json_availability: availability(&view, FileField::PdfJson),
        pmc_json_availability: availability(&view, FileField::PmcJson),
        avg_abstract_words_per_year: mean_by_year(&view, ValueField::AbstractWordCount)
            .into_iter()
            .map(|(year, mean)| YearMean { year, mean })
            .collect(),
        top_title_words: ranked(tokenize_titles(
            &view,
            &stopword_set(&config.extra_stopwords),
            top_words,
        )?),
    };

    render(&data);

    if let Some(path) = &args.json_out {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &data)?;
        info!(path = %path.display(), "report data written");
    }

    if let Some(path) = &args.wordcloud_text_out {
        std::fs::write(path, all_title_text(&view))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "word-cloud text written");
    }

    Ok(())
}

fn ranked(entries: Vec<(String, u64)>) -> Vec<RankedCount> {
    entries
        .into_iter()
        .map(|(key, count)| RankedCount { key, count })
        .collect()
}

fn render(data: &ReportData) {
    println!(
        "Report over {} records, years {}..={}",
        data.records_in_view, data.min_year, data.max_year
    );

    print_ranked("Top journals", "journal", "papers", &data.top_journals);
    print_ranked("Top authors", "authors", "papers", &data.top_authors);
    print_ranked("Papers per year", "year", "papers", &data.papers_per_year);
    print_ranked("Papers per source", "source", "papers", &data.papers_per_source);

    let mut files = two_column_table("field", "available / missing");
    for (field, counts) in [
        ("pdf_json_files", data.pdf_json_availability),
        ("pmc_json_files", data.pmc_json_availability),
    ] {
        files.add_row(vec![
            field.to_string(),
            format!("{} / {}", counts.available, counts.missing),
        ]);
    }
    print_section("File availability", &files);

    let mut means = two_column_table("year", "avg abstract words");
    for entry in &data.avg_abstract_words_per_year {
        means.add_row(vec![entry.year.to_string(), format!("{:.1}", entry.mean)]);
    }
    print_section("Average abstract word count per year", &means);

    print_ranked("Top title words", "word", "frequency", &data.top_title_words);
}

fn print_ranked(title: &str, key_header: &str, value_header: &str, entries: &[RankedCount]) {
    let mut table = two_column_table(key_header, value_header);
    for entry in entries {
        table.add_row(vec![entry.key.clone(), entry.count.to_string()]);
    }
    print_section(title, &table);
}
