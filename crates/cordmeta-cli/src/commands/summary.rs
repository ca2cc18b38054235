use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use tracing::info;

use cordmeta_core::{load_metadata, missing_ratios, shape};

use super::{print_section, two_column_table};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Path to the metadata CSV
    #[arg(short, long)]
    pub file: PathBuf,

    /// Load at most this many rows
    #[arg(long)]
    pub nrows: Option<usize>,
}

const HEAD_ROWS: usize = 5;

pub fn run_summary(args: SummaryArgs) -> Result<()> {
    info!(file = %args.file.display(), "loading metadata");
    let raw = load_metadata(&args.file, args.nrows)?;

    let (rows, columns) = shape(&raw);
    println!("{rows} rows x {columns} columns");

    let mut head = Table::new();
    head.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["title", "authors", "journal", "publish_time", "source"]);
    for record in raw.records.iter().take(HEAD_ROWS) {
        head.add_row(vec![
            record.title.as_deref().unwrap_or(""),
            record.authors.as_deref().unwrap_or(""),
            record.journal.as_deref().unwrap_or(""),
            record.publish_time.as_deref().unwrap_or(""),
            record.source.as_deref().unwrap_or(""),
        ]);
    }
    print_section(&format!("First {HEAD_ROWS} rows"), &head);

    let mut missing = two_column_table("column", "missing %");
    for (column, ratio) in missing_ratios(&raw) {
        missing.add_row(vec![column, format!("{:.2}", ratio * 100.0)]);
    }
    print_section("Missing values", &missing);

    Ok(())
}
