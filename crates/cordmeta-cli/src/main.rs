use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::report::{run_report, ReportArgs};
use commands::summary::{run_summary, SummaryArgs};

/// Explore and summarize research-paper metadata CSVs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print shape, sample rows, and per-column missing-value percentages
    Summary(SummaryArgs),
    /// Run the descriptive report over a year-bounded view of the data
    Report(ReportArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summary(args) => run_summary(args),
        Command::Report(args) => run_report(args),
    }
}
