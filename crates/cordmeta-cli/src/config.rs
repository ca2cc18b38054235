use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_TOP_N: usize = 10;

/// Optional TOML report settings. Command-line flags override anything
/// set here.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub top_journals: Option<usize>,
    pub top_authors: Option<usize>,
    pub top_words: Option<usize>,
    pub extra_stopwords: Vec<String>,
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
