pub mod aggregate;
pub mod clean;
pub mod errors;
pub mod loader;
pub mod model;
pub mod profile;
pub mod stopwords;
pub mod view;

pub use aggregate::{
    all_title_text, availability, count_by_key, mean_by_year, tokenize_titles,
};
pub use clean::clean;
pub use errors::{PipelineError, Result};
pub use loader::{load_metadata, load_metadata_from_reader};
pub use model::{
    Availability, CleanedRecord, CleanedRecordSet, FileField, KeyField, Record, RecordSet,
    ValueField,
};
pub use profile::{missing_ratios, shape};
pub use stopwords::{default_stopwords, stopword_set};
pub use view::{filter_by_year_range, FilteredView};

#[cfg(test)]
mod tests;
