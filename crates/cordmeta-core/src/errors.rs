use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read data source: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("data source header is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid year range: min {min} exceeds max {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
