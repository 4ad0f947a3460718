use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis pipeline. Row-level data problems are not
/// errors: malformed rows are dropped during normalization instead.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The required `elapsed` column is absent from an input table.
    #[error("file '{}' must contain an 'elapsed' column. Found columns: {columns:?}", path.display())]
    Schema { path: PathBuf, columns: Vec<String> },

    /// An input file could not be read or parsed as a table.
    #[error("cannot load '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// Pre-pipeline argument validation failed (exit code 2).
    #[error("{0}")]
    Args(String),
}
