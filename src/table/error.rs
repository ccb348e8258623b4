use std::path::PathBuf;
use thiserror::Error;

/// Dataset shape and CSV errors
#[derive(Debug, Error)]
pub enum TableError {
    /// File could not be opened, created or flushed
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not well-formed CSV (bad quoting, ragged rows, invalid UTF-8)
    #[error("Malformed CSV in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column the operation depends on is absent
    #[error("Missing required column '{column}' in {dataset}")]
    MissingColumn { dataset: String, column: String },

    /// Row does not have one cell per column
    #[error("Row {row} of {dataset} has {actual} cells, expected {expected}")]
    RowWidth {
        dataset: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Cell could not be interpreted as the value the column requires
    #[error("Invalid value '{value}' in column '{column}' at row {row} of {dataset}")]
    InvalidValue {
        dataset: String,
        column: String,
        row: usize,
        value: String,
    },

    /// Row could not be decoded into a typed record
    #[error("Invalid record at row {row} of {dataset}: {message}")]
    InvalidRecord {
        dataset: String,
        row: usize,
        message: String,
    },
}
