//! Error types for the bioconv library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bioconv operations.
#[derive(Debug, Error)]
pub enum BioconvError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to convert.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No column in the source matched a canonical field while unmatched
    /// columns are being dropped. The result would carry no data columns.
    #[error("No match: none of the {columns} source columns matched a canonical field (set keep_unmatched or supply a mapping)")]
    NoMatch { columns: usize },

    /// A later chunk's raw columns differ from the first chunk's. The
    /// mapping is fixed after the first chunk, so continuing would
    /// silently mis-map data.
    #[error("Schema drift in chunk {chunk}: column '{column}' differs from the first chunk's header")]
    SchemaDrift { chunk: usize, column: String },

    /// Error writing columnar output.
    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Result type alias for bioconv operations.
pub type Result<T> = std::result::Result<T, BioconvError>;
