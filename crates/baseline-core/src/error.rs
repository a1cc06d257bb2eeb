use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while building a log baseline.
#[derive(Error, Debug)]
pub enum BaselineError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile could not be written to its destination.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded.
    #[error("Malformed row at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// The CSV header does not contain a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A timestamp was not an offset-aware ISO-8601 instant.
    #[error("Invalid timestamp at line {line}: {value:?}")]
    TimestampParse { line: u64, value: String },

    /// The requested bucket granularity is not supported.
    #[error("Unsupported bucket size: {0} (only \"1m\" is supported)")]
    UnsupportedBucket(String),

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the baseline crates.
pub type Result<T> = std::result::Result<T, BaselineError>;
