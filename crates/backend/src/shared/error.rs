use contracts::domain::common::RowOrigin;
use std::path::PathBuf;
use thiserror::Error;

/// Source files could not be found, read or decoded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no order partitions matching {pattern:?} in {}", .dir.display())]
    NoPartitions { dir: PathBuf, pattern: String },

    #[error("invalid partition pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no {column:?} column", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// A field value could not be converted to its typed form.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{origin}: cannot parse order date {value:?}")]
    InvalidDate { origin: RowOrigin, value: String },

    #[error("{origin}: cannot parse {column:?} value {value:?} as a number")]
    InvalidNumber {
        origin: RowOrigin,
        column: String,
        value: String,
    },
}

/// Any failure while building the session table. Raised only at
/// construction time; aggregation never fails.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
