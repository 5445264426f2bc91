use std::path::PathBuf;

use td_model::Column;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing expected column {column:?} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid {column} value {value:?} on record {record} of {path}: {message}")]
    InvalidField {
        path: PathBuf,
        record: usize,
        column: Column,
        value: String,
        message: String,
    },

    #[error("unknown bond type {value:?} on record {record} of {path}")]
    UnknownBondType {
        path: PathBuf,
        record: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
