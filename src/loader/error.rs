use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// The raw record feed is not a valid sequence of JSON objects.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON document")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON on line {line}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON array of records at the top level")]
    NotAnArray,

    #[error("Record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read record file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse records from '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to create output directory for '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to create CSV file '{0}'")]
    CsvCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed building dataset")]
    DataFrameProcessing(#[from] PolarsError),
}
