use polars::error::PolarsError;
use thiserror::Error;

/// The weather table does not have the shape the ranking needs.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Required column '{0}' not found in DataFrame")]
    MissingColumn(String),

    #[error("Column '{column}' cannot be read as a number")]
    NonNumericColumn {
        column: String,
        #[source]
        source: PolarsError,
    },
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed processing DataFrame")]
    DataFrameProcessing(#[from] PolarsError),
}
