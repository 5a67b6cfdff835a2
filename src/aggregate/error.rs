use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),

    #[error("Station frame has no '{0}' column")]
    MissingColumn(&'static str),
}
