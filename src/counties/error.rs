use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountyError {
    #[error("Reference file '{0}' does not exist")]
    ReferenceFileMissing(PathBuf),

    #[error("Failed to read reference file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Reference file '{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Failed processing county mapping: {0}")]
    Polars(#[from] PolarsError),
}
