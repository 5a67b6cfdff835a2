use polars::error::PolarsError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationDataError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Empty response body for station {station}")]
    EmptyResponse { station: u32 },

    #[error("Parsing error processing CSV data for station {station}")]
    CsvRead {
        station: u32,
        #[source]
        source: PolarsError,
    },

    #[error("Report for station {station} has no column '{title}' [{unit}]")]
    MissingColumn {
        station: u32,
        title: &'static str,
        unit: &'static str,
    },

    #[error("No data rows for station {station}, station missing?")]
    NoData { station: u32 },

    #[error("Polars operation failed for station {station}: {source}")]
    Polars {
        station: u32,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// The two ways a single station can fail without aborting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport error or non-success HTTP status.
    Network,
    /// The payload did not have the expected tabular shape.
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network"),
            FailureKind::Parse => write!(f, "parse"),
        }
    }
}

impl StationDataError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StationDataError::ClientBuild(_)
            | StationDataError::NetworkRequest(..)
            | StationDataError::HttpStatus { .. } => FailureKind::Network,
            StationDataError::EmptyResponse { .. }
            | StationDataError::CsvRead { .. }
            | StationDataError::MissingColumn { .. }
            | StationDataError::NoData { .. }
            | StationDataError::Polars { .. }
            | StationDataError::DataFrameProcessing(_)
            | StationDataError::TaskJoin(_) => FailureKind::Parse,
        }
    }
}
