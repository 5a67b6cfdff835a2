use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Begin date {begin} is after end date {end}")]
    InvalidDateRange { begin: NaiveDate, end: NaiveDate },

    #[error("Station id range {first}..={last} is empty")]
    InvalidStationRange { first: u32, last: u32 },

    #[error("Target state '{0}' is not a two letter postal code")]
    InvalidState(String),
}
