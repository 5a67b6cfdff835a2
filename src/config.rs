//! Run parameters of a pipeline execution, loaded from TOML or assembled with a builder.

pub mod error;

use crate::config::error::ConfigError;
use crate::station_data::loader::DEFAULT_BASE_URL;
use crate::types::date_range::DateRange;
use bon::Builder;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Inclusive range of NDAWN station ids to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StationIdRange {
    pub first: u32,
    pub last: u32,
}

impl Default for StationIdRange {
    fn default() -> Self {
        Self { first: 1, last: 102 }
    }
}

impl StationIdRange {
    pub fn ids(&self) -> Vec<u32> {
        (self.first..=self.last).collect()
    }
}

/// Everything a run needs to know.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ndawn_gdd::PipelineConfig;
///
/// let mut config = PipelineConfig::builder()
///     .begin_date(NaiveDate::from_ymd_opt(2017, 5, 15).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2017, 9, 30).unwrap())
///     .target_state("nd")
///     .build();
/// config.validate().unwrap();
/// assert_eq!(config.target_state, "ND");
/// assert_eq!(config.station_ids.ids().len(), 102);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Builder)]
pub struct PipelineConfig {
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Two letter postal code used to qualify county names.
    #[serde(default = "default_state")]
    #[builder(into, default = default_state())]
    pub target_state: String,

    #[serde(default)]
    #[builder(default)]
    pub station_ids: StationIdRange,

    #[serde(default = "default_base_url")]
    #[builder(into, default = default_base_url())]
    pub base_url: String,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_data_dir")]
    #[builder(into, default = default_data_dir())]
    pub data_dir: PathBuf,

    #[serde(default = "default_maps_dir")]
    #[builder(into, default = default_maps_dir())]
    pub maps_dir: PathBuf,

    #[serde(default = "default_county_list_path")]
    #[builder(into, default = default_county_list_path())]
    pub county_list_path: PathBuf,

    #[serde(default = "default_station_list_path")]
    #[builder(into, default = default_station_list_path())]
    pub station_list_path: PathBuf,
}

fn default_state() -> String {
    "ND".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_maps_dir() -> PathBuf {
    PathBuf::from("maps")
}

fn default_county_list_path() -> PathBuf {
    PathBuf::from("NDcounties.csv")
}

fn default_station_list_path() -> PathBuf {
    PathBuf::from("stations.csv")
}

impl PipelineConfig {
    /// Reads and validates a TOML config file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let mut config: PipelineConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the ranges and upper-cases the state code.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.date_range()?;
        if self.station_ids.first > self.station_ids.last {
            return Err(ConfigError::InvalidStationRange {
                first: self.station_ids.first,
                last: self.station_ids.last,
            });
        }
        let state = self.target_state.trim();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidState(self.target_state.clone()));
        }
        self.target_state = state.to_ascii_uppercase();
        Ok(())
    }

    pub fn date_range(&self) -> Result<DateRange, ConfigError> {
        DateRange::new(self.begin_date, self.end_date).ok_or(ConfigError::InvalidDateRange {
            begin: self.begin_date,
            end: self.end_date,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// `<data_dir>/<STATE>counties_clean.csv`
    pub fn mapping_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}counties_clean.csv", self.target_state))
    }

    /// `<data_dir>/<STATE>CornGDD<begin><end>.csv`
    pub fn raw_export_path(&self, range: DateRange) -> PathBuf {
        self.data_dir
            .join(format!("{}CornGDD{}.csv", self.target_state, range.file_tag()))
    }

    /// `<data_dir>/<STATE>CountyGDD<begin><end>.csv`
    pub fn final_export_path(&self, range: DateRange) -> PathBuf {
        self.data_dir
            .join(format!("{}CountyGDD{}.csv", self.target_state, range.file_tag()))
    }
}
