use crate::counties::error::CountyError;
use crate::schema::{COUNTY, LATITUDE, LONGITUDE, STATION_NAME};
use polars::prelude::*;
use std::collections::HashSet;

/// One row of the cleaned county mapping.
///
/// A county served by several stations has one entry per station; a county without a station
/// has exactly one entry whose `station_name` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyEntry {
    /// State qualified county name, e.g. `"Cass, ND"`.
    pub county_name: String,
    pub station_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// The cleaned station to county table, both as a frame (for joins and export) and as typed
/// entries.
#[derive(Debug, Clone)]
pub struct CountyMapping {
    frame: DataFrame,
    entries: Vec<CountyEntry>,
}

impl CountyMapping {
    /// Wraps a frame with `station_name`, `latitude`, `longitude` and `county` columns.
    pub(crate) fn from_frame(frame: DataFrame) -> Result<Self, CountyError> {
        let counties = frame.column(COUNTY)?.str()?;
        let stations = frame.column(STATION_NAME)?.str()?;
        let latitudes = frame.column(LATITUDE)?.f64()?;
        let longitudes = frame.column(LONGITUDE)?.f64()?;

        let entries = counties
            .into_iter()
            .zip(stations)
            .zip(latitudes)
            .zip(longitudes)
            .filter_map(|(((county, station), latitude), longitude)| {
                Some(CountyEntry {
                    county_name: county?.to_string(),
                    station_name: station.map(str::to_string),
                    latitude,
                    longitude,
                })
            })
            .collect();

        Ok(Self { frame, entries })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn entries(&self) -> &[CountyEntry] {
        &self.entries
    }

    /// Distinct county names in mapping order (sorted by name).
    pub fn county_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.county_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Stations that report for `county`, empty when it has none.
    pub fn stations_in(&self, county: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.county_name == county)
            .filter_map(|e| e.station_name.as_deref())
            .collect()
    }

    /// County a station belongs to. The first county wins if a station is listed twice.
    pub fn county_of(&self, station: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.station_name.as_deref() == Some(station))
            .map(|e| e.county_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
