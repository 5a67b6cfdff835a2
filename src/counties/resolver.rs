use crate::counties::error::CountyError;
use crate::counties::normalize::normalize_county;
use crate::schema::{COUNTY, LATITUDE, LONGITUDE, STATION_NAME};
use crate::types::county::CountyMapping;
use bon::bon;
use log::{info, warn};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Column of the county list holding bare county names.
pub const COUNTY_LIST_COLUMN: &str = "Counties";
pub const STATION_LIST_NAME: &str = "Station Name";
pub const STATION_LIST_LATITUDE: &str = "Latitude (deg)";
pub const STATION_LIST_LONGITUDE: &str = "Longitude (deg)";
/// Already state qualified in the station list.
pub const STATION_LIST_COUNTY: &str = "County";

const COUNTY_KEY: &str = "county_key";

/// Builds the station to county mapping from the two reference lists.
pub struct CountyResolver {
    county_list_path: PathBuf,
    station_list_path: PathBuf,
    state: String,
}

#[bon]
impl CountyResolver {
    #[builder]
    pub fn new(
        #[builder(into)] county_list_path: PathBuf,
        #[builder(into)] station_list_path: PathBuf,
        #[builder(into, default = "ND".to_string())] state: String,
    ) -> Self {
        Self {
            county_list_path,
            station_list_path,
            state,
        }
    }

    /// Full outer join of the state's counties with the station list on the qualified county
    /// name. Counties without a station keep a null station, stations of other states are kept
    /// under their own county label.
    pub fn build(&self) -> Result<CountyMapping, CountyError> {
        let county_list = read_reference(&self.county_list_path)?;
        let station_list = read_reference(&self.station_list_path)?;

        let base = self.base_counties(&county_list)?;
        let stations = station_frame(&station_list, &self.station_list_path)?;

        let joined = base
            .lazy()
            .join(
                stations.lazy(),
                [col(COUNTY_KEY)],
                [col(COUNTY)],
                JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::KeepColumns),
            )
            .with_column(col(COUNTY).fill_null(col(COUNTY_KEY)))
            .select([col(STATION_NAME), col(LATITUDE), col(LONGITUDE), col(COUNTY)])
            .sort_by_exprs(
                [col(COUNTY), col(STATION_NAME)],
                SortMultipleOptions::default()
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .collect()?;

        let mapping = CountyMapping::from_frame(joined)?;
        let without_station = mapping
            .entries()
            .iter()
            .filter(|e| e.station_name.is_none())
            .count();
        info!(
            "Resolved {} counties ({} without a station) from {} mapping rows",
            mapping.county_names().len(),
            without_station,
            mapping.len()
        );
        Ok(mapping)
    }

    /// The state's counties, qualified and de-duplicated, in file order.
    fn base_counties(&self, county_list: &DataFrame) -> Result<DataFrame, CountyError> {
        let names = require_column(county_list, &self.county_list_path, COUNTY_LIST_COLUMN)?;
        let mut seen = HashSet::new();
        let normalized: Vec<String> = names
            .str()?
            .into_iter()
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .map(|name| normalize_county(name, &self.state))
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Ok(df!(COUNTY_KEY => normalized)?)
    }
}

fn read_reference(path: &Path) -> Result<DataFrame, CountyError> {
    if !path.is_file() {
        return Err(CountyError::ReferenceFileMissing(path.to_path_buf()));
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| CountyError::CsvRead(path.to_path_buf(), e))
}

fn require_column<'a>(
    df: &'a DataFrame,
    path: &Path,
    column: &'static str,
) -> Result<&'a Column, CountyError> {
    df.column(column).map_err(|_| CountyError::MissingColumn {
        path: path.to_path_buf(),
        column,
    })
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn float_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, CountyError> {
    match df.column(column) {
        Ok(c) => {
            let cast = c.cast(&DataType::Float64)?;
            Ok(cast.f64()?.into_iter().collect())
        }
        Err(_) => Ok(vec![None; df.height()]),
    }
}

/// Station list reduced to the mapping columns. Rows without a station name or county label
/// cannot be joined to anything and are dropped.
fn station_frame(station_list: &DataFrame, path: &Path) -> Result<DataFrame, CountyError> {
    let names = require_column(station_list, path, STATION_LIST_NAME)?.str()?;
    let counties = require_column(station_list, path, STATION_LIST_COUNTY)?.str()?;
    let latitudes = float_values(station_list, STATION_LIST_LATITUDE)?;
    let longitudes = float_values(station_list, STATION_LIST_LONGITUDE)?;

    let mut station_names = Vec::with_capacity(station_list.height());
    let mut station_counties = Vec::with_capacity(station_list.height());
    let mut station_latitudes = Vec::with_capacity(station_list.height());
    let mut station_longitudes = Vec::with_capacity(station_list.height());

    for (idx, (name, county)) in names.into_iter().zip(counties).enumerate() {
        match (trimmed(name), trimmed(county)) {
            (Some(name), Some(county)) => {
                station_names.push(name);
                station_counties.push(county);
                station_latitudes.push(latitudes[idx]);
                station_longitudes.push(longitudes[idx]);
            }
            (name, _) => warn!(
                "Skipping station list row {} ({}) without a station name or county",
                idx + 1,
                name.unwrap_or("unnamed")
            ),
        }
    }

    Ok(df!(
        STATION_NAME => station_names,
        LATITUDE => station_latitudes,
        LONGITUDE => station_longitudes,
        COUNTY => station_counties
    )?)
}
