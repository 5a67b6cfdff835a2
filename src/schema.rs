//! Column names shared by every frame the pipeline produces, and the whitelist that maps the
//! verbose NDAWN report headers onto them.

use polars::prelude::{DataType, PlSmallStr, Schema};

pub const STATION_NAME: &str = "station_name";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const ELEVATION: &str = "elevation";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const MAX_TEMP: &str = "max_temp";
pub const MIN_TEMP: &str = "min_temp";
pub const RAINFALL: &str = "rainfall";
pub const DAILY_GDD: &str = "daily_gdd";
pub const ACCUMULATED_GDD: &str = "accumulated_gdd";
pub const DELTA_FROM_5YR_AVG: &str = "delta_from_5yr_avg";

pub const DATE: &str = "date";
pub const COUNTY: &str = "county";
pub const MEAN_ACCUMULATED_GDD: &str = "mean_accumulated_gdd";
pub const MEAN_DELTA_GDD: &str = "mean_delta_gdd";

/// Number of free-text rows NDAWN prints before the column headers.
pub(crate) const PREAMBLE_ROWS: usize = 3;
/// Title row followed by the unit row.
pub(crate) const HEADER_ROWS: usize = 2;

/// One column of the corn GDD report that survives parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportColumn {
    /// Text of the title header row.
    pub title: &'static str,
    /// Text of the unit header row, empty when the report leaves it blank.
    pub unit: &'static str,
    /// Internal column name.
    pub name: &'static str,
    pub dtype: ReportType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportType {
    Text,
    Integer,
    Float,
}

impl ReportType {
    pub(crate) fn data_type(self) -> DataType {
        match self {
            ReportType::Text => DataType::String,
            ReportType::Integer => DataType::Int32,
            ReportType::Float => DataType::Float64,
        }
    }
}

const fn column(
    title: &'static str,
    unit: &'static str,
    name: &'static str,
    dtype: ReportType,
) -> ReportColumn {
    ReportColumn {
        title,
        unit,
        name,
        dtype,
    }
}

/// Flag columns sit between these in the raw report and are never selected.
pub(crate) const REPORT_COLUMNS: [ReportColumn; 13] = [
    column("Station Name", "", STATION_NAME, ReportType::Text),
    column("Latitude", "deg", LATITUDE, ReportType::Float),
    column("Longitude", "deg", LONGITUDE, ReportType::Float),
    column("Elevation", "ft", ELEVATION, ReportType::Float),
    column("Year", "", YEAR, ReportType::Integer),
    column("Month", "", MONTH, ReportType::Integer),
    column("Day", "", DAY, ReportType::Integer),
    column("Max Temp", "Degrees F", MAX_TEMP, ReportType::Float),
    column("Min Temp", "Degrees F", MIN_TEMP, ReportType::Float),
    column("Rainfall", "inch", RAINFALL, ReportType::Float),
    column(
        "Corn Daily Growing Degree Days",
        "Degrees F",
        DAILY_GDD,
        ReportType::Float,
    ),
    column(
        "Corn Accumulated Growing Degree Days",
        "Degrees F",
        ACCUMULATED_GDD,
        ReportType::Float,
    ),
    column(
        "Departure from 5 Year Average Corn Accumulated Growing Degree Days",
        "Degrees F",
        DELTA_FROM_5YR_AVG,
        ReportType::Float,
    ),
];

/// The internal station column names, in report order.
pub fn station_column_names() -> Vec<&'static str> {
    REPORT_COLUMNS.iter().map(|c| c.name).collect()
}

/// Schema of a parsed station frame. Used to build an empty frame when no station succeeds.
pub(crate) fn station_schema() -> Schema {
    REPORT_COLUMNS
        .iter()
        .map(|c| (PlSmallStr::from_static(c.name), c.dtype.data_type()))
        .collect()
}
