use chrono::NaiveDate;

/// One day of the corn GDD report for one station.
///
/// Temperatures and GDD values are in degrees Fahrenheit, rainfall in inches and elevation in
/// feet. Readings the station did not report are `None`.
#[derive(Debug, PartialEq, Clone)]
pub struct StationRecord {
    pub station_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub rainfall: Option<f64>,
    pub daily_gdd: Option<f64>,
    pub accumulated_gdd: Option<f64>,
    /// Departure of `accumulated_gdd` from its 5 year average.
    pub delta_from_5yr_avg: Option<f64>,
}

impl StationRecord {
    /// Calendar date of the reading, `None` for an impossible year/month/day combination.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}
