use crate::aggregate::error::AggregateError;
use crate::schema::{COUNTY, DATE, MEAN_ACCUMULATED_GDD, MEAN_DELTA_GDD};
use chrono::NaiveDate;
use polars::prelude::*;

/// Mean GDD metrics of one county on one day. `None` means no station contributed a reading;
/// it must never be rendered as zero accumulation.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyAggregate {
    pub date: NaiveDate,
    pub county_name: String,
    pub mean_accumulated_gdd: Option<f64>,
    pub mean_delta_gdd: Option<f64>,
}

/// The rows of a single day, handed to renderers.
#[derive(Debug, Clone)]
pub struct DailyFrame {
    pub date: NaiveDate,
    pub frame: DataFrame,
}

/// Final per-date, per-county table, sorted by date then county.
#[derive(Debug, Clone)]
pub struct CountyAggregateTable {
    /// Columns `date`, `county`, `mean_accumulated_gdd`, `mean_delta_gdd`.
    pub frame: DataFrame,
}

impl CountyAggregateTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn records(&self) -> Result<Vec<CountyAggregate>, AggregateError> {
        let dates = self.frame.column(DATE)?.date()?;
        let counties = self.frame.column(COUNTY)?.str()?;
        let agdd = self.frame.column(MEAN_ACCUMULATED_GDD)?.f64()?;
        let delta = self.frame.column(MEAN_DELTA_GDD)?.f64()?;

        Ok(dates
            .as_date_iter()
            .zip(counties)
            .zip(agdd)
            .zip(delta)
            .filter_map(|(((date, county), agdd), delta)| {
                Some(CountyAggregate {
                    date: date?,
                    county_name: county?.to_string(),
                    mean_accumulated_gdd: agdd,
                    mean_delta_gdd: delta,
                })
            })
            .collect())
    }

    /// Distinct dates in table order.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, AggregateError> {
        let mut dates: Vec<NaiveDate> = self
            .frame
            .column(DATE)?
            .date()?
            .as_date_iter()
            .flatten()
            .collect();
        dates.dedup();
        Ok(dates)
    }

    /// Splits the table into one frame per date.
    pub fn daily_frames(&self) -> Result<Vec<DailyFrame>, AggregateError> {
        self.dates()?
            .into_iter()
            .map(|date| {
                let frame = self
                    .frame
                    .clone()
                    .lazy()
                    .filter(col(DATE).eq(lit(date)))
                    .collect()?;
                Ok(DailyFrame { date, frame })
            })
            .collect()
    }
}
