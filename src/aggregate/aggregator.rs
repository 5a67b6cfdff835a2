use crate::aggregate::error::AggregateError;
use crate::schema::*;
use crate::types::county::CountyMapping;
use crate::types::county_aggregate::CountyAggregateTable;
use crate::types::date_range::DateRange;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Averages station readings per county and day.
#[derive(Debug, Default, Clone, Copy)]
pub struct GddAggregator;

impl GddAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Joins station rows to counties by station name and averages `accumulated_gdd` and
    /// `delta_from_5yr_avg` for every (date, county) pair of `range` × mapping counties.
    ///
    /// Stations missing from the mapping are dropped with a warning. Pairs without a
    /// contributing reading stay null.
    pub fn aggregate(
        &self,
        stations: &DataFrame,
        mapping: &CountyMapping,
        range: DateRange,
    ) -> Result<CountyAggregateTable, AggregateError> {
        require_columns(stations)?;
        let lookup = station_lookup(mapping)?;
        let dated = with_date_column(stations)?;

        let joined = dated
            .lazy()
            .join(
                lookup.lazy(),
                [col(STATION_NAME)],
                [col(STATION_NAME)],
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;
        warn_unmatched(&joined)?;

        let means = joined
            .lazy()
            .filter(col(COUNTY).is_not_null())
            .filter(
                col(DATE)
                    .gt_eq(lit(range.start))
                    .and(col(DATE).lt_eq(lit(range.end))),
            )
            .group_by_stable([col(DATE), col(COUNTY)])
            .agg([
                col(ACCUMULATED_GDD).mean().alias(MEAN_ACCUMULATED_GDD),
                col(DELTA_FROM_5YR_AVG).mean().alias(MEAN_DELTA_GDD),
            ]);

        let frame = calendar_grid(mapping, range)?
            .lazy()
            .join(
                means,
                [col(DATE), col(COUNTY)],
                [col(DATE), col(COUNTY)],
                JoinArgs::new(JoinType::Left),
            )
            .select([
                col(DATE),
                col(COUNTY),
                col(MEAN_ACCUMULATED_GDD),
                col(MEAN_DELTA_GDD),
            ])
            .sort_by_exprs(
                [col(DATE), col(COUNTY)],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        info!(
            "Aggregated {} county rows over {} days ({} without data)",
            frame.height(),
            range.len_days(),
            frame.column(MEAN_ACCUMULATED_GDD)?.null_count()
        );
        Ok(CountyAggregateTable::new(frame))
    }
}

fn require_columns(stations: &DataFrame) -> Result<(), AggregateError> {
    for name in [STATION_NAME, YEAR, MONTH, DAY, ACCUMULATED_GDD, DELTA_FROM_5YR_AVG] {
        if stations.column(name).is_err() {
            return Err(AggregateError::MissingColumn(name));
        }
    }
    Ok(())
}

/// Two column station → county frame, one row per station.
fn station_lookup(mapping: &CountyMapping) -> Result<DataFrame, AggregateError> {
    let mut county_by_station: HashMap<&str, &str> = HashMap::new();
    let mut stations = Vec::new();
    let mut counties = Vec::new();

    for entry in mapping.entries() {
        let Some(station) = entry.station_name.as_deref() else {
            continue;
        };
        match county_by_station.get(station) {
            Some(first) if *first != entry.county_name => warn!(
                "Station {} is listed under {} and {}, using {}",
                station, first, entry.county_name, first
            ),
            Some(_) => {}
            None => {
                county_by_station.insert(station, entry.county_name.as_str());
                stations.push(station);
                counties.push(entry.county_name.as_str());
            }
        }
    }

    Ok(df!(STATION_NAME => stations, COUNTY => counties)?)
}

/// Adds a `date` column built from `year`, `month` and `day`.
fn with_date_column(stations: &DataFrame) -> Result<DataFrame, AggregateError> {
    let dates: Vec<Option<NaiveDate>> = {
        let years = stations.column(YEAR)?.i32()?;
        let months = stations.column(MONTH)?.i32()?;
        let days = stations.column(DAY)?.i32()?;
        years
            .into_iter()
            .zip(months)
            .zip(days)
            .map(|((y, m), d)| {
                let month = u32::try_from(m?).ok()?;
                let day = u32::try_from(d?).ok()?;
                NaiveDate::from_ymd_opt(y?, month, day)
            })
            .collect()
    };

    let mut dated = stations.clone();
    dated.with_column(DateChunked::from_naive_date_options(DATE.into(), dates).into_series())?;
    Ok(dated)
}

fn warn_unmatched(joined: &DataFrame) -> Result<(), AggregateError> {
    let unmatched = joined
        .clone()
        .lazy()
        .filter(col(COUNTY).is_null())
        .select([col(STATION_NAME)])
        .collect()?;
    if unmatched.height() == 0 {
        return Ok(());
    }

    let names: BTreeSet<&str> = unmatched
        .column(STATION_NAME)?
        .str()?
        .into_iter()
        .flatten()
        .collect();
    for name in &names {
        warn!("Station {} has no county in the mapping, dropping its rows", name);
    }
    warn!(
        "Dropped {} rows of {} unmatched stations",
        unmatched.height(),
        names.len()
    );
    Ok(())
}

/// Every (date, county) pair to report, so counties without stations still get a row.
fn calendar_grid(mapping: &CountyMapping, range: DateRange) -> Result<DataFrame, AggregateError> {
    let counties = mapping.county_names();
    let capacity = counties.len() * range.len_days();
    let mut dates = Vec::with_capacity(capacity);
    let mut names = Vec::with_capacity(capacity);

    for date in range.iter_days() {
        for county in &counties {
            dates.push(date);
            names.push(*county);
        }
    }

    Ok(DataFrame::new(vec![
        DateChunked::from_naive_date(DATE.into(), dates)
            .into_series()
            .into(),
        Column::new(COUNTY.into(), names),
    ])?)
}
