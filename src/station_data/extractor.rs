use crate::schema::*;
use crate::station_data::error::StationDataError;
use crate::types::station_record::StationRecord;
use polars::prelude::*;

fn get_opt_float(column: &Column, idx: usize) -> Option<f64> {
    column.f64().ok().and_then(|ca| ca.get(idx))
}

fn get_opt_int(column: &Column, idx: usize) -> Option<i32> {
    column.i32().ok().and_then(|ca| ca.get(idx))
}

/// Converts a parsed station frame into typed records, row order preserved.
/// Rows without a station name or a complete year/month/day are skipped.
pub(crate) fn extract_station_records(
    df: &DataFrame,
) -> Result<Vec<StationRecord>, StationDataError> {
    let names = df.column(STATION_NAME)?.str()?;
    let latitude = df.column(LATITUDE)?;
    let longitude = df.column(LONGITUDE)?;
    let elevation = df.column(ELEVATION)?;
    let years = df.column(YEAR)?;
    let months = df.column(MONTH)?;
    let days = df.column(DAY)?;
    let max_temp = df.column(MAX_TEMP)?;
    let min_temp = df.column(MIN_TEMP)?;
    let rainfall = df.column(RAINFALL)?;
    let daily_gdd = df.column(DAILY_GDD)?;
    let accumulated_gdd = df.column(ACCUMULATED_GDD)?;
    let delta = df.column(DELTA_FROM_5YR_AVG)?;

    let records = (0..df.height())
        .filter_map(|idx| {
            let station_name = names.get(idx)?.to_string();
            let month = u32::try_from(get_opt_int(months, idx)?).ok()?;
            let day = u32::try_from(get_opt_int(days, idx)?).ok()?;
            Some(StationRecord {
                station_name,
                latitude: get_opt_float(latitude, idx),
                longitude: get_opt_float(longitude, idx),
                elevation: get_opt_float(elevation, idx),
                year: get_opt_int(years, idx)?,
                month,
                day,
                max_temp: get_opt_float(max_temp, idx),
                min_temp: get_opt_float(min_temp, idx),
                rainfall: get_opt_float(rainfall, idx),
                daily_gdd: get_opt_float(daily_gdd, idx),
                accumulated_gdd: get_opt_float(accumulated_gdd, idx),
                delta_from_5yr_avg: get_opt_float(delta, idx),
            })
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station_data::loader::parse_report;
    use crate::station_data::loader::tests::FARGO_REPORT;
    use chrono::NaiveDate;

    #[test]
    fn test_extract_records_from_report() -> Result<(), StationDataError> {
        let df = parse_report(FARGO_REPORT.as_bytes().to_vec(), 5)?;
        let records = extract_station_records(&df)?;

        assert_eq!(records.len(), 3);
        let first = &records[0];
        assert_eq!(first.station_name, "Fargo");
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2017, 5, 15));
        assert_eq!(first.elevation, Some(899.0));
        assert_eq!(first.rainfall, Some(0.0));
        assert_eq!(first.delta_from_5yr_avg, Some(-3.1));

        let last = &records[2];
        assert_eq!(last.max_temp, None);
        assert_eq!(last.daily_gdd, None);
        assert_eq!(last.accumulated_gdd, Some(32.4));
        Ok(())
    }
}
