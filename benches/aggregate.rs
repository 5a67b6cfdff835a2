use chrono::{Datelike, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndawn_gdd::schema::*;
use ndawn_gdd::{normalize_county, CountyMapping, DateRange, GddAggregator};
use polars::prelude::*;

const COUNTIES: usize = 53;
const STATIONS: usize = 102;

fn season() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2017, 5, 15).unwrap(),
        NaiveDate::from_ymd_opt(2017, 9, 30).unwrap(),
    )
    .unwrap()
}

fn synthetic_stations(range: DateRange) -> DataFrame {
    let mut names = Vec::new();
    let mut years = Vec::new();
    let mut months = Vec::new();
    let mut days = Vec::new();
    let mut agdd = Vec::new();
    let mut delta = Vec::new();

    for station in 0..STATIONS {
        let mut total = 0.0;
        for (i, date) in range.iter_days().enumerate() {
            total += 10.0 + (station % 7) as f64;
            names.push(format!("Station {station}"));
            years.push(date.year());
            months.push(date.month() as i32);
            days.push(date.day() as i32);
            // Every 11th reading missing
            agdd.push((i % 11 != 0).then_some(total));
            delta.push(Some(station as f64 - 50.0));
        }
    }

    let n = names.len();
    let nones: Vec<Option<f64>> = vec![None; n];
    df!(
        STATION_NAME => names,
        LATITUDE => nones.clone(),
        LONGITUDE => nones.clone(),
        ELEVATION => nones.clone(),
        YEAR => years,
        MONTH => months,
        DAY => days,
        MAX_TEMP => nones.clone(),
        MIN_TEMP => nones.clone(),
        RAINFALL => nones.clone(),
        DAILY_GDD => nones,
        ACCUMULATED_GDD => agdd,
        DELTA_FROM_5YR_AVG => delta
    )
    .unwrap()
}

fn synthetic_mapping() -> CountyMapping {
    let tempdir = tempfile::tempdir().unwrap();
    let county_path = tempdir.path().join("counties.csv");
    let station_path = tempdir.path().join("stations.csv");

    let mut county_list = String::from("Counties\n");
    for c in 0..COUNTIES {
        county_list.push_str(&format!("County {c}\n"));
    }
    let mut station_list = String::from("Station Name,County\n");
    for s in 0..STATIONS {
        let county = normalize_county(&format!("County {}", s % (COUNTIES - 5)), "ND");
        station_list.push_str(&format!("Station {s},\"{county}\"\n"));
    }
    std::fs::write(&county_path, county_list).unwrap();
    std::fs::write(&station_path, station_list).unwrap();

    ndawn_gdd::CountyResolver::builder()
        .county_list_path(county_path)
        .station_list_path(station_path)
        .build()
        .build()
        .unwrap()
}

fn bench_aggregate(c: &mut Criterion) {
    let range = season();
    let stations = synthetic_stations(range);
    let mapping = synthetic_mapping();
    let aggregator = GddAggregator::new();

    c.bench_function("aggregate_season", |b| {
        b.iter(|| {
            aggregator
                .aggregate(black_box(&stations), black_box(&mapping), range)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
