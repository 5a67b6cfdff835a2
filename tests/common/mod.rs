#![allow(dead_code)]

use chrono::NaiveDate;
use mockito::{Matcher, Mock, ServerGuard};
use ndawn_gdd::DateRange;
use std::fs;
use std::path::{Path, PathBuf};

const PREAMBLE: &str = "\
\"North Dakota Agricultural Weather Network\"
\"Corn Growing Degree Days\"
\"Generated by NDAWN\"
\"Station Name\",\"Latitude\",\"Longitude\",\"Elevation\",\"Year\",\"Month\",\"Day\",\"Max Temp\",\"Max Temp Flag\",\"Min Temp\",\"Min Temp Flag\",\"Rainfall\",\"Rainfall Flag\",\"Corn Daily Growing Degree Days\",\"Corn Accumulated Growing Degree Days\",\"Departure from 5 Year Average Corn Accumulated Growing Degree Days\",\"5 Year Average Flag\"
\"\",\"deg\",\"deg\",\"ft\",\"\",\"\",\"\",\"Degrees F\",\"\",\"Degrees F\",\"\",\"inch\",\"\",\"Degrees F\",\"Degrees F\",\"Degrees F\",\"\"
";

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, month, day).unwrap()
}

pub fn season_start() -> DateRange {
    DateRange::new(date(5, 15), date(5, 16)).unwrap()
}

/// A corn GDD report for `station` with one row per (date, accumulated, delta).
pub fn report(station: &str, rows: &[(NaiveDate, f64, f64)]) -> String {
    let mut body = PREAMBLE.to_string();
    for (date, agdd, delta) in rows {
        body.push_str(&format!(
            "\"{}\",46.9,-96.8,900,{},{},{},80.0,\"\",55.0,\"\",0.00,\"\",17.5,{},{},\"\"\n",
            station,
            date.format("%Y"),
            date.format("%-m"),
            date.format("%-d"),
            agdd,
            delta
        ));
    }
    body
}

pub async fn mock_station(server: &mut ServerGuard, id: u32, body: String) -> Mock {
    server
        .mock("GET", "/table.csv")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("station".into(), id.to_string()),
            Matcher::UrlEncoded("ttype".into(), "cogdd".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_status(server: &mut ServerGuard, id: u32, status: usize) -> Mock {
    server
        .mock("GET", "/table.csv")
        .match_query(Matcher::UrlEncoded("station".into(), id.to_string()))
        .with_status(status)
        .create_async()
        .await
}

pub fn table_url(server: &ServerGuard) -> String {
    format!("{}/table.csv", server.url())
}

/// Writes the county list and station list used by the pipeline tests.
pub fn write_references(dir: &Path) -> (PathBuf, PathBuf) {
    let counties = dir.join("NDcounties.csv");
    let stations = dir.join("stations.csv");
    fs::write(&counties, "Counties\nAdams\nCass\n").unwrap();
    fs::write(
        &stations,
        "Station Name,Latitude (deg),Longitude (deg),County\n\
         Fargo,46.897,-96.812,\"Cass, ND\"\n\
         Casselton,46.900,-97.211,\"Cass, ND\"\n",
    )
    .unwrap();
    (counties, stations)
}
