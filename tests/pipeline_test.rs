mod common;

use chrono::NaiveDate;
use common::*;
use mockito::Server;
use ndawn_gdd::schema::{COUNTY, MEAN_ACCUMULATED_GDD};
use ndawn_gdd::{
    ChoroplethRenderer, CountyError, FailureKind, GddError, GddPipeline, MapLayer,
    PipelineConfig, RenderError, StationIdRange,
};
use polars::prelude::DataFrame;
use std::fs;
use std::path::Path;

fn config(dir: &Path, base_url: String) -> PipelineConfig {
    let (counties, stations) = write_references(dir);
    PipelineConfig::builder()
        .begin_date(date(5, 15))
        .end_date(date(5, 16))
        .station_ids(StationIdRange { first: 1, last: 3 })
        .base_url(base_url)
        .data_dir(dir.join("data"))
        .maps_dir(dir.join("maps"))
        .county_list_path(counties)
        .station_list_path(stations)
        .build()
}

#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<(MapLayer, NaiveDate, usize, usize)>,
}

impl ChoroplethRenderer for RecordingRenderer {
    fn render(
        &mut self,
        layer: MapLayer,
        date: NaiveDate,
        frame: &DataFrame,
    ) -> Result<(), RenderError> {
        let nulls = frame.column(layer.value_column())?.null_count();
        self.calls.push((layer, date, frame.height(), nulls));
        Ok(())
    }
}

#[tokio::test]
async fn test_full_run_with_one_failing_station() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new_async().await;
    let _fargo = mock_station(
        &mut server,
        1,
        report("Fargo", &[(date(5, 15), 1000.0, 10.0), (date(5, 16), 1020.0, 12.0)]),
    )
    .await;
    let _casselton = mock_station(
        &mut server,
        2,
        report("Casselton", &[(date(5, 15), 1200.0, 30.0)]),
    )
    .await;
    let _down = mock_status(&mut server, 3, 500).await;

    let pipeline = GddPipeline::new(config(dir.path(), table_url(&server))).unwrap();
    let report = pipeline.run().await.unwrap();

    assert_eq!(report.summary.requested, 3);
    assert_eq!(report.summary.succeeded, vec![1, 2]);
    assert_eq!(
        report
            .summary
            .failures_of_kind(FailureKind::Network)
            .count(),
        1
    );

    let records = report.aggregates.records().unwrap();
    assert_eq!(records.len(), 4);
    let cass_first_day = records
        .iter()
        .find(|r| r.date == date(5, 15) && r.county_name == "Cass, ND")
        .unwrap();
    assert_eq!(cass_first_day.mean_accumulated_gdd, Some(1100.0));
    assert_eq!(cass_first_day.mean_delta_gdd, Some(20.0));
    assert!(records
        .iter()
        .filter(|r| r.county_name == "Adams, ND")
        .all(|r| r.mean_accumulated_gdd.is_none()));

    assert_eq!(
        report.final_export_path,
        dir.path()
            .join("data")
            .join("NDCountyGDD2017-05-152017-05-16.csv")
    );
    let exported = fs::read_to_string(&report.final_export_path).unwrap();
    assert!(exported.starts_with("date,county,mean_accumulated_gdd,mean_delta_gdd\n"));
    assert!(exported.contains("2017-05-15,\"Adams, ND\",,\n"));
    assert!(report.raw_export_path.is_file());

    let mapping = fs::read_to_string(&report.mapping_path).unwrap();
    assert!(mapping.starts_with("station_name,latitude,longitude,county\n"));
    assert_eq!(report.mapping.county_names(), vec!["Adams, ND", "Cass, ND"]);
}

#[tokio::test]
async fn test_renderer_sees_every_layer_and_day() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new_async().await;
    let _fargo = mock_station(
        &mut server,
        1,
        report("Fargo", &[(date(5, 15), 900.0, -5.0), (date(5, 16), 915.0, -4.0)]),
    )
    .await;

    let pipeline = GddPipeline::new(config(dir.path(), table_url(&server))).unwrap();
    let mut renderer = RecordingRenderer::default();
    let report = pipeline.run_with_renderer(&mut renderer).await.unwrap();

    assert_eq!(renderer.calls.len(), 4);
    assert_eq!(renderer.calls[0], (MapLayer::AccumulatedGdd, date(5, 15), 2, 1));
    assert_eq!(renderer.calls[2].0, MapLayer::DeltaFromAverage);
    assert!(dir.path().join("maps").join("AGDD").is_dir());
    assert!(dir.path().join("maps").join("Delta").is_dir());

    let frame = &report.aggregates.frame;
    assert_eq!(frame.column(COUNTY).unwrap().null_count(), 0);
    assert_eq!(frame.column(MEAN_ACCUMULATED_GDD).unwrap().null_count(), 2);
}

#[tokio::test]
async fn test_missing_reference_file_aborts_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new_async().await;
    let untouched = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = config(dir.path(), table_url(&server));
    config.station_list_path = dir.path().join("missing_stations.csv");
    let err = GddPipeline::new(config).unwrap().run().await.unwrap_err();

    untouched.assert_async().await;
    assert!(matches!(
        err,
        GddError::County(CountyError::ReferenceFileMissing(_))
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), "http://localhost/table.csv".to_string());
    config.end_date = date(5, 1);

    assert!(matches!(
        GddPipeline::new(config),
        Err(GddError::Config(_))
    ));
}
