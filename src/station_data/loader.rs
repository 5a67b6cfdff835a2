use crate::schema::{ReportColumn, ReportType, HEADER_ROWS, PREAMBLE_ROWS, REPORT_COLUMNS, YEAR};
use crate::station_data::error::StationDataError;
use crate::types::date_range::{DateRange, REQUEST_DATE_FORMAT};
use log::{debug, info, warn};
use polars::prelude::*;
use reqwest::Client;
use std::io::Cursor;
use std::time::Duration;
use tokio::task;

/// NDAWN report type for corn growing degree days.
pub(crate) const REPORT_TYPE: &str = "cogdd";
/// Presence of this (valueless) parameter adds the 5 year average departure column.
pub(crate) const FIVE_YEAR_AVERAGE_PARAM: &str = "d5y";

pub const DEFAULT_BASE_URL: &str = "https://ndawn.ndsu.nodak.edu/table.csv";

pub struct StationDataLoader {
    base_url: String,
    download_client: Client,
}

impl StationDataLoader {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<StationDataLoader, StationDataError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let download_client = builder.build().map_err(StationDataError::ClientBuild)?;
        Ok(StationDataLoader {
            base_url: base_url.into(),
            download_client,
        })
    }

    /// Downloads and parses the corn GDD report of one station.
    /// The returned frame has exactly the internal 13 column schema.
    pub async fn get_frame(
        &self,
        station: u32,
        range: DateRange,
    ) -> Result<DataFrame, StationDataError> {
        let raw_bytes = self.download(station, range).await?;
        Self::csv_to_dataframe(raw_bytes, station).await
    }

    /// Issues the single request for a station and returns the body as an owned buffer.
    async fn download(&self, station: u32, range: DateRange) -> Result<Vec<u8>, StationDataError> {
        let begin = range.start.format(REQUEST_DATE_FORMAT).to_string();
        let end = range.end.format(REQUEST_DATE_FORMAT).to_string();
        let station_param = station.to_string();
        let url = format!("{}?station={}", self.base_url, station);
        debug!("Requesting {} from {} to {}", url, begin, end);

        let response = self
            .download_client
            .get(&self.base_url)
            .query(&[
                ("station", station_param.as_str()),
                ("begin_date", begin.as_str()),
                ("end_date", end.as_str()),
                ("ttype", REPORT_TYPE),
                (FIVE_YEAR_AVERAGE_PARAM, ""),
            ])
            .send()
            .await
            .map_err(|e| StationDataError::NetworkRequest(url.clone(), e))?;

        info!(
            "Request status code from station #{}: {}",
            station,
            response.status()
        );

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    StationDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    StationDataError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| StationDataError::NetworkRequest(url, e))?;
        Ok(body.to_vec())
    }

    /// Parses the report on the blocking pool. The buffer is owned by the task,
    /// nothing touches the filesystem.
    async fn csv_to_dataframe(bytes: Vec<u8>, station: u32) -> Result<DataFrame, StationDataError> {
        task::spawn_blocking(move || parse_report(bytes, station)).await?
    }
}

/// Parses a raw corn GDD report: skips the preamble, matches the two header rows against the
/// column whitelist and keeps only the whitelisted columns under their internal names.
pub(crate) fn parse_report(bytes: Vec<u8>, station: u32) -> Result<DataFrame, StationDataError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(StationDataError::EmptyResponse { station });
    }

    let header = read_rows(bytes.clone(), PREAMBLE_ROWS, Some(HEADER_ROWS), station)?;
    let positions = locate_columns(&header, station)?;
    let raw = read_rows(bytes, PREAMBLE_ROWS + HEADER_ROWS, None, station)?;

    let selected = REPORT_COLUMNS
        .iter()
        .zip(positions)
        .map(|(report_column, idx)| {
            raw.select_at_idx(idx)
                .map(|c| c.clone().with_name(PlSmallStr::from_static(report_column.name)))
                .ok_or_else(|| missing_column(report_column, station))
        })
        .collect::<Result<Vec<Column>, _>>()?;

    // Text is trimmed so station names join against the trimmed station list.
    let casts: Vec<Expr> = REPORT_COLUMNS
        .iter()
        .map(|c| match c.dtype {
            ReportType::Text => col(c.name).str().strip_chars(lit(NULL)),
            dtype => col(c.name).cast(dtype.data_type()),
        })
        .collect();

    let frame = DataFrame::new(selected)
        .and_then(|df| {
            df.lazy()
                .with_columns(casts)
                .filter(col(YEAR).is_not_null())
                .collect()
        })
        .map_err(|source| StationDataError::Polars { station, source })?;

    if frame.height() == 0 {
        return Err(StationDataError::NoData { station });
    }
    Ok(frame)
}

/// Reads rows as untyped strings, starting after `skip` lines.
fn read_rows(
    bytes: Vec<u8>,
    skip: usize,
    n_rows: Option<usize>,
    station: u32,
) -> Result<DataFrame, StationDataError> {
    CsvReadOptions::default()
        .with_has_header(false)
        .with_skip_rows(skip)
        .with_n_rows(n_rows)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| match source {
            PolarsError::NoData(_) => StationDataError::NoData { station },
            source => StationDataError::CsvRead { station, source },
        })
}

/// Finds the positional index of every whitelisted column in the two header rows.
/// Titles repeat across flag columns, so the unit row is part of the match.
fn locate_columns(header: &DataFrame, station: u32) -> Result<Vec<usize>, StationDataError> {
    let cells: Vec<(String, String)> = header
        .get_columns()
        .iter()
        .map(|c| (header_cell(c, 0), header_cell(c, 1)))
        .collect();

    REPORT_COLUMNS
        .iter()
        .map(|wanted| {
            cells
                .iter()
                .position(|(title, unit)| title == wanted.title && unit == wanted.unit)
                .ok_or_else(|| missing_column(wanted, station))
        })
        .collect()
}

fn header_cell(column: &Column, row: usize) -> String {
    column
        .str()
        .ok()
        .and_then(|ca| ca.get(row))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn missing_column(column: &ReportColumn, station: u32) -> StationDataError {
    StationDataError::MissingColumn {
        station,
        title: column.title,
        unit: column.unit,
    }
}
