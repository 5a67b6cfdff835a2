use crate::schema::{station_schema, STATION_NAME};
use crate::station_data::error::{FailureKind, StationDataError};
use crate::station_data::extractor::extract_station_records;
use crate::station_data::loader::{StationDataLoader, DEFAULT_BASE_URL};
use crate::types::date_range::DateRange;
use crate::types::station_record::StationRecord;
use bon::bon;
use log::{info, warn};
use polars::prelude::DataFrame;
use std::time::Duration;

/// A station that was skipped during a batch fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFailure {
    pub station_id: u32,
    pub kind: FailureKind,
    pub message: String,
}

impl StationFailure {
    fn new(station_id: u32, error: &StationDataError) -> Self {
        Self {
            station_id,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Requested versus parsed stations of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub requested: usize,
    /// Ids of stations whose report was parsed, in request order.
    pub succeeded: Vec<u32>,
    pub failures: Vec<StationFailure>,
}

impl FetchSummary {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures_of_kind(&self, kind: FailureKind) -> impl Iterator<Item = &StationFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }
}

/// Concatenated station frames plus the batch summary.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Every parsed row in request order, 13 columns.
    pub frame: DataFrame,
    pub summary: FetchSummary,
}

impl FetchOutcome {
    pub fn records(&self) -> Result<Vec<StationRecord>, StationDataError> {
        extract_station_records(&self.frame)
    }

    /// Number of distinct station names that delivered rows.
    pub fn distinct_station_names(&self) -> Result<usize, StationDataError> {
        Ok(self.frame.column(STATION_NAME)?.n_unique()?)
    }
}

/// Fetches corn GDD reports one station at a time.
pub struct StationFetcher {
    loader: StationDataLoader,
}

#[bon]
impl StationFetcher {
    /// Creates a fetcher.
    ///
    /// * `.base_url(..)`: Optional. Report endpoint, defaults to the public NDAWN table.
    /// * `.timeout(Duration)`: Optional. Per-request timeout, no timeout by default.
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_BASE_URL.to_string())] base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, StationDataError> {
        Ok(Self {
            loader: StationDataLoader::new(base_url, timeout)?,
        })
    }

    /// Fetches every station in order. A station that fails to download or parse is logged,
    /// recorded in the summary and skipped; the batch itself never fails.
    pub async fn fetch(&self, station_ids: &[u32], range: DateRange) -> FetchOutcome {
        let mut summary = FetchSummary {
            requested: station_ids.len(),
            ..FetchSummary::default()
        };
        let mut combined: Option<DataFrame> = None;

        for &station in station_ids {
            let appended = match self.loader.get_frame(station, range).await {
                Ok(frame) => match combined.as_mut() {
                    Some(acc) => acc.vstack_mut(&frame).map(|_| ()).map_err(|source| {
                        StationDataError::Polars { station, source }
                    }),
                    None => {
                        combined = Some(frame);
                        Ok(())
                    }
                },
                Err(e) => Err(e),
            };

            match appended {
                Ok(()) => summary.succeeded.push(station),
                Err(e) => {
                    warn!(
                        "Error converting station #{} to a frame ({} failure): {}",
                        station,
                        e.kind(),
                        e
                    );
                    summary.failures.push(StationFailure::new(station, &e));
                }
            }
        }

        info!(
            "Successfully retrieved {} of {} stations",
            summary.succeeded_count(),
            summary.requested
        );

        let frame =
            combined.unwrap_or_else(|| DataFrame::empty_with_schema(&station_schema()));
        FetchOutcome { frame, summary }
    }
}
