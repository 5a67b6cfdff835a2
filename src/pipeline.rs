//! End to end run: resolve counties, fetch station reports, aggregate, export.

use crate::aggregate::aggregator::GddAggregator;
use crate::config::PipelineConfig;
use crate::counties::resolver::CountyResolver;
use crate::error::GddError;
use crate::export::write_csv;
use crate::render::{ChoroplethRenderer, MapLayer};
use crate::station_data::fetcher::{FetchSummary, StationFetcher};
use crate::types::county::CountyMapping;
use crate::types::county_aggregate::CountyAggregateTable;
use crate::utils::ensure_dir_exists;
use log::{info, warn};
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: FetchSummary,
    pub mapping: CountyMapping,
    pub aggregates: CountyAggregateTable,
    pub mapping_path: PathBuf,
    pub raw_export_path: PathBuf,
    pub final_export_path: PathBuf,
}

pub struct GddPipeline {
    config: PipelineConfig,
}

impl GddPipeline {
    /// Validates `config` and prepares a pipeline.
    pub fn new(mut config: PipelineConfig) -> Result<Self, GddError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs without producing maps.
    pub async fn run(&self) -> Result<RunReport, GddError> {
        self.execute(None).await
    }

    /// Runs and then hands every day of every [`MapLayer`] to `renderer`.
    pub async fn run_with_renderer(
        &self,
        renderer: &mut dyn ChoroplethRenderer,
    ) -> Result<RunReport, GddError> {
        self.execute(Some(renderer)).await
    }

    async fn execute(
        &self,
        renderer: Option<&mut dyn ChoroplethRenderer>,
    ) -> Result<RunReport, GddError> {
        let config = &self.config;
        let range = config.date_range()?;
        info!(
            "Starting {} corn GDD run for {} (stations {}..={})",
            config.target_state, range, config.station_ids.first, config.station_ids.last
        );

        // Reference files are read before any request goes out.
        let mapping = CountyResolver::builder()
            .county_list_path(config.county_list_path.clone())
            .station_list_path(config.station_list_path.clone())
            .state(config.target_state.clone())
            .build()
            .build()?;

        ensure_dir_exists(&config.data_dir).await?;
        let mapping_path = write_csv(mapping.frame().clone(), config.mapping_path()).await?;

        let fetcher = StationFetcher::builder()
            .base_url(config.base_url.clone())
            .maybe_timeout(config.request_timeout())
            .build()?;
        let outcome = fetcher.fetch(&config.station_ids.ids(), range).await;
        if outcome.summary.succeeded.is_empty() {
            warn!("No station returned data for {}, every county will be empty", range);
        }
        for failure in &outcome.summary.failures {
            warn!(
                "Station #{} skipped ({}): {}",
                failure.station_id, failure.kind, failure.message
            );
        }

        let raw_export_path =
            write_csv(outcome.frame.clone(), config.raw_export_path(range)).await?;

        let aggregates = GddAggregator::new().aggregate(&outcome.frame, &mapping, range)?;
        let final_export_path =
            write_csv(aggregates.frame.clone(), config.final_export_path(range)).await?;

        if let Some(renderer) = renderer {
            self.render(renderer, &aggregates).await?;
        }

        info!(
            "Finished: {} of {} stations, {} county rows in {}",
            outcome.summary.succeeded_count(),
            outcome.summary.requested,
            aggregates.height(),
            final_export_path.display()
        );

        Ok(RunReport {
            summary: outcome.summary,
            mapping,
            aggregates,
            mapping_path,
            raw_export_path,
            final_export_path,
        })
    }

    async fn render(
        &self,
        renderer: &mut dyn ChoroplethRenderer,
        aggregates: &CountyAggregateTable,
    ) -> Result<(), GddError> {
        for layer in MapLayer::ALL {
            ensure_dir_exists(&layer.output_dir(&self.config.maps_dir)).await?;
        }

        let days = aggregates.daily_frames()?;
        for layer in MapLayer::ALL {
            info!("Rendering {} {} maps", days.len(), layer);
            for day in &days {
                renderer
                    .render(layer, day.date, &day.frame)
                    .map_err(|source| GddError::Render {
                        layer,
                        date: day.date,
                        source,
                    })?;
            }
        }
        Ok(())
    }
}
