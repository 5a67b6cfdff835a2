use clap::Parser;
use log::{error, info};
use ndawn_gdd::{convert_to_gif, GddError, GddPipeline, MapLayer, PipelineConfig};
use std::path::PathBuf;

/// Averages NDAWN corn growing degree days per county.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path of the TOML run configuration
    #[arg(long, env = "GDD_CONFIG", default_value = "gdd.toml")]
    config: PathBuf,

    /// Stitch the rendered daily maps into animated GIFs with ImageMagick
    #[arg(long)]
    gif: bool,
}

#[tokio::main]
async fn main() -> Result<(), GddError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("Loading config from {}", cli.config.display());
    let config = PipelineConfig::from_toml_file(&cli.config)?;

    let pipeline = GddPipeline::new(config)?;
    let report = pipeline.run().await?;

    info!(
        "Retrieved {} of {} stations, {} failed",
        report.summary.succeeded_count(),
        report.summary.requested,
        report.summary.failed_count()
    );
    for failure in &report.summary.failures {
        info!("  #{} {}: {}", failure.station_id, failure.kind, failure.message);
    }
    info!("Mapping: {}", report.mapping_path.display());
    info!("Station data: {}", report.raw_export_path.display());
    info!("County data: {}", report.final_export_path.display());

    if cli.gif {
        let config = pipeline.config();
        for layer in MapLayer::ALL {
            match convert_to_gif(layer, &config.maps_dir, &config.target_state).await {
                Ok(path) => info!("Saved {}", path.display()),
                Err(e) => error!("Could not animate {} maps: {}", layer, e),
            }
        }
    }

    Ok(())
}
