use crate::aggregate::error::AggregateError;
use crate::config::error::ConfigError;
use crate::counties::error::CountyError;
use crate::render::MapLayer;
use crate::station_data::error::StationDataError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum GddError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    County(#[from] CountyError),

    #[error(transparent)]
    StationData(#[from] StationDataError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Failed to create directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Path exists but is not a directory: '{0}'")]
    NotADirectory(PathBuf),

    #[error("Failed to write '{0}'")]
    ExportIo(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize CSV to '{0}'")]
    ExportPolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] JoinError),

    #[error("Renderer failed on {layer} for {date}")]
    Render {
        layer: MapLayer,
        date: NaiveDate,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to start ImageMagick 'convert'")]
    AnimationSpawn(#[source] std::io::Error),

    #[error("ImageMagick exited with {status} while writing '{output}'")]
    AnimationFailed { output: PathBuf, status: ExitStatus },

    #[error("Failed to list map frames in '{0}'")]
    FrameListing(PathBuf, #[source] std::io::Error),

    #[error("No PNG frames found in '{0}'")]
    NoFramesToAnimate(PathBuf),
}
