//! Contract between the pipeline and a choropleth map renderer.
//!
//! The pipeline does not draw. It hands each day's county table to a [`ChoroplethRenderer`]
//! once per [`MapLayer`].

use crate::schema::{MEAN_ACCUMULATED_GDD, MEAN_DELTA_GDD};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// The two maps produced per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLayer {
    AccumulatedGdd,
    DeltaFromAverage,
}

impl MapLayer {
    pub const ALL: [MapLayer; 2] = [MapLayer::AccumulatedGdd, MapLayer::DeltaFromAverage];

    /// Column of the aggregate table this layer colours by.
    pub fn value_column(&self) -> &'static str {
        match self {
            MapLayer::AccumulatedGdd => MEAN_ACCUMULATED_GDD,
            MapLayer::DeltaFromAverage => MEAN_DELTA_GDD,
        }
    }

    /// Colour scale bounds in °F.
    pub fn scale(&self) -> (f64, f64) {
        match self {
            MapLayer::AccumulatedGdd => (100.0, 2800.0),
            MapLayer::DeltaFromAverage => (-500.0, 500.0),
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            MapLayer::AccumulatedGdd => "AGDD",
            MapLayer::DeltaFromAverage => "Delta",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            MapLayer::AccumulatedGdd => "gdds",
            MapLayer::DeltaFromAverage => "delta5yr",
        }
    }

    pub fn animation_stem(&self) -> &'static str {
        match self {
            MapLayer::AccumulatedGdd => "gdds",
            MapLayer::DeltaFromAverage => "delta_gdds",
        }
    }

    pub fn output_dir(&self, maps_dir: &Path) -> PathBuf {
        maps_dir.join(self.dir_name())
    }

    /// `<maps_dir>/<dir>/<stem>-YYYY-MM-DD.png`, so lexical order is date order.
    pub fn frame_path(&self, maps_dir: &Path, date: NaiveDate) -> PathBuf {
        self.output_dir(maps_dir)
            .join(format!("{}-{}.png", self.file_stem(), date.format("%Y-%m-%d")))
    }

    /// `<maps_dir>/<dir>/<animation stem>_<STATE>.gif`
    pub fn animation_path(&self, maps_dir: &Path, state: &str) -> PathBuf {
        self.output_dir(maps_dir)
            .join(format!("{}_{}.gif", self.animation_stem(), state))
    }
}

impl Display for MapLayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MapLayer::AccumulatedGdd => write!(f, "accumulated GDD"),
            MapLayer::DeltaFromAverage => write!(f, "delta from 5 year average"),
        }
    }
}

/// Draws one map for one day.
///
/// `frame` holds that day's rows of the aggregate table (`date`, `county`,
/// `mean_accumulated_gdd`, `mean_delta_gdd`). Null values mean "no data" and must not be
/// drawn as zero. The layer's output directory exists when this is called.
pub trait ChoroplethRenderer: Send {
    fn render(
        &mut self,
        layer: MapLayer,
        date: NaiveDate,
        frame: &DataFrame,
    ) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_paths() {
        let maps = Path::new("maps");
        let date = NaiveDate::from_ymd_opt(2017, 5, 15).unwrap();

        assert_eq!(
            MapLayer::AccumulatedGdd.frame_path(maps, date),
            PathBuf::from("maps/AGDD/gdds-2017-05-15.png")
        );
        assert_eq!(
            MapLayer::DeltaFromAverage.frame_path(maps, date),
            PathBuf::from("maps/Delta/delta5yr-2017-05-15.png")
        );
        assert_eq!(
            MapLayer::DeltaFromAverage.animation_path(maps, "ND"),
            PathBuf::from("maps/Delta/delta_gdds_ND.gif")
        );
    }

    #[test]
    fn test_scales() {
        assert_eq!(MapLayer::AccumulatedGdd.scale(), (100.0, 2800.0));
        assert_eq!(MapLayer::DeltaFromAverage.scale(), (-500.0, 500.0));
        assert_eq!(MapLayer::DeltaFromAverage.value_column(), MEAN_DELTA_GDD);
    }
}
