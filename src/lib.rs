mod aggregate;
mod animation;
mod config;
mod counties;
mod error;
mod export;
mod pipeline;
mod render;
pub mod schema;
mod station_data;
mod types;
mod utils;

pub use error::GddError;
pub use pipeline::*;

pub use config::error::ConfigError;
pub use config::{PipelineConfig, StationIdRange};

pub use station_data::error::{FailureKind, StationDataError};
pub use station_data::fetcher::*;
pub use station_data::loader::DEFAULT_BASE_URL;

pub use counties::error::CountyError;
pub use counties::normalize::{normalize_county, normalize_polygon_county, state_suffix_for_fips};
pub use counties::resolver::CountyResolver;

pub use aggregate::aggregator::GddAggregator;
pub use aggregate::error::AggregateError;

pub use animation::convert_to_gif;
pub use export::write_csv;
pub use render::{ChoroplethRenderer, MapLayer, RenderError};
pub use utils::ensure_dir_exists;

pub use types::county::{CountyEntry, CountyMapping};
pub use types::county_aggregate::{CountyAggregate, CountyAggregateTable, DailyFrame};
pub use types::date_range::DateRange;
pub use types::station_record::StationRecord;
