//! Downloading and parsing of per-station NDAWN corn GDD reports.

pub mod error;
pub(crate) mod extractor;
pub mod fetcher;
pub(crate) mod loader;
