pub mod county;
pub mod county_aggregate;
pub mod date_range;
pub mod station_record;
