//! Reconciliation of weather stations with administrative counties.

pub mod error;
pub mod normalize;
pub mod resolver;
