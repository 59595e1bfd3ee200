//! Common types and utilities shared across the FWI explorer crates.

pub mod bbox;
pub mod dataset;
pub mod error;
pub mod time;

pub use bbox::BoundingBox;
pub use dataset::{DatasetError, DatasetInfo, GriddedDataset};
pub use error::{FwiError, FwiResult};
pub use time::{display_time, CfTimeUnits, DateQuery, TimeParseError, TimeResolution};
