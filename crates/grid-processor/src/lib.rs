//! Time-slice selection and summaries for gridded FWI data.
//!
//! This crate turns a [`GriddedDataset`] into what the dashboard shows for
//! one date:
//!
//! ```text
//! DateQuery ──► select_slice ──► TimeSlice (rounded, nlat x nlon)
//!                                     │
//!                                     ▼
//!                                  flatten ──► Vec<FwiRecord>
//!                                                  │
//!                                   ┌──────────────┴──────────────┐
//!                                   ▼                             ▼
//!                             SummaryStats                    Histogram
//! ```
//!
//! The dataset itself is loaded once through a [`DatasetHandle`].
//!
//! [`GriddedDataset`]: fwi_common::GriddedDataset

pub mod error;
pub mod flatten;
pub mod handle;
pub mod histogram;
pub mod select;
pub mod stats;

// Re-export commonly used types at crate root
pub use error::{Result, SelectError};
pub use flatten::{flatten, fwi_values, FwiRecord};
pub use handle::DatasetHandle;
pub use histogram::{Histogram, HISTOGRAM_BINS};
pub use select::{round_2dp, round_2dp_f64, select_slice, slice_at, TimeSlice, ROUND_DECIMALS};
pub use stats::{ColorDomain, SummaryStats};
