//! Time-slice selection.
//!
//! A query instant is truncated to the dataset's time resolution and matched
//! against the time coordinate truncated the same way. The selected 2-D grid
//! is rounded to two decimal places.

use chrono::{DateTime, Utc};
use fwi_common::{display_time, DateQuery, GriddedDataset};
use tracing::debug;

use crate::error::{Result, SelectError};

/// Decimal places kept in a selected slice.
pub const ROUND_DECIMALS: i32 = 2;

/// Round to two decimal places, ties to even on the hundredths.
///
/// Scaling happens in single precision: `2.675_f32 * 100.0` is exactly
/// `267.5` and rounds to `2.68`, although the stored value is just below
/// `2.675`. NaN and infinities pass through unchanged.
pub fn round_2dp(value: f32) -> f32 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f32.powi(ROUND_DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// [`round_2dp`] for values accumulated in double precision.
pub fn round_2dp_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(ROUND_DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// One time step of a gridded dataset.
///
/// Values are latitude-major (`nlat x nlon`) and already rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlice<'a> {
    time: DateTime<Utc>,
    lats: &'a [f64],
    lons: &'a [f64],
    values: Vec<f32>,
}

impl<'a> TimeSlice<'a> {
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// The selected time formatted for display.
    pub fn label(&self) -> String {
        display_time(&self.time)
    }

    pub fn lats(&self) -> &'a [f64] {
        self.lats
    }

    pub fn lons(&self) -> &'a [f64] {
        self.lons
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// `(nlat, nlon)`
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }

    /// Value at `(lat_index, lon_index)`.
    pub fn get(&self, lat_index: usize, lon_index: usize) -> Option<f32> {
        if lon_index >= self.lons.len() {
            return None;
        }
        self.values.get(lat_index * self.lons.len() + lon_index).copied()
    }

    /// Number of non-missing cells.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Select the slice whose time equals the normalized query.
pub fn select_slice<'a>(dataset: &'a GriddedDataset, query: &DateQuery) -> Result<TimeSlice<'a>> {
    let target = query.normalized(dataset.time_resolution());
    let index = dataset.time_index(&target).ok_or_else(|| {
        debug!(requested = %query.instant(), normalized = %target, "Date not in time coordinate");
        SelectError::date_not_available(display_time(&target))
    })?;
    slice_at(dataset, index)
}

/// Select the slice at a time index.
pub fn slice_at(dataset: &GriddedDataset, index: usize) -> Result<TimeSlice<'_>> {
    let len = dataset.times().len();
    let raw = dataset
        .values_at(index)
        .ok_or(SelectError::IndexOutOfRange { index, len })?;

    Ok(TimeSlice {
        time: dataset.times()[index],
        lats: dataset.lats(),
        lons: dataset.lons(),
        values: raw.iter().copied().map(round_2dp).collect(),
    })
}
