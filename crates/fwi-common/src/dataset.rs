//! In-memory gridded dataset indexed by (time, latitude, longitude).

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::time::{display_time, TimeResolution};

/// Structural problems detected when assembling a dataset.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("coordinate '{0}' is empty")]
    EmptyAxis(&'static str),

    #[error("time coordinate is not strictly increasing at index {index}")]
    UnsortedTime { index: usize },

    #[error("value buffer has {actual} cells, expected {expected} (time x lat x lon)")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// A three-dimensional labeled array holding one FWI variable.
///
/// Values are stored densely in `time`, `lat`, `lon` order (longitude
/// fastest). Missing cells are NaN. The dataset is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedDataset {
    variable: String,
    units: Option<String>,
    times: Vec<DateTime<Utc>>,
    time_resolution: TimeResolution,
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f32>,
}

impl GriddedDataset {
    /// Assemble a dataset, checking that time is unique and sorted and that
    /// the value buffer matches the coordinate lengths.
    pub fn new(
        variable: impl Into<String>,
        units: Option<String>,
        times: Vec<DateTime<Utc>>,
        time_resolution: TimeResolution,
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Vec<f32>,
    ) -> Result<Self, DatasetError> {
        if times.is_empty() {
            return Err(DatasetError::EmptyAxis("time"));
        }
        if lats.is_empty() {
            return Err(DatasetError::EmptyAxis("lat"));
        }
        if lons.is_empty() {
            return Err(DatasetError::EmptyAxis("lon"));
        }
        if let Some(index) = times.windows(2).position(|w| w[0] >= w[1]) {
            return Err(DatasetError::UnsortedTime { index: index + 1 });
        }

        let expected = times.len() * lats.len() * lons.len();
        if values.len() != expected {
            return Err(DatasetError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            variable: variable.into(),
            units,
            times,
            time_resolution,
            lats,
            lons,
            values,
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn time_resolution(&self) -> TimeResolution {
        self.time_resolution
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// `(nlat, nlon)`
    pub fn spatial_shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }

    /// Index of the first time step that falls in the same resolution slot
    /// as `time`.
    ///
    /// Coordinates are truncated to the dataset's resolution before
    /// comparing, so daily steps stamped at 12:00 match a midnight query.
    pub fn time_index(&self, time: &DateTime<Utc>) -> Option<usize> {
        let resolution = self.time_resolution;
        let slot = resolution.truncate(*time);
        let index = self
            .times
            .partition_point(|t| resolution.truncate(*t) < slot);
        self.times
            .get(index)
            .filter(|t| resolution.truncate(**t) == slot)
            .map(|_| index)
    }

    /// Raw (unrounded) values of one time step, latitude-major.
    pub fn values_at(&self, time_index: usize) -> Option<&[f32]> {
        if time_index >= self.times.len() {
            return None;
        }
        let cells = self.lats.len() * self.lons.len();
        let start = time_index * cells;
        self.values.get(start..start + cells)
    }

    /// Serializable description of the dataset.
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            variable: self.variable.clone(),
            units: self.units.clone(),
            time_resolution: self.time_resolution,
            nlat: self.lats.len(),
            nlon: self.lons.len(),
            dates: self.times.iter().map(display_time).collect(),
        }
    }
}

/// Dataset metadata exposed to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub variable: String,
    pub units: Option<String>,
    pub time_resolution: TimeResolution,
    pub nlat: usize,
    pub nlon: usize,
    pub dates: Vec<String>,
}
