//! Error types for grid processing.

use fwi_common::FwiError;
use thiserror::Error;

/// Errors that can occur while selecting a time slice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    /// No time coordinate equals the normalized query.
    #[error("The selected date is not available in the dataset: {date}")]
    DateNotAvailable { date: String },

    /// A time index past the end of the dataset.
    #[error("time index {index} is outside the dataset ({len} steps)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SelectError {
    /// Create a DateNotAvailable error.
    pub fn date_not_available(date: impl Into<String>) -> Self {
        Self::DateNotAvailable { date: date.into() }
    }

    /// True when the caller should show the "not available" message rather
    /// than fail.
    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::DateNotAvailable { .. })
    }
}

impl From<SelectError> for FwiError {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::DateNotAvailable { date } => FwiError::DataNotAvailable(date),
            other => FwiError::InternalError(other.to_string()),
        }
    }
}

/// Result type for slice selection.
pub type Result<T> = std::result::Result<T, SelectError>;
