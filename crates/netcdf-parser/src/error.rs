//! Error types for NetCDF parsing operations.

use fwi_common::{DatasetError, FwiError};
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by the netCDF/HDF5 library
    #[error("NetCDF library error: {0}")]
    Library(#[from] netcdf::Error),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Coordinates and values do not form a valid dataset
    #[error("Invalid dataset structure: {0}")]
    Structure(#[from] DatasetError),
}

impl From<NetCdfError> for FwiError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::IoError(e) => FwiError::DataReadError(e.to_string()),
            other => FwiError::NetCdfError(other.to_string()),
        }
    }
}
