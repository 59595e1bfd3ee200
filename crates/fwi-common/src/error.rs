//! Error types for the FWI explorer.

use thiserror::Error;

/// Result type alias using FwiError.
pub type FwiResult<T> = Result<T, FwiError>;

/// Primary error type for dashboard operations.
#[derive(Debug, Error)]
pub enum FwiError {
    // === Request Errors ===
    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    // === Data Errors ===
    #[error("The selected date is not available in the dataset: {0}")]
    DataNotAvailable(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),

    #[error("Invalid NetCDF data: {0}")]
    NetCdfError(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl FwiError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            FwiError::InvalidTime(_) => 400,

            FwiError::DataNotAvailable(_) => 404,

            FwiError::ServiceUnavailable(_) => 503,

            _ => 500,
        }
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            FwiError::InvalidTime(_) => "InvalidTime",
            FwiError::DataNotAvailable(_) => "DateNotAvailable",
            FwiError::DataReadError(_) | FwiError::NetCdfError(_) => "DataError",
            FwiError::RenderError(_) => "RenderError",
            FwiError::ServiceUnavailable(_) => "ServiceUnavailable",
            FwiError::InternalError(_) => "InternalError",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for FwiError {
    fn from(err: std::io::Error) -> Self {
        FwiError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for FwiError {
    fn from(err: serde_json::Error) -> Self {
        FwiError::InternalError(format!("JSON error: {}", err))
    }
}

impl From<crate::time::TimeParseError> for FwiError {
    fn from(err: crate::time::TimeParseError) -> Self {
        FwiError::InvalidTime(err.to_string())
    }
}

impl From<crate::dataset::DatasetError> for FwiError {
    fn from(err: crate::dataset::DatasetError) -> Self {
        FwiError::NetCdfError(err.to_string())
    }
}
