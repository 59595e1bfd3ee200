//! Shared test utilities for the FWI explorer workspace.
//!
//! - Synthetic FWI grids and coordinate axes
//! - Ready-made `GriddedDataset` fixtures
//! - A writer for small NetCDF fixture files
//! - Lookup of optional real data files, with a skip macro
//! - Float assertions for rounded FWI values
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod netcdf_fixture;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use netcdf_fixture::{write_fwi_netcdf, NcFixture};
pub use paths::*;

/// Return the path of an optional data file, or skip the test.
///
/// Real FWI files are large and not checked in. Tests that need one look it
/// up with [`find_test_file`] and return early when it is absent:
///
/// ```ignore
/// #[test]
/// fn test_real_file() {
///     let path = require_test_file!("fwi_2015-17.nc");
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: '{}' not found; set TEST_DATA_DIR to run this test", $name);
                return;
            }
        }
    }};
}

/// Assert that two numbers differ by at most `epsilon` (default `1e-9`).
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        assert!(
            (left - right).abs() <= epsilon,
            "assertion failed: {} is not within {} of {}",
            left,
            epsilon,
            right
        );
    }};
}

/// Assert that a value carries at most two decimal places.
///
/// NaN passes: missing cells are not rounded.
#[macro_export]
macro_rules! assert_rounded_2dp {
    ($value:expr) => {{
        let value = $value as f64;
        if !value.is_nan() {
            let scaled = value * 100.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-3,
                "{} has more than two decimal places",
                value
            );
        }
    }};
}
