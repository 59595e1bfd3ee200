//! Native NetCDF reading using the netcdf library.
//!
//! Reads a gridded FWI file laid out as `variable(time, lat, lon)` with 1-D
//! coordinate variables named after their dimensions, the layout produced by
//! CF-compliant tools (xarray, CDO, NCO).
//!
//! Decoding follows CF conventions:
//! - `_FillValue` and `missing_value` cells become NaN
//! - `scale_factor` / `add_offset` are applied after masking
//! - the time coordinate is decoded from its `units` attribute

use std::path::Path;
use std::sync::Once;

use chrono::{DateTime, Utc};
use fwi_common::{CfTimeUnits, GriddedDataset};
use tracing::{debug, info, warn};

use crate::error::{NetCdfError, NetCdfResult};

/// Variable name used by the GEOS-5 FWI product.
pub const DEFAULT_FWI_VARIABLE: &str = "GEOS-5_FWI";

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist).
///
/// Call this early, before any HDF5/NetCDF operation. Safe to call more than
/// once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Which variable and dimensions to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Data variable. `None` picks the first `(time, lat, lon)` variable.
    pub variable: Option<String>,
    pub time_dim: String,
    pub lat_dim: String,
    pub lon_dim: String,
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            variable: Some(DEFAULT_FWI_VARIABLE.to_string()),
            time_dim: "time".to_string(),
            lat_dim: "lat".to_string(),
            lon_dim: "lon".to_string(),
        }
    }
}

impl DatasetSpec {
    fn expected_dims(&self) -> [&str; 3] {
        [&self.time_dim, &self.lat_dim, &self.lon_dim]
    }
}

/// Read a full gridded FWI dataset from a NetCDF file.
pub fn read_fwi_dataset<P: AsRef<Path>>(path: P, spec: &DatasetSpec) -> NetCdfResult<GriddedDataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dataset file not found: {}", path.display()),
        )));
    }

    silence_hdf5_errors();

    let file = netcdf::open(path)?;

    let var = match &spec.variable {
        Some(name) => file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("variable '{}'", name)))?,
        None => find_grid_variable(&file, spec)?,
    };
    let variable_name = var.name();

    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    if dims.iter().map(String::as_str).ne(spec.expected_dims()) {
        return Err(NetCdfError::InvalidFormat(format!(
            "variable '{}' has dimensions {:?}, expected {:?}",
            variable_name,
            dims,
            spec.expected_dims()
        )));
    }

    let (times, resolution) = read_time_coordinate(&file, &spec.time_dim)?;
    let lats = read_coordinate(&file, &spec.lat_dim)?;
    let lons = read_coordinate(&file, &spec.lon_dim)?;

    let raw: Vec<f32> = var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read '{}': {}", variable_name, e)))?;
    let values = unpack_values(&var, raw);

    let units = get_string_attr(&var, "units");

    info!(
        path = %path.display(),
        variable = %variable_name,
        ntime = times.len(),
        nlat = lats.len(),
        nlon = lons.len(),
        "Loaded gridded dataset"
    );

    Ok(GriddedDataset::new(
        variable_name,
        units,
        times,
        resolution,
        lats,
        lons,
        values,
    )?)
}

/// First variable whose dimensions are exactly `(time, lat, lon)`.
fn find_grid_variable<'f>(file: &'f netcdf::File, spec: &DatasetSpec) -> NetCdfResult<netcdf::Variable<'f>> {
    let expected = spec.expected_dims();
    file.variables()
        .find(|v| {
            let dims: Vec<String> = v.dimensions().iter().map(|d| d.name()).collect();
            dims.iter().map(String::as_str).eq(expected)
        })
        .ok_or_else(|| {
            NetCdfError::MissingData(format!("no variable with dimensions {:?}", expected))
        })
}

fn read_coordinate(file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("coordinate variable '{}'", name)))?;
    let values: Vec<f64> = var.get_values(..)?;
    Ok(values)
}

fn read_time_coordinate(
    file: &netcdf::File,
    name: &str,
) -> NetCdfResult<(Vec<DateTime<Utc>>, fwi_common::TimeResolution)> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("coordinate variable '{}'", name)))?;

    let units_attr = get_string_attr(&var, "units")
        .ok_or_else(|| NetCdfError::MissingData(format!("'units' attribute on '{}'", name)))?;
    let units = CfTimeUnits::parse(&units_attr)
        .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?;

    if let Some(calendar) = get_string_attr(&var, "calendar") {
        let calendar = calendar.to_ascii_lowercase();
        if !matches!(calendar.as_str(), "standard" | "gregorian" | "proleptic_gregorian") {
            warn!(calendar = %calendar, "Non-gregorian calendar, decoding as gregorian");
        }
    }

    let raw: Vec<f64> = var.get_values(..)?;
    let times = raw
        .iter()
        .map(|&v| {
            units.decode(v).ok_or_else(|| {
                NetCdfError::InvalidFormat(format!("time value {} out of range for '{}'", v, units_attr))
            })
        })
        .collect::<NetCdfResult<Vec<_>>>()?;

    debug!(units = %units_attr, count = times.len(), "Decoded time coordinate");
    Ok((times, units.resolution))
}

/// Mask fill values, then apply CF packing.
fn unpack_values(var: &netcdf::Variable, raw: Vec<f32>) -> Vec<f32> {
    let fill_value = get_f64_attr(var, "_FillValue");
    let missing_value = get_f64_attr(var, "missing_value");
    let scale_factor = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);
    let packed = scale_factor != 1.0 || add_offset != 0.0;

    raw.into_iter()
        .map(|val| {
            let v = val as f64;
            let is_missing = fill_value.is_some_and(|f| is_same_value(v, f))
                || missing_value.is_some_and(|m| is_same_value(v, m));
            if is_missing || !val.is_finite() {
                f32::NAN
            } else if packed {
                (v * scale_factor + add_offset) as f32
            } else {
                val
            }
        })
        .collect()
}

/// Compare a value read as f32 against an attribute that may be stored at
/// double precision.
fn is_same_value(value: f64, sentinel: f64) -> bool {
    value == sentinel || value == (sentinel as f32) as f64
}

// =============================================================================
// Attribute helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a numeric attribute as f64.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    match attr_value {
        netcdf::AttributeValue::Double(d) => Some(d),
        netcdf::AttributeValue::Float(f) => Some(f as f64),
        netcdf::AttributeValue::Int(i) => Some(i as f64),
        netcdf::AttributeValue::Short(s) => Some(s as f64),
        netcdf::AttributeValue::Longlong(l) => Some(l as f64),
        netcdf::AttributeValue::Schar(c) => Some(c as f64),
        netcdf::AttributeValue::Uchar(c) => Some(c as f64),
        netcdf::AttributeValue::Ushort(s) => Some(s as f64),
        netcdf::AttributeValue::Uint(u) => Some(u as f64),
        _ => None,
    }
}

/// Helper to get a text attribute.
fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = DatasetSpec::default();
        assert_eq!(spec.variable.as_deref(), Some("GEOS-5_FWI"));
        assert_eq!(spec.expected_dims(), ["time", "lat", "lon"]);
    }

    #[test]
    fn test_is_same_value_handles_precision() {
        let fill = -9999.9_f64;
        let read_back = (fill as f32) as f64;
        assert!(is_same_value(read_back, fill));
        assert!(!is_same_value(1.0, fill));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_fwi_dataset("/nonexistent/fwi.nc", &DatasetSpec::default()).unwrap_err();
        assert!(matches!(err, NetCdfError::IoError(_)));
    }
}
