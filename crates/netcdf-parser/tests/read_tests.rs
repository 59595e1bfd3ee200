//! Integration tests reading NetCDF files written on the fly.

use chrono::{TimeZone, Utc};
use fwi_common::TimeResolution;
use netcdf_parser::{read_fwi_dataset, DatasetSpec, NetCdfError};
use test_utils::{temp_test_dir_with_prefix, write_fwi_netcdf, NcFixture};

#[test]
fn test_reads_grid_and_masks_fill_values() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_days()).unwrap();

    let ds = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap();

    assert_eq!(ds.variable(), "GEOS-5_FWI");
    assert_eq!(ds.spatial_shape(), (2, 3));
    assert_eq!(ds.lats(), &[49.0, 50.0]);
    assert_eq!(ds.lons(), &[-120.0, -119.0, -118.0]);

    let day1 = ds.values_at(0).unwrap();
    assert_eq!(&day1[..5], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert!(day1[5].is_nan());

    let day2 = ds.values_at(1).unwrap();
    assert!(day2[2].is_nan());
    assert_eq!(day2.iter().filter(|v| v.is_nan()).count(), 1);
}

#[test]
fn test_decodes_days_since_time_axis() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_days()).unwrap();

    let ds = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap();

    assert_eq!(ds.time_resolution(), TimeResolution::Days);
    assert_eq!(
        ds.times(),
        &[
            Utc.with_ymd_and_hms(2016, 7, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2016, 7, 2, 0, 0, 0).unwrap(),
        ]
    );
}

#[test]
fn test_auto_detects_grid_variable() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    let mut fixture = NcFixture::two_days();
    fixture.variable = "fwi".to_string();
    write_fwi_netcdf(&path, &fixture).unwrap();

    let spec = DatasetSpec {
        variable: None,
        ..DatasetSpec::default()
    };
    let ds = read_fwi_dataset(&path, &spec).unwrap();
    assert_eq!(ds.variable(), "fwi");
}

#[test]
fn test_missing_variable_is_reported() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    let mut fixture = NcFixture::two_days();
    fixture.variable = "other".to_string();
    write_fwi_netcdf(&path, &fixture).unwrap();

    let err = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap_err();
    assert!(matches!(err, NetCdfError::MissingData(_)));
    assert!(err.to_string().contains("GEOS-5_FWI"));
}

#[test]
fn test_wrong_dimension_names_are_rejected() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_days()).unwrap();

    let spec = DatasetSpec {
        lat_dim: "latitude".to_string(),
        ..DatasetSpec::default()
    };
    let err = read_fwi_dataset(&path, &spec).unwrap_err();
    assert!(matches!(err, NetCdfError::InvalidFormat(_)));
}

#[test]
fn test_hours_resolution() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    let mut fixture = NcFixture::two_days();
    fixture.time_units = "hours since 2016-07-01 00:00:00".to_string();
    fixture.times = vec![0.0, 6.0];
    write_fwi_netcdf(&path, &fixture).unwrap();

    let ds = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap();
    assert_eq!(ds.time_resolution(), TimeResolution::Hours);
    assert_eq!(ds.times()[1], Utc.with_ymd_and_hms(2016, 7, 1, 6, 0, 0).unwrap());
}

#[test]
fn test_out_of_range_time_is_invalid_format() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    let mut fixture = NcFixture::two_days();
    fixture.time_units = "seconds since 1970-01-01".to_string();
    fixture.times = vec![i64::MIN as f64 / 1000.0, 0.0];
    write_fwi_netcdf(&path, &fixture).unwrap();

    let err = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap_err();
    assert!(matches!(err, NetCdfError::InvalidFormat(_)));
}

#[test]
fn test_noon_stamped_days() {
    let dir = temp_test_dir_with_prefix("fwi_nc_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_noon_days()).unwrap();

    let ds = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap();
    assert_eq!(ds.time_resolution(), TimeResolution::Days);
    assert_eq!(ds.times()[0], Utc.with_ymd_and_hms(2016, 7, 1, 12, 0, 0).unwrap());
}

#[test]
fn test_real_dataset_when_present() {
    let path = test_utils::require_test_file!("fwi_2015-17.nc");

    let ds = read_fwi_dataset(&path, &DatasetSpec::default()).unwrap();
    assert_eq!(ds.variable(), "GEOS-5_FWI");
    assert_eq!(ds.time_resolution(), TimeResolution::Days);
    assert!(ds.times().windows(2).all(|w| w[0] < w[1]));

    let first = ds.values_at(0).unwrap();
    assert_eq!(first.len(), ds.lats().len() * ds.lons().len());
    assert!(first.iter().any(|v| !v.is_nan()));
}
