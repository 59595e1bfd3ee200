//! Loading through `DatasetHandle` from a real NetCDF file.

use std::sync::Arc;

use fwi_common::DateQuery;
use grid_processor::{flatten, select_slice, DatasetHandle, SummaryStats};
use netcdf_parser::DatasetSpec;
use test_utils::{temp_test_dir_with_prefix, write_fwi_netcdf, NcFixture};

#[test]
fn test_handle_loads_once() {
    let dir = temp_test_dir_with_prefix("fwi_handle_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_days()).unwrap();

    let handle = DatasetHandle::new(&path, DatasetSpec::default());
    assert!(!handle.is_loaded());

    let first = handle.get().unwrap();
    // The file is gone; a second read would fail.
    std::fs::remove_file(&path).unwrap();
    let second = handle.get().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn test_file_to_summary() {
    let dir = temp_test_dir_with_prefix("fwi_handle_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_days()).unwrap();

    let handle = DatasetHandle::new(&path, DatasetSpec::default());
    let dataset = handle.get().unwrap();

    let slice = select_slice(&dataset, &DateQuery::parse("2016-07-02").unwrap()).unwrap();
    let records = flatten(&slice);
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].fwi_value, 10.13);

    let stats = SummaryStats::from_records(&records).unwrap();
    assert_eq!(stats.max, 60.0);
    assert_eq!(stats.min, 10.13);
}

#[test]
fn test_noon_stamped_file_selects_by_calendar_date() {
    let dir = temp_test_dir_with_prefix("fwi_handle_");
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_noon_days()).unwrap();

    let dataset = DatasetHandle::new(&path, DatasetSpec::default()).get().unwrap();

    let slice = select_slice(&dataset, &DateQuery::parse("2016-07-01").unwrap()).unwrap();
    assert_eq!(slice.label(), "2016-07-01T12:00:00Z");
    assert_eq!(flatten(&slice).len(), 5);

    let second = select_slice(&dataset, &DateQuery::parse("2016-07-02").unwrap()).unwrap();
    assert_eq!(second.time(), dataset.times()[1]);

    assert!(select_slice(&dataset, &DateQuery::parse("2016-07-03").unwrap()).is_err());
}
