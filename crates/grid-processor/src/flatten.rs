//! Tabular flattening of a time slice.

use serde::{Deserialize, Serialize};

use crate::select::TimeSlice;

/// One non-missing grid cell.
///
/// Serialized field names are fixed regardless of the source variable name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FwiRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub fwi_value: f32,
}

/// Convert a slice into records, latitude outer and longitude inner,
/// dropping NaN cells.
pub fn flatten(slice: &TimeSlice<'_>) -> Vec<FwiRecord> {
    let lons = slice.lons();
    let mut records = Vec::with_capacity(slice.valid_count());

    for (lat_idx, &latitude) in slice.lats().iter().enumerate() {
        let row = &slice.values()[lat_idx * lons.len()..(lat_idx + 1) * lons.len()];
        records.extend(
            lons.iter()
                .zip(row)
                .filter(|(_, v)| !v.is_nan())
                .map(|(&longitude, &fwi_value)| FwiRecord {
                    latitude,
                    longitude,
                    fwi_value,
                }),
        );
    }

    records
}

/// The value column of a record set.
pub fn fwi_values(records: &[FwiRecord]) -> impl Iterator<Item = f32> + '_ {
    records.iter().map(|r| r.fwi_value)
}
