//! Common test fixtures for FWI explorer tests.

use chrono::{DateTime, TimeZone, Utc};
use fwi_common::{GriddedDataset, TimeResolution};

use crate::generators::{create_axis, create_fwi_grid};

/// Common time values for testing.
pub mod time {
    /// First day of the sample dataset.
    pub const FIRST_DAY: &str = "2016-07-01";

    /// A day inside the sample dataset.
    pub const SECOND_DAY: &str = "2016-07-02";

    /// A day outside the sample dataset.
    pub const MISSING_DAY: &str = "2014-12-31";
}

/// Midnight UTC of 2016-07-`day`.
pub fn july_2016(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 7, day, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

/// The four-cell example grid: `[[1.0, 2.0], [3.0, NaN]]` on a single day.
pub fn four_cell_dataset() -> GriddedDataset {
    GriddedDataset::new(
        "GEOS-5_FWI",
        None,
        vec![july_2016(1)],
        TimeResolution::Days,
        vec![49.0, 50.0],
        vec![-120.0, -119.0],
        vec![1.0, 2.0, 3.0, f32::NAN],
    )
    .expect("valid fixture dataset")
}

/// A three-day 6 x 8 dataset (lat x lon) over western Canada.
///
/// Day 2 has a NaN in the first cell, day 3 is entirely missing.
pub fn sample_dataset() -> GriddedDataset {
    let nlat = 6;
    let nlon = 8;
    let mut values = Vec::with_capacity(3 * nlat * nlon);

    values.extend(create_fwi_grid(nlon, nlat, 40.0));

    let mut day2 = create_fwi_grid(nlon, nlat, 60.0);
    day2[0] = f32::NAN;
    values.extend(day2);

    values.extend(std::iter::repeat(f32::NAN).take(nlat * nlon));

    GriddedDataset::new(
        "GEOS-5_FWI",
        Some("1".to_string()),
        vec![july_2016(1), july_2016(2), july_2016(3)],
        TimeResolution::Days,
        create_axis(49.0, 0.5, nlat),
        create_axis(-125.0, 0.625, nlon),
        values,
    )
    .expect("valid fixture dataset")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dataset_shape() {
        let ds = sample_dataset();
        assert_eq!(ds.spatial_shape(), (6, 8));
        assert_eq!(ds.times().len(), 3);
    }

    #[test]
    fn test_four_cell_dataset() {
        let ds = four_cell_dataset();
        let values = ds.values_at(0).unwrap();
        assert_eq!(values.iter().filter(|v| v.is_nan()).count(), 1);
    }
}
