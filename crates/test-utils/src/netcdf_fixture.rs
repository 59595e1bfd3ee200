//! Writes small CF-style NetCDF files for loader tests.

use std::path::Path;

/// Contents of a synthetic `(time, lat, lon)` NetCDF file.
#[derive(Debug, Clone)]
pub struct NcFixture {
    pub variable: String,
    pub time_units: String,
    pub times: Vec<f64>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    /// `time x lat x lon`, longitude fastest.
    pub values: Vec<f32>,
    pub fill_value: Option<f32>,
}

impl NcFixture {
    /// Two days (2016-07-01, 2016-07-02) on a 2 x 3 grid with one fill cell
    /// per day.
    pub fn two_days() -> Self {
        Self {
            variable: "GEOS-5_FWI".to_string(),
            time_units: "days since 2015-01-01".to_string(),
            times: vec![547.0, 548.0],
            lats: vec![49.0, 50.0],
            lons: vec![-120.0, -119.0, -118.0],
            values: vec![
                1.0, 2.0, 3.0, 4.0, 5.0, -9999.0, //
                10.126, 20.0, -9999.0, 40.0, 50.0, 60.0,
            ],
            fill_value: Some(-9999.0),
        }
    }

    /// [`NcFixture::two_days`] with daily steps stamped at 12:00 UTC.
    pub fn two_noon_days() -> Self {
        Self {
            time_units: "days since 2015-01-01 12:00:00".to_string(),
            ..Self::two_days()
        }
    }
}

/// Write `fixture` to `path` as a NetCDF-4 file.
pub fn write_fwi_netcdf(path: &Path, fixture: &NcFixture) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", fixture.times.len())?;
    file.add_dimension("lat", fixture.lats.len())?;
    file.add_dimension("lon", fixture.lons.len())?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", fixture.time_units.as_str())?;
        time_var.put_attribute("calendar", "standard")?;
        time_var.put_values(&fixture.times, ..)?;
    }

    {
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&fixture.lats, ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&fixture.lons, ..)?;
    }

    {
        let mut fwi_var = file.add_variable::<f32>(&fixture.variable, &["time", "lat", "lon"])?;
        if let Some(fill) = fixture.fill_value {
            fwi_var.put_attribute("_FillValue", fill)?;
        }
        fwi_var.put_attribute("long_name", "Fire Weather Index")?;
        fwi_var.put_values(&fixture.values, ..)?;
    }

    Ok(())
}
