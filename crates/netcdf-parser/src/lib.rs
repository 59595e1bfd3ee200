//! NetCDF reader for gridded Fire Weather Index data.
//!
//! Opens a NetCDF-4 (or classic) file holding one FWI variable on a
//! `(time, lat, lon)` grid and decodes it into a [`GriddedDataset`].
//!
//! # Implementation Notes
//!
//! Reading goes through the `netcdf` crate, which links libnetcdf and HDF5.
//! System requirements: `libhdf5-dev libnetcdf-dev`.
//!
//! [`GriddedDataset`]: fwi_common::GriddedDataset

pub mod error;
pub mod native;

pub use error::{NetCdfError, NetCdfResult};
pub use native::{read_fwi_dataset, silence_hdf5_errors, DatasetSpec, DEFAULT_FWI_VARIABLE};
