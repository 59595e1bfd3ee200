//! Process-wide handle to the loaded dataset.
//!
//! The dataset is read from disk at most once per handle. Every successful
//! [`DatasetHandle::get`] after the first returns the same `Arc`.
//!
//! # Example
//!
//! ```rust,ignore
//! use grid_processor::DatasetHandle;
//! use netcdf_parser::DatasetSpec;
//!
//! let handle = DatasetHandle::new("fwi_2015-17.nc", DatasetSpec::default());
//! let dataset = handle.get()?;
//! println!("{} time steps", dataset.times().len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use fwi_common::GriddedDataset;
use netcdf_parser::{read_fwi_dataset, DatasetSpec, NetCdfResult};
use once_cell::sync::OnceCell;
use tracing::info;

/// Lazily loaded, never invalidated dataset.
#[derive(Debug)]
pub struct DatasetHandle {
    path: PathBuf,
    spec: DatasetSpec,
    cell: OnceCell<Arc<GriddedDataset>>,
}

impl DatasetHandle {
    pub fn new(path: impl Into<PathBuf>, spec: DatasetSpec) -> Self {
        Self {
            path: path.into(),
            spec,
            cell: OnceCell::new(),
        }
    }

    /// A handle that is already loaded with `dataset`.
    pub fn from_dataset(dataset: GriddedDataset) -> Self {
        Self {
            path: PathBuf::new(),
            spec: DatasetSpec::default(),
            cell: OnceCell::with_value(Arc::new(dataset)),
        }
    }

    /// Load on first call, then return the cached dataset.
    ///
    /// A failed load leaves the handle empty, so the next call retries.
    pub fn get(&self) -> NetCdfResult<Arc<GriddedDataset>> {
        self.cell
            .get_or_try_init(|| {
                let start = Instant::now();
                let dataset = read_fwi_dataset(&self.path, &self.spec)?;
                info!(
                    path = %self.path.display(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Dataset loaded"
                );
                Ok(Arc::new(dataset))
            })
            .cloned()
    }

    /// The dataset if it has been loaded.
    pub fn loaded(&self) -> Option<Arc<GriddedDataset>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn spec(&self) -> &DatasetSpec {
        &self.spec
    }
}
