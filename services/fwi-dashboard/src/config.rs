//! Dashboard configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags and their environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use netcdf_parser::{DatasetSpec, DEFAULT_FWI_VARIABLE};
use renderer::{ChartStyle, MapStyle};
use serde::{Deserialize, Serialize};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "fwi-dashboard")]
#[command(about = "Fire Weather Index (FWI) explorer web dashboard")]
pub struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "FWI_LISTEN_ADDR")]
    pub listen: String,

    /// NetCDF dataset path
    #[arg(long, env = "FWI_DATASET_PATH")]
    pub dataset: Option<PathBuf>,

    /// FWI variable name; "auto" picks the first (time, lat, lon) variable
    #[arg(long, env = "FWI_VARIABLE")]
    pub variable: Option<String>,

    /// GeoJSON boundary overlay URL
    #[arg(long, env = "FWI_BOUNDARY_URL")]
    pub boundary_url: Option<String>,

    /// YAML configuration file
    #[arg(short, long, env = "FWI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of worker threads
    #[arg(long, env = "FWI_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

/// Full dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset: DatasetSection,
    pub boundaries: BoundarySection,
    pub map: MapSection,
    pub histogram: HistogramSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    pub path: PathBuf,
    /// `None` auto-detects the grid variable.
    pub variable: Option<String>,
    pub time_dim: String,
    pub lat_dim: String,
    pub lon_dim: String,
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fwi_2015-17.nc"),
            variable: Some(DEFAULT_FWI_VARIABLE.to_string()),
            time_dim: "time".to_string(),
            lat_dim: "lat".to_string(),
            lon_dim: "lon".to_string(),
        }
    }
}

impl DatasetSection {
    pub fn spec(&self) -> DatasetSpec {
        DatasetSpec {
            variable: self.variable.clone(),
            time_dim: self.time_dim.clone(),
            lat_dim: self.lat_dim.clone(),
            lon_dim: self.lon_dim.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundarySection {
    /// No URL means no overlay.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BoundarySection {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

impl BoundarySection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSection {
    pub width: u32,
    pub height: u32,
    pub marker_radius: f32,
    /// Degrees added around the plotted points.
    pub margin_deg: f64,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            marker_radius: 4.0,
            margin_deg: 1.0,
        }
    }
}

impl MapSection {
    pub fn style(&self) -> MapStyle {
        MapStyle {
            width: self.width,
            height: self.height,
            marker_radius: self.marker_radius,
            ..MapStyle::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramSection {
    pub width: u32,
    pub height: u32,
}

impl Default for HistogramSection {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

impl HistogramSection {
    pub fn style(&self) -> ChartStyle {
        ChartStyle {
            width: self.width,
            height: self.height,
            ..ChartStyle::default()
        }
    }
}

impl DashboardConfig {
    /// Parse a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Defaults, then the YAML file named by `args`, then `args` itself.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        Ok(config)
    }

    /// Override with values given on the command line or environment.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.dataset {
            self.dataset.path = path.clone();
        }
        if let Some(variable) = &args.variable {
            self.dataset.variable = if variable.eq_ignore_ascii_case("auto") {
                None
            } else {
                Some(variable.clone())
            };
        }
        if let Some(url) = &args.boundary_url {
            self.boundaries.url = Some(url.clone()).filter(|u| !u.trim().is_empty());
        }
    }
}
