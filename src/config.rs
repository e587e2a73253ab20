//! src/config.rs
//!
//! Application configuration, read from YAML.
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration:
//! ```yaml
//! sensor:
//!   kind: gyroscope        # accelerometer | gyroscope | magnetic_field
//!   rate: game             # fastest | game | ui | normal
//!   source: serial         # simulated | serial
//!   serial:
//!     port: /dev/ttyACM0
//!     baud_rate: 115200
//!     kinds: [accelerometer, gyroscope]
//! chart:
//!   column_width: 5
//!   max_y: 30.0
//! smoothing:
//!   alpha: 0.75
//! refresh_period_ms: 20
//! log_file: sensorviz.log
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::chart::ChartConfig;
use crate::sensor::{SamplingRate, SensorKind, SerialConfig, SimulatedConfig};
use crate::session::SessionConfig;
use crate::smoother::SmoothingConfig;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sensorviz.yaml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Simulated,
    Serial,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub kind: SensorKind,
    pub rate: SamplingRate,
    pub source: SourceKind,
    pub simulated: SimulatedConfig,
    pub serial: SerialConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sensor: SensorConfig,
    pub chart: ChartConfig,
    pub smoothing: SmoothingConfig,
    pub refresh_period_ms: u64,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            chart: ChartConfig::default(),
            smoothing: SmoothingConfig::default(),
            refresh_period_ms: 20,
            log_file: PathBuf::from("sensorviz.log"),
        }
    }
}

impl AppConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            kind: self.sensor.kind,
            rate: self.sensor.rate,
        }
    }
}

pub fn parse_config(text: &str) -> Result<AppConfig> {
    if text.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(text).wrap_err("Failed to parse config file")
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&text).wrap_err_with(|| format!("in {}", path.display()))
}

/// Config from the explicit `path`, else `DEFAULT_CONFIG_FILE` if present,
/// else defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => load_config(p),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => Ok(AppConfig::default()),
    }
}
