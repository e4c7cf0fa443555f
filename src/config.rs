use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_length")]
    pub length: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct RobotConfig {
    #[serde(default = "default_turn_duration")]
    pub turn_duration: f32,
    #[serde(default = "default_move_duration")]
    pub move_duration: f32,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Simulated seconds advanced per update
    #[serde(default = "default_frame_step")]
    pub frame_step: f32,
    /// Sleep one frame step of wall-clock time per update
    #[serde(default)]
    pub realtime: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub show_event_log: bool,
}

// Default values
fn default_width() -> i32 { 5 }
fn default_length() -> i32 { 5 }
fn default_cell_size() -> f32 { 1.0 }
fn default_turn_duration() -> f32 { 1.0 }
fn default_move_duration() -> f32 { 1.0 }
fn default_frame_step() -> f32 { 1.0 / 60.0 }
fn default_level() -> String { "warn".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            length: default_length(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            turn_duration: default_turn_duration(),
            move_duration: default_move_duration(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_step: default_frame_step(),
            realtime: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_event_log: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            robot: RobotConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Read and parse a configuration file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&contents)?)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
