//! Configuration system for the console client
//!
//! This module provides a hierarchical configuration: one section per
//! component, each with defaults matching the stock console. A configuration
//! can be built in code, picked from a preset, or loaded from a JSON file where
//! every missing field falls back to its default.

use crate::{
    core::{constants, geo::PhysicalPoint},
    input::{easing::Easing, joystick::AxisMode},
    ConsoleError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ServerConfig,
    pub map: MapConfig,
    pub polling: PollingConfig,
    pub manual: ManualControlConfig,
    pub workflows: WorkflowTimingConfig,
}

impl ConsoleConfig {
    /// Robot server on the same machine with the stock timings.
    pub fn local() -> Self {
        Self::default()
    }

    /// Slower cadence for robots reached over a constrained radio link.
    pub fn slow_link() -> Self {
        Self {
            server: ServerConfig {
                timeout_ms: 30_000,
                ..ServerConfig::default()
            },
            polling: PollingConfig {
                pull_rate_ms: 3000,
                ..PollingConfig::default()
            },
            manual: ManualControlConfig {
                send_interval_ms: 1000,
                ..ManualControlConfig::default()
            },
            ..Self::default()
        }
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ConsoleConfig = serde_json::from_str(text)
            .map_err(|e| ConsoleError::Configuration(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(config_error("server.base_url must not be empty"));
        }
        if !(self.map.world_size.is_finite() && self.map.world_size > 0.0) {
            return Err(config_error("map.world_size must be positive"));
        }
        if self.map.min_zoom > self.map.max_zoom {
            return Err(config_error("map.min_zoom must not exceed map.max_zoom"));
        }
        if self.polling.pull_rate_ms == 0 {
            return Err(config_error("polling.pull_rate_ms must be positive"));
        }
        let distance = self.polling.map_update_distance;
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(config_error("polling.map_update_distance must not be negative"));
        }
        if self.manual.send_interval_ms == 0 {
            return Err(config_error("manual.send_interval_ms must be positive"));
        }
        if !self.manual.turn_alpha.is_finite() {
            return Err(config_error("manual.turn_alpha must be finite"));
        }
        self.manual.joystick.validate()
    }
}

fn config_error(msg: &str) -> ConsoleError {
    ConsoleError::Configuration(msg.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme, host and port of the robot-control server
    pub base_url: String,
    /// Path prefix of the JSON API
    pub api_prefix: String,
    pub timeout_ms: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Side length of the square SLAM world in meters
    pub world_size: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub initial_zoom: u8,
    /// Added to every robot coordinate before it is drawn
    pub offset: PhysicalPoint,
    /// Tile images kept in memory between refreshes
    pub tile_cache_capacity: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            world_size: 100.0,
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            initial_zoom: constants::DEFAULT_ZOOM,
            offset: PhysicalPoint::default(),
            tile_cache_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub pull_rate_ms: u64,
    /// Meters travelled before the map tiles are reloaded
    pub map_update_distance: f64,
}

impl PollingConfig {
    pub fn pull_rate(&self) -> Duration {
        Duration::from_millis(self.pull_rate_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            pull_rate_ms: constants::DEFAULT_PULL_RATE_MS,
            map_update_distance: constants::DEFAULT_MAP_UPDATE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualControlConfig {
    pub send_interval_ms: u64,
    pub turn_alpha: f64,
    pub joystick: JoystickConfig,
}

impl ManualControlConfig {
    pub fn send_interval(&self) -> Duration {
        Duration::from_millis(self.send_interval_ms)
    }
}

impl Default for ManualControlConfig {
    fn default() -> Self {
        Self {
            send_interval_ms: constants::DEFAULT_SEND_INTERVAL_MS,
            turn_alpha: constants::DEFAULT_TURN_ALPHA,
            joystick: JoystickConfig {
                max_value: 10.0,
                ..JoystickConfig::default()
            },
        }
    }
}

/// Settings of the drag surface. The easing is kept by name so that a typo in
/// a config file is reported as a configuration error rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    pub width: f64,
    pub height: f64,
    pub axis: AxisMode,
    pub easing: String,
    /// Scale applied after easing; 1.0 keeps the signal in [-1, 1]
    pub max_value: f64,
    pub invert: bool,
    pub reset_on_direction_change: bool,
}

impl JoystickConfig {
    pub fn easing(&self) -> Result<Easing> {
        self.easing.parse()
    }

    pub fn validate(&self) -> Result<()> {
        self.easing()?;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ConsoleError::Configuration(format!(
                "joystick area must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.max_value.is_finite() {
            return Err(config_error("joystick.max_value must be finite"));
        }
        Ok(())
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            width: constants::DEFAULT_JOYSTICK_SIZE,
            height: constants::DEFAULT_JOYSTICK_SIZE,
            axis: AxisMode::Both,
            easing: "easeInCirc".to_string(),
            max_value: 1.0,
            invert: false,
            reset_on_direction_change: false,
        }
    }
}

/// Expected durations used to animate progress while the server works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowTimingConfig {
    pub new_map_ms: u64,
    pub stored_map_ms: u64,
    pub save_map_ms: u64,
    pub details_ms: u64,
    pub path_planning_ms: u64,
    pub progress_tick_ms: u64,
    /// Pause at 100 % before the progress view closes
    pub finish_delay_ms: u64,
}

impl Default for WorkflowTimingConfig {
    fn default() -> Self {
        Self {
            new_map_ms: 5_000,
            stored_map_ms: 100_000,
            save_map_ms: 30_000,
            details_ms: 1_000,
            path_planning_ms: 5_000,
            progress_tick_ms: 100,
            finish_delay_ms: 1_000,
        }
    }
}
