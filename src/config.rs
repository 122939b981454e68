//! Enemy tuning loaded from RON or JSON
//!
//! Every field has a default, so a file only needs to list what it changes.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tuning for one enemy agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Movement speed while patrolling
    pub patrol_speed: f32,
    /// Movement speed while chasing
    pub chase_speed: f32,
    /// Distance at which chasing stops and attacking starts
    pub stop_distance: f32,
    /// Distance at which a waypoint counts as reached
    pub waypoint_threshold: f32,
    /// Maximum sight distance
    pub sight_range: f32,
    /// Field of view in degrees, `None` for range-only sight
    pub fov_degrees: Option<f32>,
    /// Starting hit points
    pub health: i32,
    /// Hit points removed by one weapon contact
    pub weapon_damage: i32,
    /// Patrol loop, visited in order
    pub waypoints: Vec<Vec3>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 2.5,
            chase_speed: 4.0,
            stop_distance: 4.0,
            waypoint_threshold: 2.0,
            sight_range: 200.0,
            fov_degrees: Some(55.0),
            health: 15,
            weapon_damage: 5,
            waypoints: Vec::new(),
        }
    }
}

impl EnemyConfig {
    /// Set the patrol loop
    #[must_use]
    pub fn with_waypoints(mut self, waypoints: impl IntoIterator<Item = Vec3>) -> Self {
        self.waypoints = waypoints.into_iter().collect();
        self
    }

    /// Set sight range and field of view
    #[must_use]
    pub fn with_sight(mut self, range: f32, fov_degrees: Option<f32>) -> Self {
        self.sight_range = range;
        self.fov_degrees = fov_degrees;
        self
    }

    /// Set starting health
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Check that the values describe a usable agent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("patrol_speed", self.patrol_speed),
            ("chase_speed", self.chase_speed),
            ("stop_distance", self.stop_distance),
            ("waypoint_threshold", self.waypoint_threshold),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.sight_range > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sight_range must be positive, got {}",
                self.sight_range
            )));
        }

        if let Some(fov) = self.fov_degrees {
            if !(fov > 0.0 && fov <= 180.0) {
                return Err(ConfigError::Invalid(format!(
                    "fov_degrees must be in (0, 180], got {fov}"
                )));
            }
        }

        if self.weapon_damage < 0 {
            return Err(ConfigError::Invalid(format!(
                "weapon_damage must be non-negative, got {}",
                self.weapon_damage
            )));
        }

        Ok(())
    }

    /// Parse and validate a RON document
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid RON or fails validation
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: EnemyConfig =
            ron::from_str(content).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load the config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails or
    /// the values are invalid
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save the config to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load the config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails or
    /// the values are invalid
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: EnemyConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a path, picking the format from the extension (`.json`, else RON)
    ///
    /// # Errors
    ///
    /// See [`EnemyConfig::load_ron`] and [`EnemyConfig::load_json`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load_ron(path),
        }
    }
}

/// Errors that can occur while loading or saving a config
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
    /// Values out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
            Self::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
