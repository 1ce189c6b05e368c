//! Game settings and tuning
//!
//! Loaded once by the host before a session starts. Validation happens here so
//! the simulation itself never has to fail.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be a positive number of pixels, got {0}")]
    InvalidCellSize(f32),
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("timer `{name}` must have a positive interval, got {value}")]
    InvalidInterval { name: &'static str, value: f32 },
    #[error("boost multiplier must be in (0, 1], got {0}")]
    InvalidBoostMultiplier(f32),
    #[error("boost duration must not be negative, got {0}")]
    InvalidBoostDuration(f32),
    #[error("enemy milestone must be at least 1")]
    InvalidMilestone,
    #[error("respawn attempts must be at least 1")]
    InvalidRetryLimit,
    #[error("fade `{name}` must be a non-negative duration, got {value}")]
    InvalidFade { name: &'static str, value: f32 },
    #[error("alpha floor must be in [0, 1], got {0}")]
    InvalidAlphaFloor(f32),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
    /// Edge length of one grid cell in pixels
    pub cell_size_px: f32,

    // === Timers ===
    pub snake_tick_secs: f32,
    pub enemy_tick_secs: f32,
    pub enemy_respawn_secs: f32,
    pub food_respawn_secs: f32,

    // === Speed boost ===
    /// Applied to the snake tick interval while boosted
    pub boost_multiplier: f32,
    pub boost_duration_secs: f32,

    // === Enemies ===
    /// Enemies spawned together with the snake
    pub initial_enemies: u32,
    /// A new enemy joins whenever the score reaches a multiple of this
    pub enemy_milestone: u32,
    /// Minimum respawn distance from the snake head, in grid units
    pub safe_distance: f32,
    /// Candidate cells sampled before a respawn falls back
    pub respawn_attempts: u32,

    // === Fading ===
    pub enemy_visible_secs: f32,
    pub enemy_fade_secs: f32,
    pub food_visible_secs: f32,
    pub food_fade_secs: f32,
    pub alpha_floor: f32,

    /// Fixed seed; a fresh one is drawn by the host when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            cell_size_px: CELL_SIZE_PX,

            snake_tick_secs: SNAKE_TICK_SECS,
            enemy_tick_secs: ENEMY_TICK_SECS,
            enemy_respawn_secs: ENEMY_RESPAWN_SECS,
            food_respawn_secs: FOOD_RESPAWN_SECS,

            boost_multiplier: BOOST_MULTIPLIER,
            boost_duration_secs: BOOST_DURATION_SECS,

            initial_enemies: 0,
            enemy_milestone: ENEMY_MILESTONE,
            safe_distance: SAFE_DISTANCE,
            respawn_attempts: RESPAWN_ATTEMPTS,

            enemy_visible_secs: ENEMY_VISIBLE_SECS,
            enemy_fade_secs: ENEMY_FADE_SECS,
            food_visible_secs: FOOD_VISIBLE_SECS,
            food_fade_secs: FOOD_FADE_SECS,
            alpha_floor: ALPHA_FLOOR,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a JSON settings file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size_px.is_finite() && self.cell_size_px > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size_px));
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }

        let intervals = [
            ("snake_tick_secs", self.snake_tick_secs),
            ("enemy_tick_secs", self.enemy_tick_secs),
            ("enemy_respawn_secs", self.enemy_respawn_secs),
            ("food_respawn_secs", self.food_respawn_secs),
        ];
        for (name, value) in intervals {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }

        if !(self.boost_multiplier > 0.0 && self.boost_multiplier <= 1.0) {
            return Err(ConfigError::InvalidBoostMultiplier(self.boost_multiplier));
        }
        if !(self.boost_duration_secs >= 0.0) {
            return Err(ConfigError::InvalidBoostDuration(self.boost_duration_secs));
        }
        if self.enemy_milestone == 0 {
            return Err(ConfigError::InvalidMilestone);
        }
        if self.respawn_attempts == 0 {
            return Err(ConfigError::InvalidRetryLimit);
        }

        let fades = [
            ("enemy_visible_secs", self.enemy_visible_secs),
            ("enemy_fade_secs", self.enemy_fade_secs),
            ("food_visible_secs", self.food_visible_secs),
            ("food_fade_secs", self.food_fade_secs),
        ];
        for (name, value) in fades {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidFade { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.alpha_floor) {
            return Err(ConfigError::InvalidAlphaFloor(self.alpha_floor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "cell_size_px": 20.0, "seed": 7 }"#).unwrap();
        assert_eq!(settings.cell_size_px, 20.0);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.enemy_milestone, ENEMY_MILESTONE);
    }

    #[test]
    fn test_rejects_non_positive_cell_size() {
        let err = Settings::from_json(r#"{ "cell_size_px": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCellSize(_)));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let settings = Settings {
            enemy_tick_secs: 0.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::InvalidInterval { name, .. }) => assert_eq!(name, "enemy_tick_secs"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_boost_that_slows_down() {
        let settings = Settings {
            boost_multiplier: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidBoostMultiplier(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_seed() {
        let settings = Settings {
            seed: Some(42),
            initial_enemies: 2,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
