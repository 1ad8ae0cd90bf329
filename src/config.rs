//! Session configuration
//!
//! Loaded once per session (JSON, every field optional) and read-only to the
//! simulation afterwards. Scroll speed and spawn interval here are the
//! *initial* values; the live ones are ratcheted in [`crate::sim::Difficulty`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub window_width: f32,
    pub window_height: f32,
    /// Height of the ground strip at the bottom of the playfield
    pub ground_height: f32,

    // === Pace ===
    pub initial_scroll_speed: f32,
    pub initial_spawn_interval: f32,
    /// Upper bound on a single frame's delta-time
    pub max_frame_dt: f32,

    // === Bird ===
    /// Vertical acceleration (negative pulls down)
    pub gravity: f32,
    /// Upward velocity set by a flap
    pub flap_impulse: f32,
    pub bird_width: f32,
    pub bird_height: f32,

    // === Pipes ===
    pub pipe_gap_min: f32,
    pub pipe_gap_max: f32,
    pub pipe_width: f32,
    /// Sprite height, used by renderers for texture tiling
    pub pipe_height: f32,
    pub pipe_min_stub: f32,
    pub pipe_spawn_offset: f32,

    // === Lives & difficulty ===
    pub max_lives: u32,
    pub speed_increase_frequency: u32,
    pub speed_increase_multiplier: f32,

    // === Life pickup ===
    pub heart_item_frequency: u32,
    pub heart_item_width: f32,
    pub heart_item_height: f32,
    pub heart_float_amplitude: f32,
    pub heart_float_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            ground_height: GROUND_HEIGHT,

            initial_scroll_speed: INITIAL_SCROLL_SPEED,
            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            max_frame_dt: MAX_FRAME_DT,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,

            pipe_gap_min: PIPE_GAP_MIN,
            pipe_gap_max: PIPE_GAP_MAX,
            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_min_stub: PIPE_MIN_STUB,
            pipe_spawn_offset: PIPE_SPAWN_OFFSET,

            max_lives: MAX_LIVES,
            speed_increase_frequency: SPEED_INCREASE_FREQUENCY,
            speed_increase_multiplier: SPEED_INCREASE_MULTIPLIER,

            heart_item_frequency: HEART_ITEM_FREQUENCY,
            heart_item_width: HEART_ITEM_WIDTH,
            heart_item_height: HEART_ITEM_HEIGHT,
            heart_float_amplitude: HEART_FLOAT_AMPLITUDE,
            heart_float_speed: HEART_FLOAT_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("initial_scroll_speed", self.initial_scroll_speed),
            ("initial_spawn_interval", self.initial_spawn_interval),
            ("max_frame_dt", self.max_frame_dt),
            ("flap_impulse", self.flap_impulse),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_gap_min", self.pipe_gap_min),
            ("pipe_gap_max", self.pipe_gap_max),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("heart_item_width", self.heart_item_width),
            ("heart_item_height", self.heart_item_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("ground_height", self.ground_height),
            ("pipe_min_stub", self.pipe_min_stub),
            ("pipe_spawn_offset", self.pipe_spawn_offset),
            ("heart_float_amplitude", self.heart_float_amplitude),
            ("heart_float_speed", self.heart_float_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must not be negative, got {}", name, value)));
            }
        }

        if !self.gravity.is_finite() {
            return Err(invalid("gravity must be finite".to_string()));
        }
        if self.pipe_gap_min > self.pipe_gap_max {
            return Err(invalid(format!(
                "pipe_gap_min ({}) exceeds pipe_gap_max ({})",
                self.pipe_gap_min, self.pipe_gap_max
            )));
        }
        let needed = self.ground_height + 2.0 * self.pipe_min_stub + self.pipe_gap_max;
        if needed > self.window_height {
            return Err(invalid(format!(
                "largest gap plus stubs needs {} above the floor but window_height is {}",
                needed, self.window_height
            )));
        }
        if self.heart_item_height > self.window_height * 0.5 {
            return Err(invalid("heart_item_height must not exceed half the window".to_string()));
        }
        if self.max_lives == 0 {
            return Err(invalid("max_lives must be at least 1".to_string()));
        }
        if self.speed_increase_frequency == 0 || self.heart_item_frequency == 0 {
            return Err(invalid("score frequencies must be at least 1".to_string()));
        }
        if !self.speed_increase_multiplier.is_finite() || self.speed_increase_multiplier <= 1.0 {
            return Err(invalid(format!(
                "speed_increase_multiplier must be greater than 1, got {}",
                self.speed_increase_multiplier
            )));
        }
        Ok(())
    }

    /// Bottom of the open air above the ground strip
    pub fn floor_y(&self) -> f32 {
        self.ground_height
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "max_lives": 5, "gravity": -900.0 }"#).unwrap();
        assert_eq!(config.max_lives, 5);
        assert_eq!(config.gravity, -900.0);
        assert_eq!(config.window_width, WINDOW_WIDTH);
        assert_eq!(config.heart_item_frequency, HEART_ITEM_FREQUENCY);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_gap_range() {
        let err = GameConfig::from_json_str(r#"{ "pipe_gap_min": 200.0, "pipe_gap_max": 150.0 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_gap_that_cannot_fit() {
        let config = GameConfig {
            window_height: 300.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_ratcheting_multiplier() {
        let config = GameConfig {
            speed_increase_multiplier: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_lives() {
        let config = GameConfig {
            max_lives: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here/flappy.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
