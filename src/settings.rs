//! Session settings
//!
//! Player names and physics tuning. Loaded from a JSON file by the native
//! runner; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics constants used by the integrator and the shot model.
///
/// The defaults are tuned for a 60 Hz tick; changing the tick rate means
/// re-deriving friction and restitution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Per-tick velocity multiplier
    pub friction: f32,
    /// Components below this snap to zero
    pub min_velocity: f32,
    /// Perpendicular speed kept after a rail bounce
    pub rail_restitution: f32,
    /// Hard cap for any ball
    pub max_ball_speed: f32,
    /// Cue ball speed at full power
    pub max_shot_speed: f32,
    /// Drag distance for full power
    pub max_power_pixels: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            min_velocity: MIN_VELOCITY,
            rail_restitution: RAIL_RESTITUTION,
            max_ball_speed: MAX_BALL_SPEED,
            max_shot_speed: MAX_SHOT_SPEED,
            max_power_pixels: MAX_POWER_PIXELS,
        }
    }
}

impl PhysicsTuning {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let unit = |v: f32| v > 0.0 && v <= 1.0;
        if !unit(self.friction) {
            return Err(SettingsError::Invalid {
                field: "friction",
                reason: "must be in (0, 1]",
            });
        }
        if !unit(self.rail_restitution) {
            return Err(SettingsError::Invalid {
                field: "rail_restitution",
                reason: "must be in (0, 1]",
            });
        }
        let checks = [
            ("min_velocity", self.min_velocity),
            ("max_ball_speed", self.max_ball_speed),
            ("max_shot_speed", self.max_shot_speed),
            ("max_power_pixels", self.max_power_pixels),
        ];
        for (field, value) in checks {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }
        Ok(())
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display names, indexed by player slot
    pub player_names: [String; 2],
    pub tuning: PhysicsTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            tuning: PhysicsTuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, or defaults if there is none or it is unusable
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player_names.iter().any(|n| n.trim().is_empty()) {
            return Err(SettingsError::Invalid {
                field: "player_names",
                reason: "names must not be empty",
            });
        }
        self.tuning.validate()
    }
}
