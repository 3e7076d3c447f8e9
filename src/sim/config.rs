//! Character Tuning Configuration
//!
//! Author-supplied tuning values for one character, immutable for the
//! character's lifetime. All quantities are Q16.16 fixed-point.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::fixed::{to_fixed, Fixed, FIXED_ONE};
use crate::core::vec2::FixedVec2;
use crate::sim::sensor::LayerMask;

/// Errors raised while loading or validating a character configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file was not valid JSON
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field violates its documented range
    #[error("config field `{field}` must be {requirement}")]
    OutOfRange {
        /// Offending field name
        field: &'static str,
        /// Human-readable range requirement
        requirement: &'static str,
    },
}

/// Tuning for one character.
///
/// `normal_gravity_scale` is special: the controller overwrites it at
/// construction with whatever gravity scale the rigid body already carries,
/// so authored files normally omit it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Horizontal locomotion speed (units/sec)
    pub move_speed: Fixed,

    /// Instantaneous upward impulse per jump
    pub jump_force: Fixed,

    /// Jump budget restored on landing (clamped to at least 1)
    pub max_jumps: u32,

    /// Gravity multiplier while gliding (0..=1, lower = floatier)
    pub glide_gravity_scale: Fixed,

    /// Max downward speed while gliding (negative)
    pub max_fall_speed: Fixed,

    /// Horizontal speed during a dash
    pub dash_speed: Fixed,

    /// Dash length in seconds; <= 0 means an instantaneous dash
    pub dash_duration: Fixed,

    /// Max downward speed while pinned to a wall (negative)
    pub wall_slide_speed: Fixed,

    /// Ground probe center, relative to the character pivot
    pub ground_check_offset: FixedVec2,

    /// Ground probe radius
    pub ground_check_radius: Fixed,

    /// Wall probe center, relative to the pivot; mirrored for the far side
    pub wall_check_offset: FixedVec2,

    /// Wall probe radius
    pub wall_check_radius: Fixed,

    /// Physics layers treated as solid geometry
    pub solid_mask: LayerMask,

    /// Gravity multiplier outside any override; captured from the rigid
    /// body at initialization, not authored
    pub normal_gravity_scale: Fixed,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            move_speed: to_fixed(5.0),
            jump_force: to_fixed(10.0),
            max_jumps: 2,
            glide_gravity_scale: to_fixed(0.3),
            max_fall_speed: to_fixed(-2.0),
            dash_speed: to_fixed(12.0),
            dash_duration: to_fixed(0.25),
            wall_slide_speed: to_fixed(-1.5),
            ground_check_offset: FixedVec2::new(0, to_fixed(-0.8)),
            ground_check_radius: to_fixed(0.2),
            wall_check_offset: FixedVec2::new(to_fixed(0.45), 0),
            wall_check_radius: to_fixed(0.2),
            solid_mask: 1,
            normal_gravity_scale: FIXED_ONE,
        }
    }
}

impl CharacterConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that violate documented field ranges.
    ///
    /// Ranges that have a defined fallback (`max_jumps`, `dash_duration`)
    /// are not errors; `sanitized` handles those.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_speed < 0 {
            return Err(ConfigError::OutOfRange {
                field: "move_speed",
                requirement: "non-negative",
            });
        }
        if self.jump_force < 0 {
            return Err(ConfigError::OutOfRange {
                field: "jump_force",
                requirement: "non-negative",
            });
        }
        if self.glide_gravity_scale < 0 || self.glide_gravity_scale > FIXED_ONE {
            return Err(ConfigError::OutOfRange {
                field: "glide_gravity_scale",
                requirement: "within [0, 1]",
            });
        }
        if self.max_fall_speed > 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_fall_speed",
                requirement: "non-positive",
            });
        }
        if self.wall_slide_speed > 0 {
            return Err(ConfigError::OutOfRange {
                field: "wall_slide_speed",
                requirement: "non-positive",
            });
        }
        if self.dash_speed < 0 {
            return Err(ConfigError::OutOfRange {
                field: "dash_speed",
                requirement: "non-negative",
            });
        }
        if self.ground_check_radius < 0 || self.wall_check_radius < 0 {
            return Err(ConfigError::OutOfRange {
                field: "check_radius",
                requirement: "non-negative",
            });
        }
        Ok(())
    }

    /// Apply initialization-time clamps for fields with defined fallbacks.
    ///
    /// A zero jump budget would soft-lock the character, so `max_jumps`
    /// is clamped to at least 1. `dash_duration <= 0` stays as authored:
    /// the state machine treats it as an instantaneous dash.
    pub fn sanitized(mut self) -> Self {
        self.max_jumps = self.max_jumps.max(1);
        self
    }
}
