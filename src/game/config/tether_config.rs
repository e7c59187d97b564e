//! Tether Configuration
//!
//! Rope, reel and shooting parameters for the grappling hook. Immutable once
//! a hook is built; `Default` carries the tuned values.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Tuning for one grappling hook.
///
/// Spring and damper follow the physics world's units (N/m and N·s/m).
/// A stiffness of `0.0` makes the rope limit a hard stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherParameters {
    /// Rope limit when fired, and the upper bound when reeling out (meters)
    pub max_length: f32,
    /// Shortest rope the reel will wind in to (meters)
    pub idle_length: f32,
    /// How fast the reel changes the rope limit (meters/second)
    pub reel_rate: f32,
    /// Soft-limit spring stiffness (N/m)
    pub spring_stiffness: f32,
    /// Soft-limit damper (N·s/m)
    pub damper: f32,
    /// Impulse applied along the aim direction on release (N·s)
    pub shoot_force: f32,
    /// Shoot origin relative to the camera, in (right, up, forward) meters
    pub shoot_origin_offset: Vec3,
}

impl Default for TetherParameters {
    fn default() -> Self {
        Self {
            max_length: 15.0,
            idle_length: 0.5,
            reel_rate: 4.0,
            spring_stiffness: 0.0,
            damper: 0.0,
            shoot_force: 10.0,
            shoot_origin_offset: Vec3::new(-0.6, 0.7, 0.0),
        }
    }
}

impl TetherParameters {
    /// Parse from JSON; missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject values the rope solver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("max_length", self.max_length),
            ("idle_length", self.idle_length),
            ("reel_rate", self.reel_rate),
            ("spring_stiffness", self.spring_stiffness),
            ("damper", self.damper),
            ("shoot_force", self.shoot_force),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.shoot_origin_offset.is_finite() {
            return Err(ConfigError::Invalid("shoot_origin_offset must be finite".into()));
        }
        if self.max_length <= 0.0 {
            return Err(ConfigError::Invalid("max_length must be positive".into()));
        }
        if self.idle_length > self.max_length {
            return Err(ConfigError::Invalid(format!(
                "idle_length ({}) exceeds max_length ({})",
                self.idle_length, self.max_length
            )));
        }
        Ok(())
    }

    /// Clamp a requested rope length to the reel's range.
    pub fn clamp_length(&self, length: f32) -> f32 {
        length.clamp(self.idle_length, self.max_length)
    }
}
