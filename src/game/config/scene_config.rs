//! Scene Configuration
//!
//! Layout of the hook sandbox: player and hook bodies, level surfaces, and
//! the tether tuning. Replaces hardcoded setup in the sandbox binary.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{ConfigError, TetherParameters};

/// An axis-aligned static box in the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// World-space center (meters)
    pub center: Vec3,
    /// Half size along each axis (meters)
    pub half_extents: Vec3,
    /// Whether the hook may anchor to this surface
    #[serde(default)]
    pub hookable: bool,
}

/// Everything needed to build a [`HookScene`](crate::game::scenes::HookScene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World gravity (m/s²)
    pub gravity: Vec3,
    /// Player body center at spawn
    pub player_start: Vec3,
    /// Player collision sphere radius (meters)
    pub player_radius: f32,
    /// Player mass (kilograms)
    pub player_mass: f32,
    /// Camera height above the player body center (meters)
    pub eye_height: f32,
    /// Hook head collision sphere radius (meters)
    pub hook_radius: f32,
    /// Hook head mass (kilograms)
    pub hook_mass: f32,
    /// Static level geometry
    pub surfaces: Vec<SurfaceConfig>,
    /// Rope and shooting tuning
    pub tether: TetherParameters,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            player_start: Vec3::new(0.0, 0.4, 0.0),
            player_radius: 0.4,
            player_mass: 80.0,
            eye_height: 0.6,
            hook_radius: 0.15,
            hook_mass: 1.0,
            surfaces: vec![
                // Ground
                SurfaceConfig {
                    center: Vec3::new(0.0, -0.5, 0.0),
                    half_extents: Vec3::new(30.0, 0.5, 30.0),
                    hookable: false,
                },
                // Hookable wall straight ahead (camera forward at yaw 0 is -Z)
                SurfaceConfig {
                    center: Vec3::new(0.0, 4.0, -8.0),
                    half_extents: Vec3::new(4.0, 4.0, 0.5),
                    hookable: true,
                },
                // Bare concrete wall to the right
                SurfaceConfig {
                    center: Vec3::new(8.0, 4.0, 0.0),
                    half_extents: Vec3::new(0.5, 4.0, 4.0),
                    hookable: false,
                },
            ],
            tether: TetherParameters::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON scene file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("player_radius", self.player_radius),
            ("player_mass", self.player_mass),
            ("hook_radius", self.hook_radius),
            ("hook_mass", self.hook_mass),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if let Some(surface) = self
            .surfaces
            .iter()
            .find(|s| s.half_extents.min_element() <= 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "surface at {:?} has non-positive half extents",
                surface.center
            )));
        }
        self.tether.validate()
    }
}
