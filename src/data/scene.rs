use serde::Deserialize;

use crate::animation::{Easing, PathAnimation};
use crate::error::ConfigError;
use crate::math::{ControlPath, Vec2};

/// YAML scene description
#[derive(Debug, Clone, Deserialize)]
pub struct SceneInput {
    pub path: PathInput,
    #[serde(default)]
    pub underwater: UnderwaterInput,
    #[serde(default)]
    pub wobble: WobbleInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathInput {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UnderwaterInput {
    pub scale: Vec2,
    /// Largest light map offset reached while swaying
    pub sway: Vec2,
    /// Seconds per sway cycle
    pub period: f32,
}

impl Default for UnderwaterInput {
    fn default() -> Self {
        Self {
            scale: Vec2::ONE,
            sway: Vec2::new(0.05, 0.03),
            period: 6.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WobbleInput {
    pub scale: Vec2,
    /// Offset = elapsed seconds * speed
    pub speed: Vec2,
}

impl Default for WobbleInput {
    fn default() -> Self {
        Self {
            scale: Vec2::new(1.0, 0.01),
            speed: Vec2::new(1.5, 3.0),
        }
    }
}

fn default_duration() -> f32 {
    10.0
}

fn default_looping() -> bool {
    true
}

fn check_finite(field: &'static str, value: Vec2) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn check_seconds(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Validated scene settings
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub path: ControlPath,
    pub animation: PathAnimation,
    pub underwater: UnderwaterInput,
    pub wobble: WobbleInput,
}

impl SceneConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let input: SceneInput = serde_yaml::from_str(yaml)?;
        Self::from_input(input)
    }

    pub fn from_input(input: SceneInput) -> Result<Self, ConfigError> {
        let PathInput {
            x,
            y,
            duration,
            easing,
            looping,
        } = input.path;

        check_seconds("path.duration", duration)?;
        check_seconds("underwater.period", input.underwater.period)?;
        check_finite("underwater.scale", input.underwater.scale)?;
        check_finite("underwater.sway", input.underwater.sway)?;
        check_finite("wobble.scale", input.wobble.scale)?;
        check_finite("wobble.speed", input.wobble.speed)?;

        Ok(Self {
            path: ControlPath::new(x, y)?,
            animation: PathAnimation::new(duration, easing, looping),
            underwater: input.underwater,
            wobble: input.wobble,
        })
    }
}
