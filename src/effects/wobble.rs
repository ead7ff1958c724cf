//! Wave distortion effect

use std::f32::consts::TAU;

use log::warn;

use super::params::{ParameterSet, UniformValue};
use super::shaders::WOBBLE_FRAGMENT_SHADER;
use super::Effect;
use crate::error::ParameterError;
use crate::math::Vec2;

pub const OFFSET: &str = "offset";
pub const SCALE: &str = "scale";

/// Horizontal ripple amplitude in texture coordinates
const RIPPLE_AMPLITUDE: f32 = 0.002;
const RIPPLE_FREQUENCY: f32 = 20.0;

/// Distorts where the input image is sampled.
///
/// `offset.x` phases the main wave and `offset.y` the fine ripple;
/// `scale.x` sets the wave frequency and `scale.y` its amplitude.
/// Animating `offset` over time makes the image undulate.
pub struct Wobble {
    params: ParameterSet,
}

impl Wobble {
    pub fn new() -> Self {
        Self {
            params: ParameterSet::new()
                .with(OFFSET, Vec2::ZERO)
                .with(SCALE, Vec2::ZERO),
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.params.get_vec2(OFFSET).unwrap_or(Vec2::ZERO)
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.store(OFFSET, offset.into());
    }

    pub fn scale(&self) -> Vec2 {
        self.params.get_vec2(SCALE).unwrap_or(Vec2::ZERO)
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.store(SCALE, scale.into());
    }

    /// Coordinate actually sampled for texture coordinate `uv`
    pub fn displace(&self, uv: Vec2) -> Vec2 {
        let offset = self.offset();
        let scale = self.scale();

        let ripple = (uv.x * RIPPLE_FREQUENCY + offset.y).sin() * RIPPLE_AMPLITUDE;
        let wave = (uv.x * TAU * scale.x + offset.x).sin() * (0.5 - uv.y * scale.x).abs() * scale.y;

        Vec2::new(uv.x + ripple, uv.y + wave)
    }

    fn store(&mut self, name: &str, value: UniformValue) {
        if let Err(err) = self.params.set(name, value) {
            warn!("wobble: {}", err);
        }
    }
}

impl Default for Wobble {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Wobble {
    fn name(&self) -> &'static str {
        "wobble"
    }

    fn fragment_source(&self) -> &'static str {
        WOBBLE_FRAGMENT_SHADER
    }

    fn parameters(&self) -> ParameterSet {
        self.params.clone()
    }

    fn parameter(&self, name: &str) -> Option<UniformValue> {
        self.params.get(name).cloned()
    }

    fn set_parameter(&mut self, name: &str, value: UniformValue) -> Result<(), ParameterError> {
        self.params.set(name, value)
    }
}
