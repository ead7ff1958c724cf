//! Underwater light effect
//!
//! Modulates the image with a light map: bright areas of the map let the
//! original colour through, dark areas fade toward a dim blue. The map's
//! dimensions are known only once it has decoded, which may happen after
//! the effect is built.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

use super::params::{Access, ParameterSet, UniformValue};
use super::shaders::UNDERWATER_LIGHT_FRAGMENT_SHADER;
use super::texture::{ListenerHandle, TextureRef, TextureSize};
use super::Effect;
use crate::error::{EffectError, ParameterError};
use crate::math::Vec2;

pub const LIGHT_MAP: &str = "lightMap";
pub const SCALE: &str = "scale";
pub const OFFSET: &str = "offset";
pub const MAP_DIMENSIONS: &str = "mapDimensions";
pub const DIMENSIONS: &str = "dimensions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightMapState {
    /// Light map still decoding; `mapDimensions` holds its default
    Pending,
    /// Map dimensions known; terminal
    Ready,
}

/// One-shot resolution of the light map's size
#[derive(Default)]
struct MapResolution {
    size: OnceCell<TextureSize>,
    listener: RefCell<Option<ListenerHandle>>,
}

impl MapResolution {
    fn resolve(&self, size: TextureSize) {
        if self.size.set(size).is_err() {
            warn!(
                "underwater light: ignoring repeated light map notification ({}x{})",
                size.width, size.height
            );
            return;
        }
        debug!("underwater light: light map ready ({}x{})", size.width, size.height);
        if !size.is_power_of_two() {
            warn!(
                "underwater light: light map {}x{} is not power-of-two sized",
                size.width, size.height
            );
        }
        self.detach();
    }

    fn detach(&self) {
        let handle = self.listener.borrow_mut().take();
        if let Some(handle) = handle {
            handle.release();
        }
    }
}

pub struct UnderwaterLight {
    // Everything but `mapDimensions`, which is read from `resolution`
    params: ParameterSet,
    resolution: Rc<MapResolution>,
}

impl UnderwaterLight {
    /// Build the effect around `light_map`.
    ///
    /// The map must be power-of-two sized. That is checked by
    /// [`Effect::validate`] whether the map is decoded now or later.
    pub fn new(light_map: TextureRef) -> Self {
        let params = ParameterSet::new()
            .with(LIGHT_MAP, light_map.clone())
            .with(SCALE, Vec2::ONE)
            .with(OFFSET, Vec2::ZERO)
            .with(DIMENSIONS, [0.0_f32; 4]);

        let resolution = Rc::new(MapResolution::default());

        match light_map.size() {
            Some(size) => resolution.resolve(size),
            None => {
                let weak = Rc::downgrade(&resolution);
                let handle = light_map.listen_for_decode(Rc::new(move |size: TextureSize| {
                    // The effect may already be gone.
                    if let Some(resolution) = weak.upgrade() {
                        resolution.resolve(size);
                    }
                }));
                if resolution.size.get().is_some() {
                    handle.release();
                } else {
                    *resolution.listener.borrow_mut() = Some(handle);
                }
            }
        }

        Self { params, resolution }
    }

    pub fn state(&self) -> LightMapState {
        if self.resolution.size.get().is_some() {
            LightMapState::Ready
        } else {
            LightMapState::Pending
        }
    }

    pub fn has_pending_listener(&self) -> bool {
        self.resolution.listener.borrow().is_some()
    }

    pub fn map(&self) -> TextureRef {
        self.params
            .get_texture(LIGHT_MAP)
            .cloned()
            .unwrap_or_else(|| unreachable!("lightMap is declared at construction"))
    }

    /// Swap the light map. `mapDimensions` keeps describing the first map.
    pub fn set_map(&mut self, map: TextureRef) {
        self.store(LIGHT_MAP, map.into());
    }

    pub fn scale(&self) -> Vec2 {
        self.params.get_vec2(SCALE).unwrap_or(Vec2::ONE)
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.store(SCALE, scale.into());
    }

    pub fn offset(&self) -> Vec2 {
        self.params.get_vec2(OFFSET).unwrap_or(Vec2::ZERO)
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.store(OFFSET, offset.into());
    }

    pub fn map_dimensions(&self) -> Vec2 {
        match self.resolution.size.get() {
            Some(size) => Vec2::new(size.width as f32, size.height as f32),
            None => Vec2::ONE,
        }
    }

    /// Light-map coordinate sampled for texture coordinate `uv`
    pub fn light_coord(&self, uv: Vec2) -> Vec2 {
        let scale = self.scale();
        let shifted = uv + self.offset();
        Vec2::new(
            (shifted.x * scale.x).clamp(0.0, 1.0),
            (shifted.y * scale.y).clamp(0.0, 1.0),
        )
    }

    fn store(&mut self, name: &str, value: UniformValue) {
        if let Err(err) = self.params.set(name, value) {
            warn!("underwater light: {}", err);
        }
    }
}

impl Drop for UnderwaterLight {
    fn drop(&mut self) {
        self.resolution.detach();
    }
}

impl Effect for UnderwaterLight {
    fn name(&self) -> &'static str {
        "underwater-light"
    }

    fn fragment_source(&self) -> &'static str {
        UNDERWATER_LIGHT_FRAGMENT_SHADER
    }

    fn parameters(&self) -> ParameterSet {
        let mut params = self.params.clone();
        let dimensions = self.map_dimensions().into();
        if let Err(err) = params.declare(MAP_DIMENSIONS, dimensions, Access::Derived) {
            warn!("underwater light: {}", err);
        }
        params
    }

    fn parameter(&self, name: &str) -> Option<UniformValue> {
        if name == MAP_DIMENSIONS {
            return Some(self.map_dimensions().into());
        }
        self.params.get(name).cloned()
    }

    fn set_parameter(&mut self, name: &str, value: UniformValue) -> Result<(), ParameterError> {
        if name == MAP_DIMENSIONS {
            return Err(ParameterError::ReadOnly(name.to_string()));
        }
        self.params.set(name, value)
    }

    fn validate(&self) -> Result<(), EffectError> {
        if let Some(size) = self.resolution.size.get() {
            check_power_of_two(*size)?;
        }
        match self.map().size() {
            Some(size) => check_power_of_two(size),
            None => Ok(()),
        }
    }
}

/// Colour produced for base colour `base` under light-map red value `light`
pub fn shade(base: [f32; 4], light: f32) -> [f32; 4] {
    let tint = [base[0] / 20.0, base[1] / 20.0, base[2] / 2.0, 1.0];
    let weight = 1.0 - light;
    std::array::from_fn(|i| base[i] + (tint[i] - base[i]) * weight)
}

fn check_power_of_two(size: TextureSize) -> Result<(), EffectError> {
    if size.is_power_of_two() {
        Ok(())
    } else {
        Err(EffectError::NonPowerOfTwo {
            width: size.width,
            height: size.height,
        })
    }
}
