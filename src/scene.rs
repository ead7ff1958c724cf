//! Per-frame scene update
//!
//! Moves the object along its path and animates both effects' parameters.
//! Drawing is left to whoever reads the effects afterwards.

use std::f32::consts::TAU;

use log::debug;

use crate::animation::PathAnimation;
use crate::data::SceneConfig;
use crate::effects::{underwater, Effect, TextureRef, UnderwaterLight, UniformValue, Wobble};
use crate::math::{ControlPath, Vec2};

pub struct Scene {
    path: ControlPath,
    animation: PathAnimation,
    underwater: UnderwaterLight,
    wobble: Wobble,
    sway: Vec2,
    sway_period: f32,
    wobble_speed: Vec2,
    time: f32,
    position: Vec2,
}

impl Scene {
    pub fn new(config: SceneConfig, light_map: TextureRef) -> Self {
        let SceneConfig {
            path,
            animation,
            underwater: underwater_input,
            wobble: wobble_input,
        } = config;

        let mut underwater = UnderwaterLight::new(light_map);
        underwater.set_scale(underwater_input.scale);

        let mut wobble = Wobble::new();
        wobble.set_scale(wobble_input.scale);

        let position = path.evaluate(animation.progress()).unwrap_or_default();
        debug!(
            "scene: {} control points, {} segments",
            path.len(),
            path.segment_count()
        );

        Self {
            path,
            animation,
            underwater,
            wobble,
            sway: underwater_input.sway,
            sway_period: underwater_input.period,
            wobble_speed: wobble_input.speed,
            time: 0.0,
            position,
        }
    }

    /// Advance by `dt` seconds and return the object's new position
    pub fn update(&mut self, dt: f32) -> Vec2 {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
        self.animation.update(dt);

        if let Ok(position) = self.path.evaluate(self.animation.progress()) {
            self.position = position;
        }

        let phase = self.time * TAU / self.sway_period;
        self.underwater
            .set_offset(Vec2::new(self.sway.x * phase.sin(), self.sway.y * phase.cos()));

        let wobble_offset = self.wobble_speed * self.time;
        self.wobble.set_offset(Vec2::new(
            wobble_offset.x.rem_euclid(TAU),
            wobble_offset.y.rem_euclid(TAU),
        ));

        self.position
    }

    /// Record the output size in `dimensions` for the light effect
    pub fn resize(&mut self, width: f32, height: f32) {
        let dimensions = UniformValue::Vec4([width, height, 0.0, 0.0]);
        if let Err(err) = self.underwater.set_parameter(underwater::DIMENSIONS, dimensions) {
            debug!("scene: {}", err);
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn progress(&self) -> f32 {
        self.animation.progress()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn path(&self) -> &ControlPath {
        &self.path
    }

    pub fn animation(&self) -> &PathAnimation {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut PathAnimation {
        &mut self.animation
    }

    pub fn underwater(&self) -> &UnderwaterLight {
        &self.underwater
    }

    pub fn underwater_mut(&mut self) -> &mut UnderwaterLight {
        &mut self.underwater
    }

    pub fn wobble(&self) -> &Wobble {
        &self.wobble
    }

    pub fn wobble_mut(&mut self) -> &mut Wobble {
        &mut self.wobble
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{LightMapState, Texture};
    use crate::error::EffectError;

    const SCENE: &str = r#"
path:
  x: [0, 0, 10, 10, 20, 20]
  y: [0, 10, 0, 10, 0, 10]
  duration: 3.0
  looping: false
underwater:
  scale: [2.0, 2.0]
  sway: [0.1, 0.2]
  period: 4.0
wobble:
  scale: [1.0, 0.02]
  speed: [1.0, 2.0]
"#;

    fn scene_with(texture: &Texture) -> Scene {
        let config = SceneConfig::from_yaml(SCENE).unwrap();
        Scene::new(config, texture.to_ref())
    }

    #[test]
    fn test_initial_state() {
        let scene = scene_with(&Texture::decoded(256, 256));
        assert_eq!(scene.position(), Vec2::new(0.0, 10.0));
        assert_eq!(scene.underwater().scale(), Vec2::new(2.0, 2.0));
        assert_eq!(scene.wobble().scale(), Vec2::new(1.0, 0.02));
        assert_eq!(scene.underwater().state(), LightMapState::Ready);
    }

    #[test]
    fn test_update_moves_along_path() {
        let mut scene = scene_with(&Texture::decoded(256, 256));

        let p = scene.update(1.0);
        assert!(p.distance(&Vec2::new(10.0, 0.0)) < 0.001);

        let end = scene.update(5.0);
        assert!(end.distance(&Vec2::new(20.0, 0.0)) < 0.001);
        assert!(scene.animation().is_complete());
    }

    #[test]
    fn test_update_animates_offsets() {
        let mut scene = scene_with(&Texture::decoded(256, 256));
        scene.update(1.0);

        // A quarter of the sway period: sin = 1, cos = 0.
        let offset = scene.underwater().offset();
        assert!((offset.x - 0.1).abs() < 0.0001);
        assert!(offset.y.abs() < 0.0001);

        assert_eq!(scene.wobble().offset(), Vec2::new(1.0, 2.0));
        scene.update(3.0);
        let wobble = scene.wobble().offset();
        assert!(wobble.x < TAU && wobble.y < TAU);
    }

    #[test]
    fn test_bad_frame_time_is_ignored() {
        let mut scene = scene_with(&Texture::decoded(256, 256));
        scene.update(f32::NAN);
        scene.update(-1.0);
        assert_eq!(scene.time(), 0.0);
        assert_eq!(scene.position(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_light_map_resolves_while_running() {
        let texture = Texture::pending();
        let mut scene = scene_with(&texture);
        scene.update(0.5);
        assert_eq!(scene.underwater().state(), LightMapState::Pending);

        texture.finish_decoding(512, 256);
        scene.update(0.5);
        assert_eq!(scene.underwater().map_dimensions(), Vec2::new(512.0, 256.0));
    }

    #[test]
    fn test_resize_sets_dimensions() {
        let mut scene = scene_with(&Texture::decoded(64, 64));
        scene.resize(800.0, 600.0);
        assert_eq!(
            scene.underwater().parameter(underwater::DIMENSIONS),
            Some(UniformValue::Vec4([800.0, 600.0, 0.0, 0.0]))
        );
    }

    #[test]
    fn test_non_power_of_two_light_map_fails_validation_only() {
        let mut scene = scene_with(&Texture::decoded(300, 200));
        assert_eq!(
            scene.underwater().validate(),
            Err(EffectError::NonPowerOfTwo { width: 300, height: 200 })
        );

        let p = scene.update(1.0);
        assert!(p.distance(&Vec2::new(10.0, 0.0)) < 0.001);
        assert!(scene.wobble().validate().is_ok());
    }
}
