use std::fmt::Display;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext};

pub mod animation;
pub mod data;
pub mod effects;
pub mod error;
pub mod math;
pub mod render;
pub mod scene;

pub use effects::{Effect, UnderwaterLight, Wobble};
pub use error::{ConfigError, CurveError, EffectError, ParameterError};
pub use math::{ControlPath, Vec2};
pub use scene::Scene;

use data::SceneConfig;
use effects::TextureRef;
use render::{EffectPipeline, ImageTexture};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Position at `progress` on the Catmull-Rom curve through (`xs`, `ys`), as `[x, y]`
#[wasm_bindgen]
pub fn evaluate_path(progress: f32, xs: &[f32], ys: &[f32]) -> Result<Vec<f32>, JsValue> {
    let point = math::evaluate(progress, xs, ys).map_err(js_error)?;
    Ok(point.to_array().to_vec())
}

/// Scene state plus its WebGL pipeline, exposed to JavaScript
#[wasm_bindgen]
pub struct AquatorEngine {
    scene: Scene,
    pipeline: EffectPipeline,
    backdrop: ImageTexture,
    width: i32,
    height: i32,
}

#[wasm_bindgen]
impl AquatorEngine {
    /// Create an engine drawing `backdrop` lit by `light_map` into `canvas`.
    ///
    /// Either image may still be loading; the light effect switches on once
    /// the light map has decoded.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        scene_yaml: &str,
        backdrop: HtmlImageElement,
        light_map: HtmlImageElement,
    ) -> Result<AquatorEngine, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let config = SceneConfig::from_yaml(scene_yaml).map_err(js_error)?;
        let mut scene = Scene::new(config, TextureRef::new(ImageTexture::new(light_map)));
        scene.resize(width as f32, height as f32);

        let pipeline = EffectPipeline::new(gl, width, height, &scene)
            .map_err(|e| JsValue::from_str(&e))?;

        log::info!(
            "aquator: {}x{} canvas, path of {} control points",
            width,
            height,
            scene.path().len()
        );

        Ok(Self {
            scene,
            pipeline,
            backdrop: ImageTexture::new(backdrop),
            width,
            height,
        })
    }

    /// Advance the scene by `dt` seconds; returns the object position as `[x, y]`
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32) -> Vec<f32> {
        self.scene.update(dt).to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn render(&self) {
        self.pipeline.render(&self.scene, &self.backdrop);
    }

    /// Handle canvas resize
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsValue> {
        self.width = width;
        self.height = height;
        self.scene.resize(width as f32, height as f32);
        self.pipeline
            .resize(width, height)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen]
    pub fn position(&self) -> Vec<f32> {
        self.scene.position().to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn progress(&self) -> f32 {
        self.scene.progress()
    }

    #[wasm_bindgen]
    pub fn set_progress(&mut self, progress: f32) {
        self.scene.animation_mut().set_progress(progress);
    }

    #[wasm_bindgen]
    pub fn play(&mut self) {
        self.scene.animation_mut().play();
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.scene.animation_mut().pause();
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.scene.animation().is_playing()
    }

    /// Whether the light map has decoded and the light effect is active
    #[wasm_bindgen]
    pub fn light_map_ready(&self) -> bool {
        self.scene.underwater().validate().is_ok()
            && self.scene.underwater().state() == effects::LightMapState::Ready
    }

    #[wasm_bindgen]
    pub fn set_light_scale(&mut self, x: f32, y: f32) {
        self.scene.underwater_mut().set_scale(Vec2::new(x, y));
    }

    #[wasm_bindgen]
    pub fn set_wobble_scale(&mut self, x: f32, y: f32) {
        self.scene.wobble_mut().set_scale(Vec2::new(x, y));
    }

    /// Set any effect parameter by name; `value` is a number or an array of 2 or 4 numbers
    #[wasm_bindgen]
    pub fn set_parameter(
        &mut self,
        effect: &str,
        name: &str,
        value: &[f32],
    ) -> Result<(), JsValue> {
        let value = match *value {
            [v] => effects::UniformValue::Scalar(v),
            [x, y] => effects::UniformValue::Vec2(Vec2::new(x, y)),
            [a, b, c, d] => effects::UniformValue::Vec4([a, b, c, d]),
            _ => {
                let message = format!("unsupported value of {} components", value.len());
                return Err(js_error(message));
            }
        };

        let result = match effect {
            "underwater" => self.scene.underwater_mut().set_parameter(name, value),
            "wobble" => self.scene.wobble_mut().set_parameter(name, value),
            other => return Err(js_error(format!("unknown effect '{}'", other))),
        };
        result.map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn get_width(&self) -> i32 {
        self.width
    }

    #[wasm_bindgen]
    pub fn get_height(&self) -> i32 {
        self.height
    }
}
