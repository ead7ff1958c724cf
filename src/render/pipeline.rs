use log::warn;
use web_sys::{WebGl2RenderingContext, WebGlFramebuffer, WebGlTexture};

use super::image::ImageTexture;
use super::pass::EffectPass;
use super::webgl::GlContext;
use crate::effects::{Effect, LightMapState};
use crate::scene::Scene;

/// Backdrop -> underwater light -> wobble -> canvas
pub struct EffectPipeline {
    ctx: GlContext,

    underwater_pass: EffectPass,
    wobble_pass: EffectPass,

    // Underwater output, read by the wobble pass
    lit_texture: Option<WebGlTexture>,
    lit_fbo: Option<WebGlFramebuffer>,

    width: i32,
    height: i32,
}

impl EffectPipeline {
    pub fn new(
        gl: WebGl2RenderingContext,
        width: i32,
        height: i32,
        scene: &Scene,
    ) -> Result<Self, String> {
        let ctx = GlContext::new(gl);

        let underwater_pass = EffectPass::new(&ctx, scene.underwater())?;
        let wobble_pass = EffectPass::new(&ctx, scene.wobble())?;

        let mut pipeline = Self {
            ctx,
            underwater_pass,
            wobble_pass,
            lit_texture: None,
            lit_fbo: None,
            width,
            height,
        };

        pipeline.create_framebuffers()?;

        Ok(pipeline)
    }

    fn create_framebuffers(&mut self) -> Result<(), String> {
        self.ctx.gl.delete_framebuffer(self.lit_fbo.take().as_ref());
        self.ctx.gl.delete_texture(self.lit_texture.take().as_ref());

        let texture = self.ctx.create_texture(self.width, self.height)?;
        let fbo = self.ctx.create_framebuffer(&texture)?;
        self.lit_texture = Some(texture);
        self.lit_fbo = Some(fbo);
        Ok(())
    }

    /// Draw one frame of `backdrop` through the scene's effects
    pub fn render(&self, scene: &Scene, backdrop: &ImageTexture) {
        let gl = &self.ctx.gl;

        let input = match backdrop.gl_texture(&self.ctx) {
            Ok(Some(texture)) => texture,
            Ok(None) => {
                self.ctx.viewport(0, 0, self.width, self.height);
                self.ctx.clear(0.0, 0.02, 0.08, 1.0);
                return;
            }
            Err(e) => {
                warn!("pipeline: backdrop upload failed: {}", e);
                return;
            }
        };

        // === Pass 1: Underwater light into the offscreen target ===
        let underwater = scene.underwater();
        let lit = match (underwater.state(), underwater.validate(), self.lit_texture.as_ref()) {
            (LightMapState::Ready, Ok(()), Some(lit)) => {
                gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, self.lit_fbo.as_ref());
                self.ctx.viewport(0, 0, self.width, self.height);
                self.underwater_pass.draw(&self.ctx, underwater, &input);
                lit
            }
            // Light map not usable yet; wobble the bare backdrop
            _ => &input,
        };

        // === Pass 2: Wobble onto the canvas ===
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, None);
        self.ctx.viewport(0, 0, self.width, self.height);
        self.wobble_pass.draw(&self.ctx, scene.wobble(), lit);
    }

    /// Resize the render pipeline
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        self.create_framebuffers()
    }
}
