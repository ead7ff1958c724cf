//! One fullscreen draw of one effect

use log::{debug, warn};
use web_sys::{WebGl2RenderingContext, WebGlProgram, WebGlTexture, WebGlUniformLocation};

use super::image::ImageTexture;
use super::webgl::GlContext;
use crate::effects::shaders::{FULLSCREEN_VERTEX_SHADER, SOURCE_SAMPLER};
use crate::effects::{Effect, UniformValue};

/// Compiled program plus cached uniform locations for an effect
pub struct EffectPass {
    name: &'static str,
    program: WebGlProgram,
    source: Option<WebGlUniformLocation>,
    locations: Vec<(String, Option<WebGlUniformLocation>)>,
}

impl EffectPass {
    /// Compile `effect`'s program after checking it declares every parameter
    pub fn new(ctx: &GlContext, effect: &dyn Effect) -> Result<Self, String> {
        let name = effect.name();
        effect
            .check_program()
            .map_err(|e| format!("{}: {}", name, e))?;

        let program = ctx
            .create_program(FULLSCREEN_VERTEX_SHADER, effect.fragment_source())
            .map_err(|e| format!("{}: {}", name, e))?;

        let source = ctx.get_uniform_location(&program, SOURCE_SAMPLER);
        let locations: Vec<_> = effect
            .parameters()
            .iter()
            .map(|uniform| {
                let location = ctx.get_uniform_location(&program, uniform.name());
                if location.is_none() {
                    debug!("{}: uniform '{}' is inactive", name, uniform.name());
                }
                (uniform.name().to_string(), location)
            })
            .collect();

        Ok(Self {
            name,
            program,
            source,
            locations,
        })
    }

    fn location(&self, name: &str) -> Option<&WebGlUniformLocation> {
        self.locations
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, location)| location.as_ref())
    }

    /// Draw `input` through the effect into the bound framebuffer
    pub fn draw(&self, ctx: &GlContext, effect: &dyn Effect, input: &WebGlTexture) {
        ctx.gl.use_program(Some(&self.program));

        ctx.bind_texture_unit(0, Some(input));
        ctx.uniform_1i(self.source.as_ref(), 0);

        let mut unit = 1;
        for uniform in effect.parameters().iter() {
            let location = self.location(uniform.name());
            match uniform.value() {
                UniformValue::Scalar(v) => ctx.uniform_1f(location, *v),
                UniformValue::Vec2(v) => ctx.uniform_2f(location, v.x, v.y),
                UniformValue::Vec4(v) => ctx.uniform_4fv(location, v),
                UniformValue::Texture(texture) => {
                    let Some(image) = texture.downcast_ref::<ImageTexture>() else {
                        warn!("{}: '{}' is not backed by an image", self.name, uniform.name());
                        continue;
                    };
                    match image.gl_texture(ctx) {
                        Ok(Some(gl_texture)) => {
                            ctx.bind_texture_unit(unit, Some(&gl_texture));
                            ctx.uniform_1i(location, unit as i32);
                            unit += 1;
                        }
                        Ok(None) => {}
                        Err(e) => warn!("{}: {}", self.name, e),
                    }
                }
            }
        }

        ctx.gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);
    }
}
