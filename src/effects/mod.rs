//! Post-processing effects and the parameters they expose to the renderer
//!
//! Each effect owns a [`ParameterSet`] and a fragment program whose uniform
//! declarations mirror it. The renderer reads the parameters every frame and
//! binds them before drawing; effects never touch the GPU themselves.

pub mod params;
pub mod shaders;
pub mod texture;
pub mod underwater;
pub mod wobble;

pub use params::{Access, ParameterSet, Uniform, UniformKind, UniformValue};
pub use texture::{
    DecodeListener, ListenerHandle, ListenerId, Texture, TextureRef, TextureSize, TextureSource,
};
pub use underwater::{shade, LightMapState, UnderwaterLight};
pub use wobble::Wobble;

use crate::error::{EffectError, ParameterError};

/// Capability shared by every post-processing effect
pub trait Effect {
    fn name(&self) -> &'static str;

    /// GLSL ES 3.00 fragment program; uniforms match [`Effect::parameters`]
    fn fragment_source(&self) -> &'static str;

    /// Parameters as they should be bound for the next draw
    fn parameters(&self) -> ParameterSet;

    fn parameter(&self, name: &str) -> Option<UniformValue>;

    fn set_parameter(&mut self, name: &str, value: UniformValue) -> Result<(), ParameterError>;

    /// Whether the effect is fit to draw with its current inputs
    fn validate(&self) -> Result<(), EffectError> {
        Ok(())
    }

    /// Check every parameter is declared in the fragment program with its kind
    fn check_program(&self) -> Result<(), EffectError> {
        let source = self.fragment_source();
        for uniform in self.parameters().iter() {
            let declared = shaders::declared_uniform_type(source, uniform.name());
            if declared != Some(uniform.kind().glsl_type()) {
                return Err(EffectError::UndeclaredUniform {
                    name: uniform.name().to_string(),
                    expected: uniform.kind(),
                });
            }
        }
        Ok(())
    }
}
