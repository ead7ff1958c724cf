pub mod webgl;
pub mod image;
pub mod pass;
pub mod pipeline;

pub use webgl::GlContext;
pub use image::ImageTexture;
pub use pass::EffectPass;
pub use pipeline::EffectPipeline;
