pub mod vec2;
pub mod spline;

pub use vec2::Vec2;
pub use spline::{ControlPath, catmull_rom, evaluate, MIN_CONTROL_POINTS};
