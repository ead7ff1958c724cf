//! Animation module for motion along the scene path
//!
//! Converts frame time into eased progress that the curve evaluator maps
//! onto a position.

mod easing;
mod path_animation;

pub use easing::{ease, Easing};
pub use path_animation::{PathAnimation, MIN_DURATION};
