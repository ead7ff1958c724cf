pub mod scene;

pub use scene::{SceneConfig, SceneInput, UnderwaterInput, WobbleInput};
