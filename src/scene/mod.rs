//! Scene construction utilities
//!
//! The sculpting scene answers the controller's raycasts and owns the clay.

mod scene_builder;
mod scene_error;
mod sculpt_scene;

pub use scene_builder::SceneBuilder;
pub use scene_error::SceneError;
pub use sculpt_scene::SculptScene;
