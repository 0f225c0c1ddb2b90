//! Rendering
//!
//! `camera` holds the window-independent orbit math; `renderer` turns the
//! scene into three-d draw calls.

pub mod camera;
pub mod renderer;

pub use camera::OrbitControls;
pub use renderer::{apply_controls, perspective_camera, SceneRenderer};
