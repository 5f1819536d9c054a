//! Rendering adapter: renderer-agnostic scene contract and fly camera.
//!
//! # Invariants
//! - Render flags change only through the scene setters.
//! - A scene draws nothing before `init_scene` succeeds.
//!
//! The GPU implementation lives in `quadview-render-wgpu`; [`DebugScene`]
//! implements the same trait without a device for headless runs.

mod camera;
mod debug;
mod scene;

pub use camera::Camera;
pub use debug::{DebugScene, SceneCall};
pub use scene::{RenderFlags, Scene, SceneError};

pub fn crate_info() -> &'static str {
    "quadview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
