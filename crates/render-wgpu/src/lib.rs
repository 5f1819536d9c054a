//! wgpu scene for the viewer.
//!
//! Draws a grid floor and a textured quad that can be hidden or switched to
//! wireframe. The surface is created by the application; this crate only
//! configures it and renders into it.
//!
//! # Invariants
//! - GPU resources exist only after `init_scene`.
//! - At most one acquired surface texture is pending between `draw` and `present`.
//! - Wireframe is drawn as a line list, so it works on GL backends without
//!   polygon-mode support.

mod gpu;
pub mod mesh;
mod shaders;

pub use gpu::{SimpleScene, SurfaceTarget};
pub use mesh::{GridVertex, QuadVertex};
