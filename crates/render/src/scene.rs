use crate::camera::Camera;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene used before init_scene()")]
    NotInitialized,
    #[error("scene initialization failed: {0}")]
    Init(String),
    #[error("surface error: {0}")]
    Surface(String),
}

/// Render toggles owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFlags {
    /// Whether the textured quad is drawn.
    pub show_quad: bool,
    /// Filled (`true`) or wireframe (`false`) quad.
    pub show_solid: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            show_quad: true,
            show_solid: true,
        }
    }
}

/// Renderer-agnostic scene contract driven by the frame loop.
///
/// Call order: `init_scene` once, then `resize` with the initial viewport,
/// then per frame `update` → `draw` → `present`. `resize` before
/// `init_scene` only records the size.
pub trait Scene {
    /// Create GPU resources (pipelines, meshes, textures).
    fn init_scene(&mut self) -> Result<(), SceneError>;

    /// Advance animation state to the absolute time `time` in seconds.
    fn update(&mut self, time: f32);

    /// Render one frame as seen from `camera`.
    fn draw(&mut self, camera: &Camera) -> Result<(), SceneError>;

    /// Hand the last drawn frame to the display.
    fn present(&mut self) -> Result<(), SceneError>;

    /// New viewport size in pixels. Must be safe to call repeatedly.
    fn resize(&mut self, width: u32, height: u32);

    fn show_quad(&mut self, show: bool);

    fn show_solid(&mut self, solid: bool);

    fn flags(&self) -> RenderFlags;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_visible_solid() {
        let flags = RenderFlags::default();
        assert!(flags.show_quad);
        assert!(flags.show_solid);
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            SceneError::NotInitialized.to_string(),
            "scene used before init_scene()"
        );
        assert!(
            SceneError::Surface("lost".into())
                .to_string()
                .contains("lost")
        );
    }
}
