use crate::camera::Camera;
use crate::scene::{RenderFlags, Scene, SceneError};
use glam::Vec3;

/// One recorded call into a [`DebugScene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCall {
    Init,
    Update(f32),
    Draw,
    Present,
    Resize(u32, u32),
    ShowQuad(bool),
    ShowSolid(bool),
}

/// Headless scene that records what the frame loop asks of it.
///
/// Used by the CLI simulator and by tests in place of a GPU scene. Follows
/// the same contract as the GPU scene: drawing before `init_scene` fails.
#[derive(Debug, Default)]
pub struct DebugScene {
    initialized: bool,
    flags: RenderFlags,
    viewport: (u32, u32),
    time: f32,
    frames_drawn: u64,
    frames_presented: u64,
    last_eye: Option<Vec3>,
    calls: Vec<SceneCall>,
    record_calls: bool,
}

impl DebugScene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            record_calls: true,
            ..Self::default()
        }
    }

    /// Stop keeping the call log (long simulations).
    pub fn without_call_log(mut self) -> Self {
        self.record_calls = false;
        self
    }

    pub fn calls(&self) -> &[SceneCall] {
        &self.calls
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_eye(&self) -> Option<Vec3> {
        self.last_eye
    }

    /// Human-readable summary of the scene state.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "=== Scene (frames={}, time={:.2}s) ===\n",
            self.frames_drawn, self.time
        );
        out.push_str(&format!(
            "Viewport: {}x{}\n",
            self.viewport.0, self.viewport.1
        ));
        out.push_str(&format!(
            "Quad: {} / {}\n",
            if self.flags.show_quad { "shown" } else { "hidden" },
            if self.flags.show_solid { "solid" } else { "wireframe" }
        ));
        if let Some(eye) = self.last_eye {
            out.push_str(&format!(
                "Camera: eye=({:.2}, {:.2}, {:.2})\n",
                eye.x, eye.y, eye.z
            ));
        }
        out
    }

    fn record(&mut self, call: SceneCall) {
        if self.record_calls {
            self.calls.push(call);
        }
    }
}

impl Scene for DebugScene {
    fn init_scene(&mut self) -> Result<(), SceneError> {
        self.initialized = true;
        self.record(SceneCall::Init);
        Ok(())
    }

    fn update(&mut self, time: f32) {
        self.time = time;
        self.record(SceneCall::Update(time));
    }

    fn draw(&mut self, camera: &Camera) -> Result<(), SceneError> {
        if !self.initialized {
            return Err(SceneError::NotInitialized);
        }
        self.frames_drawn += 1;
        self.last_eye = Some(camera.position);
        self.record(SceneCall::Draw);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SceneError> {
        if !self.initialized {
            return Err(SceneError::NotInitialized);
        }
        self.frames_presented += 1;
        self.record(SceneCall::Present);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.record(SceneCall::Resize(width, height));
    }

    fn show_quad(&mut self, show: bool) {
        self.flags.show_quad = show;
        self.record(SceneCall::ShowQuad(show));
    }

    fn show_solid(&mut self, solid: bool) {
        self.flags.show_solid = solid;
        self.record(SceneCall::ShowSolid(solid));
    }

    fn flags(&self) -> RenderFlags {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_before_init_fails() {
        let mut scene = DebugScene::new(800, 600);
        let camera = Camera::default();
        assert!(matches!(
            scene.draw(&camera),
            Err(SceneError::NotInitialized)
        ));
        assert_eq!(scene.frames_drawn(), 0);
    }

    #[test]
    fn records_calls_in_order() {
        let mut scene = DebugScene::new(800, 600);
        let camera = Camera::default();
        scene.init_scene().unwrap();
        scene.resize(1024, 768);
        scene.update(1.5);
        scene.draw(&camera).unwrap();
        scene.present().unwrap();

        assert_eq!(
            scene.calls(),
            &[
                SceneCall::Init,
                SceneCall::Resize(1024, 768),
                SceneCall::Update(1.5),
                SceneCall::Draw,
                SceneCall::Present,
            ]
        );
        assert_eq!(scene.last_eye(), Some(camera.position));
    }

    #[test]
    fn toggles_update_flags() {
        let mut scene = DebugScene::new(1, 1);
        scene.show_quad(false);
        scene.show_solid(false);
        assert_eq!(
            scene.flags(),
            RenderFlags {
                show_quad: false,
                show_solid: false
            }
        );
        let text = scene.describe();
        assert!(text.contains("hidden"));
        assert!(text.contains("wireframe"));
    }

    #[test]
    fn call_log_can_be_disabled() {
        let mut scene = DebugScene::new(1, 1).without_call_log();
        scene.init_scene().unwrap();
        scene.update(0.0);
        assert!(scene.calls().is_empty());
        assert_eq!(scene.viewport(), (1, 1));
    }
}
