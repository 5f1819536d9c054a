use crate::platform::Platform;
use quadview_common::{CursorMode, ViewerConfig};
use quadview_input::{Action, InputQueue, InputRouter};
use quadview_render::{Camera, Scene, SceneError};

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Everything the frame loop mutates, owned in one place.
///
/// The windowing layer pushes events into `queue`; the frame loop drains it
/// once per iteration and applies the resulting actions to the camera, the
/// scene and the platform.
pub struct AppState<S> {
    pub camera: Camera,
    pub scene: S,
    pub router: InputRouter,
    pub queue: InputQueue,
    cursor_mode: CursorMode,
    close_requested: bool,
}

impl<S: Scene> AppState<S> {
    /// Initialize the scene, then size camera and scene to the configured
    /// window. `init_scene` always runs before the first `resize`.
    pub fn bootstrap(mut scene: S, config: &ViewerConfig) -> Result<Self, KernelError> {
        let (width, height) = (config.window.width, config.window.height);

        scene.init_scene()?;

        let mut camera = Camera::from_config(&config.camera);
        camera.set_screen_size(width, height);
        scene.resize(width, height);

        tracing::info!(
            width,
            height,
            position = ?camera.position,
            yaw = camera.yaw,
            pitch = camera.pitch,
            "scene initialized"
        );

        Ok(Self {
            camera,
            scene,
            router: InputRouter::new(&config.input),
            queue: InputQueue::new(config.input.queue_capacity),
            cursor_mode: config.window.initial_cursor,
            close_requested: false,
        })
    }

    /// Route and apply every queued event. Returns how many were handled.
    pub fn drain_input(&mut self, platform: &mut impl Platform) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop() {
            handled += 1;
            if let Some(action) = self.router.handle_event(event) {
                self.apply(action, platform);
            }
        }
        handled
    }

    /// Apply the held-key actions for a frame that lasted `dt` seconds.
    pub fn resolve_continuous(&mut self, dt: f32, platform: &mut impl Platform) {
        for action in self.router.resolve_continuous(dt) {
            self.apply(action, platform);
        }
    }

    pub fn apply(&mut self, action: Action, platform: &mut impl Platform) {
        match action {
            Action::Move(direction, amount) => {
                self.camera.process_keyboard(direction, amount);
            }
            Action::Look { dx, dy } => {
                self.camera.process_mouse_movement(dx, dy);
            }
            Action::SetCursorMode(mode) => {
                if mode != self.cursor_mode {
                    tracing::debug!(?mode, "cursor mode changed");
                    self.cursor_mode = mode;
                    platform.set_cursor_mode(mode);
                }
            }
            Action::ShowQuad(show) => self.scene.show_quad(show),
            Action::ShowSolid(solid) => self.scene.show_solid(solid),
            Action::Resize { width, height } => {
                tracing::debug!(width, height, "viewport resized");
                self.camera.set_screen_size(width, height);
                self.scene.resize(width, height);
            }
            Action::Quit => {
                if !self.close_requested {
                    tracing::info!("close requested");
                }
                self.close_requested = true;
            }
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    /// Tear down the state, handing back the scene.
    pub fn into_scene(self) -> S {
        self.scene
    }
}
