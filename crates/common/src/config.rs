use crate::types::{CursorMode, Key};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level viewer configuration. Every field has a default, so an empty
/// YAML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub renderer: RendererConfig,
    pub camera: CameraConfig,
    pub input: InputConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Base window title; the FPS readout is appended to it.
    pub title: String,
    pub vsync: bool,
    pub initial_cursor: CursorMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "quadview".into(),
            vsync: true,
            initial_cursor: CursorMode::Captured,
        }
    }
}

/// Which graphics backends the GPU instance may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// OpenGL only; startup fails if no GL adapter is available.
    #[default]
    Gl,
    /// Vulkan, Metal, DX12 or browser WebGPU.
    Primary,
    /// Anything the platform offers.
    All,
}

impl std::str::FromStr for BackendChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gl" | "opengl" => Ok(Self::Gl),
            "primary" => Ok(Self::Primary),
            "all" => Ok(Self::All),
            other => Err(format!("unknown backend {other:?} (expected gl, primary or all)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub backend: BackendChoice,
}

/// Initial camera placement and tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// World units per second at 1x speed.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(-5.0, 2.0, 3.0),
            up: Vec3::Y,
            yaw: -1.75,
            pitch: -5.75,
            movement_speed: 3.0,
            mouse_sensitivity: 0.1,
            fov: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Speed multiplier applied while the fast key is held.
    pub fast_multiplier: f32,
    /// Maximum number of input events buffered between two frames.
    pub queue_capacity: usize,
    pub bindings: KeyBindings,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            fast_multiplier: 5.0,
            queue_capacity: 256,
            bindings: KeyBindings::default(),
        }
    }
}

/// Key assignments for every viewer action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub fast: Key,
    pub capture_cursor: Key,
    pub release_cursor: Key,
    pub hide_quad: Key,
    pub show_quad: Key,
    pub wireframe: Key,
    pub solid: Key,
    pub quit: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            fast: Key::LEFT_SHIFT,
            capture_cursor: Key::Z,
            release_cursor: Key::X,
            hide_quad: Key::O,
            show_quad: Key::P,
            wireframe: Key::L,
            solid: Key::F,
            quit: Key::ESCAPE,
        }
    }
}

impl KeyBindings {
    /// Binding/description pairs in help-text order.
    pub fn describe(&self) -> Vec<(Key, &'static str)> {
        vec![
            (self.fast, "Increment camera movement"),
            (self.forward, "Forward camera"),
            (self.left, "Left camera"),
            (self.right, "Right camera"),
            (self.backward, "Backward camera"),
            (self.show_quad, "Show textured quad"),
            (self.hide_quad, "Hide textured quad"),
            (self.wireframe, "Line quad"),
            (self.solid, "Solid quad"),
            (self.capture_cursor, "Capture cursor"),
            (self.release_cursor, "Release cursor"),
            (self.quit, "Quit"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frames averaged per FPS readout; the title refreshes once per window.
    pub fps_samples: usize,
    /// Optional upper bound on the per-frame delta time, in seconds.
    /// Unset means the camera always moves by the full elapsed time.
    pub max_frame_delta: Option<f64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps_samples: 60,
            max_frame_delta: None,
        }
    }
}

impl ViewerConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = if text.trim().is_empty() {
            ViewerConfig::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.timing.fps_samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "timing.fps_samples must be at least 2, got {}",
                self.timing.fps_samples
            )));
        }
        if self.timing.max_frame_delta.is_some_and(|max| max <= 0.0) {
            return Err(ConfigError::Invalid(
                "timing.max_frame_delta must be positive".into(),
            ));
        }
        if self.input.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "input.queue_capacity must be non-zero".into(),
            ));
        }
        if self.input.fast_multiplier <= 0.0 {
            return Err(ConfigError::Invalid(
                "input.fast_multiplier must be positive".into(),
            ));
        }
        if self.camera.up.length_squared() == 0.0 {
            return Err(ConfigError::Invalid("camera.up must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_startup_layout() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.position, Vec3::new(-5.0, 2.0, 3.0));
        assert_eq!(config.camera.yaw, -1.75);
        assert_eq!(config.timing.fps_samples, 60);
        assert_eq!(config.input.fast_multiplier, 5.0);
        assert_eq!(config.input.bindings.fast, Key::LEFT_SHIFT);
        assert_eq!(config.renderer.backend, BackendChoice::Gl);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        let config = ViewerConfig::from_yaml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r#"
window:
  width: 640
  title: demo
input:
  bindings:
    forward: Up
    fast: RightShift
renderer:
  backend: all
"#;
        let config = ViewerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.window.title, "demo");
        assert_eq!(config.input.bindings.forward, Key(265));
        assert_eq!(config.input.bindings.fast, Key(344));
        assert_eq!(config.input.bindings.backward, Key::S);
        assert_eq!(config.renderer.backend, BackendChoice::All);
    }

    #[test]
    fn unknown_key_name_is_rejected() {
        let yaml = "input:\n  bindings:\n    forward: Hyper\n";
        assert!(matches!(
            ViewerConfig::from_yaml(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = ViewerConfig::default();
        config.timing.fps_samples = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.window.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.input.queue_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timing:\n  fps_samples: 30").unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.timing.fps_samples, 30);
        assert_eq!(config.timing.max_frame_delta, None);
    }

    #[test]
    fn frame_delta_cap_is_opt_in() {
        assert_eq!(TimingConfig::default().max_frame_delta, None);

        let config = ViewerConfig::from_yaml("timing:\n  max_frame_delta: 0.1\n").unwrap();
        assert_eq!(config.timing.max_frame_delta, Some(0.1));

        let mut config = ViewerConfig::default();
        config.timing.max_frame_delta = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ViewerConfig::load(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn backend_choice_parses() {
        assert_eq!("OpenGL".parse::<BackendChoice>(), Ok(BackendChoice::Gl));
        assert_eq!("primary".parse::<BackendChoice>(), Ok(BackendChoice::Primary));
        assert!("metal".parse::<BackendChoice>().is_err());
    }
}
