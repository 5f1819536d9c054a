//! Shared types and configuration for the quadview viewer.
//!
//! # Invariants
//! - Key codes follow one numbering across every crate.
//! - A loaded `ViewerConfig` has passed `validate()`.

pub mod config;
pub mod types;

pub use config::{
    BackendChoice, CameraConfig, ConfigError, InputConfig, KeyBindings, RendererConfig,
    TimingConfig, ViewerConfig, WindowConfig,
};
pub use types::{CameraMovement, CursorMode, KEY_TABLE_SIZE, Key};
