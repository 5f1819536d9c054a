//! Viewer kernel: application state, bootstrap ordering and the frame loop.
//!
//! # Invariants
//! - Single-threaded; all state is reached through one `AppState`.
//! - Input is drained once per frame, before continuous actions resolve.
//! - `init_scene` runs before the first `resize`.
//! - A close request never aborts a frame in progress.

pub mod frame;
pub mod headless;
pub mod help;
pub mod platform;
pub mod state;

pub use frame::{FpsCounter, FrameLoop, FrameReport, format_significant, format_title};
pub use headless::{ManualClock, RecordingPlatform};
pub use help::{help_lines, help_text};
pub use platform::{Clock, Platform, SystemClock};
pub use state::{AppState, KernelError};

pub fn crate_info() -> &'static str {
    "quadview-kernel v0.1.0"
}
