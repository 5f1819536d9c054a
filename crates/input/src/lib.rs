//! Input routing: key table, cursor deltas and the event queue, mapped to
//! viewer actions.
//!
//! # Invariants
//! - The key table only changes on press/release events.
//! - The first cursor sample never produces motion.
//! - Held-key actions are evaluated once per frame in a fixed order.

pub mod action;
pub mod cursor;
pub mod event;
pub mod keys;
pub mod router;

pub use action::Action;
pub use cursor::CursorTracker;
pub use event::{InputEvent, InputQueue, QueueFull};
pub use keys::KeyState;
pub use router::InputRouter;

pub fn crate_info() -> &'static str {
    "quadview-input v0.1.0"
}
