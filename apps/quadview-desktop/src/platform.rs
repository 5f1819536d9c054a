use quadview_common::{CursorMode, Key};
use quadview_kernel::Platform;
use std::sync::Arc;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

/// Window-side half of the frame loop: title updates and cursor capture.
pub struct WinitPlatform {
    window: Arc<Window>,
}

impl WinitPlatform {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl Platform for WinitPlatform {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        match mode {
            CursorMode::Captured => {
                // Not every platform can lock the pointer; confine it instead.
                let grabbed = self
                    .window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
                if let Err(e) = grabbed {
                    tracing::warn!("cursor grab unavailable: {e}");
                }
                self.window.set_cursor_visible(false);
            }
            CursorMode::Free => {
                if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                    tracing::warn!("cursor release failed: {e}");
                }
                self.window.set_cursor_visible(true);
            }
        }
    }
}

/// Translate a physical key into the viewer's key numbering.
///
/// Returns `None` for keys the viewer has no code for.
pub fn map_key(key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let value = match code {
        KeyCode::Space => 32,
        KeyCode::Digit0 => 48,
        KeyCode::Digit1 => 49,
        KeyCode::Digit2 => 50,
        KeyCode::Digit3 => 51,
        KeyCode::Digit4 => 52,
        KeyCode::Digit5 => 53,
        KeyCode::Digit6 => 54,
        KeyCode::Digit7 => 55,
        KeyCode::Digit8 => 56,
        KeyCode::Digit9 => 57,

        KeyCode::KeyA => 65,
        KeyCode::KeyB => 66,
        KeyCode::KeyC => 67,
        KeyCode::KeyD => 68,
        KeyCode::KeyE => 69,
        KeyCode::KeyF => 70,
        KeyCode::KeyG => 71,
        KeyCode::KeyH => 72,
        KeyCode::KeyI => 73,
        KeyCode::KeyJ => 74,
        KeyCode::KeyK => 75,
        KeyCode::KeyL => 76,
        KeyCode::KeyM => 77,
        KeyCode::KeyN => 78,
        KeyCode::KeyO => 79,
        KeyCode::KeyP => 80,
        KeyCode::KeyQ => 81,
        KeyCode::KeyR => 82,
        KeyCode::KeyS => 83,
        KeyCode::KeyT => 84,
        KeyCode::KeyU => 85,
        KeyCode::KeyV => 86,
        KeyCode::KeyW => 87,
        KeyCode::KeyX => 88,
        KeyCode::KeyY => 89,
        KeyCode::KeyZ => 90,

        KeyCode::Escape => 256,
        KeyCode::Enter => 257,
        KeyCode::Tab => 258,
        KeyCode::Backspace => 259,
        KeyCode::ArrowRight => 262,
        KeyCode::ArrowLeft => 263,
        KeyCode::ArrowDown => 264,
        KeyCode::ArrowUp => 265,

        KeyCode::F1 => 290,
        KeyCode::F2 => 291,
        KeyCode::F3 => 292,
        KeyCode::F4 => 293,
        KeyCode::F5 => 294,
        KeyCode::F6 => 295,
        KeyCode::F7 => 296,
        KeyCode::F8 => 297,
        KeyCode::F9 => 298,
        KeyCode::F10 => 299,
        KeyCode::F11 => 300,
        KeyCode::F12 => 301,

        KeyCode::ShiftLeft => 340,
        KeyCode::ControlLeft => 341,
        KeyCode::AltLeft => 342,
        KeyCode::ShiftRight => 344,
        KeyCode::ControlRight => 345,
        KeyCode::AltRight => 346,

        _ => return None,
    };
    Some(Key(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_ascii() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), Some(Key::W));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)), Some(Key::A));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyZ)), Some(Key::Z));
    }

    #[test]
    fn named_keys_match_bindings() {
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::Escape)),
            Some(Key::ESCAPE)
        );
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::ShiftLeft)),
            Some(Key::LEFT_SHIFT)
        );
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::ArrowUp)).map(|k| k.name()),
            Some("Up".to_string())
        );
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumLock)), None);
    }
}
