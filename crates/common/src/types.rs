use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyboard key code.
///
/// Codes follow the GLFW numbering so that printable keys map to their ASCII
/// value (`A` = 65) and named keys sit above 255 (`Escape` = 256). Windowing
/// layers translate their native key identifiers into this space; codes that
/// have no mapping may still travel through the input pipeline and are ignored
/// by the key table when they fall outside `0..KEY_TABLE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(pub i32);

/// Number of slots in the key state table.
pub const KEY_TABLE_SIZE: usize = 1024;

/// Named (non-printable) keys understood by config files and help output.
const NAMED_KEYS: &[(&str, i32)] = &[
    ("Space", 32),
    ("Escape", 256),
    ("Enter", 257),
    ("Tab", 258),
    ("Backspace", 259),
    ("Right", 262),
    ("Left", 263),
    ("Down", 264),
    ("Up", 265),
    ("F1", 290),
    ("F2", 291),
    ("F3", 292),
    ("F4", 293),
    ("F5", 294),
    ("F6", 295),
    ("F7", 296),
    ("F8", 297),
    ("F9", 298),
    ("F10", 299),
    ("F11", 300),
    ("F12", 301),
    ("LeftShift", 340),
    ("LeftControl", 341),
    ("LeftAlt", 342),
    ("RightShift", 344),
    ("RightControl", 345),
    ("RightAlt", 346),
];

impl Key {
    pub const SPACE: Key = Key(32);
    pub const A: Key = Key(65);
    pub const D: Key = Key(68);
    pub const F: Key = Key(70);
    pub const L: Key = Key(76);
    pub const O: Key = Key(79);
    pub const P: Key = Key(80);
    pub const S: Key = Key(83);
    pub const W: Key = Key(87);
    pub const X: Key = Key(88);
    pub const Z: Key = Key(90);
    pub const ESCAPE: Key = Key(256);
    pub const LEFT_SHIFT: Key = Key(340);

    /// Key for an ASCII letter or digit (case-insensitive for letters).
    pub fn from_char(c: char) -> Option<Key> {
        let c = c.to_ascii_uppercase();
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            Some(Key(c as i32))
        } else {
            None
        }
    }

    /// Parse a key name: a single letter/digit, a named key such as
    /// `LeftShift`, or a raw numeric code.
    pub fn from_name(name: &str) -> Option<Key> {
        let name = name.trim();
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = Key::from_char(c) {
                return Some(key);
            }
        }
        NAMED_KEYS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, code)| Key(*code))
            .or_else(|| name.parse::<i32>().ok().map(Key))
    }

    /// Human-readable name, falling back to the numeric code.
    pub fn name(&self) -> String {
        match self.0 {
            48..=57 | 65..=90 => char::from(self.0 as u8).to_string(),
            code => NAMED_KEYS
                .iter()
                .find(|(_, c)| *c == code)
                .map(|(n, _)| (*n).to_string())
                .unwrap_or_else(|| code.to_string()),
        }
    }

    /// Index into the key state table, if the code is in range.
    pub fn table_index(&self) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|i| *i < KEY_TABLE_SIZE)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::from_name(&value).ok_or_else(|| format!("unknown key name: {value:?}"))
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

/// Direction of a keyboard-driven camera translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Whether the window grabs and hides the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    /// Hidden and locked to the window; mouse motion drives the camera.
    #[default]
    Captured,
    /// Regular visible cursor.
    Free,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_use_ascii_codes() {
        assert_eq!(Key::from_char('w'), Some(Key::W));
        assert_eq!(Key::from_char('W'), Some(Key(87)));
        assert_eq!(Key::from_char('-'), None);
    }

    #[test]
    fn named_keys_resolve_case_insensitively() {
        assert_eq!(Key::from_name("leftshift"), Some(Key::LEFT_SHIFT));
        assert_eq!(Key::from_name("Escape"), Some(Key::ESCAPE));
        assert_eq!(Key::from_name("F12"), Some(Key(301)));
        assert_eq!(Key::from_name("512"), Some(Key(512)));
        assert_eq!(Key::from_name("Hyper"), None);
    }

    #[test]
    fn names_fall_back_to_code() {
        assert_eq!(Key::LEFT_SHIFT.name(), "LeftShift");
        assert_eq!(Key::O.to_string(), "O");
        assert_eq!(Key(1500).name(), "1500");
    }

    #[test]
    fn table_index_rejects_out_of_range() {
        assert_eq!(Key(0).table_index(), Some(0));
        assert_eq!(Key(1023).table_index(), Some(1023));
        assert_eq!(Key(1024).table_index(), None);
        assert_eq!(Key(-1).table_index(), None);
    }

    #[test]
    fn cursor_mode_defaults_to_captured() {
        assert_eq!(CursorMode::default(), CursorMode::Captured);
    }
}
