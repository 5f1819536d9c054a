use quadview_common::{KEY_TABLE_SIZE, Key};

/// Fixed-size pressed/released table indexed by key code.
///
/// Codes outside `0..KEY_TABLE_SIZE` are ignored on write and read as released.
#[derive(Debug, Clone)]
pub struct KeyState {
    down: [bool; KEY_TABLE_SIZE],
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            down: [false; KEY_TABLE_SIZE],
        }
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition. Returns `false` when the code is out of range.
    pub fn set(&mut self, key: Key, pressed: bool) -> bool {
        match key.table_index() {
            Some(i) => {
                self.down[i] = pressed;
                true
            }
            None => false,
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        key.table_index().is_some_and(|i| self.down[i])
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.down.iter().filter(|d| **d).count()
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.down = [false; KEY_TABLE_SIZE];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_release_leaves_every_code_up() {
        let mut keys = KeyState::new();
        for code in 0..KEY_TABLE_SIZE as i32 {
            assert!(keys.set(Key(code), true));
            assert!(keys.is_down(Key(code)));
            assert!(keys.set(Key(code), false));
            assert!(!keys.is_down(Key(code)));
        }
        assert_eq!(keys.held_count(), 0);
    }

    #[test]
    fn out_of_range_codes_are_noops() {
        let mut keys = KeyState::new();
        assert!(!keys.set(Key(-1), true));
        assert!(!keys.set(Key(1024), true));
        assert!(!keys.set(Key(i32::MAX), true));
        assert!(!keys.is_down(Key(1024)));
        assert_eq!(keys.held_count(), 0);
    }

    #[test]
    fn clear_releases_all() {
        let mut keys = KeyState::new();
        keys.set(Key::W, true);
        keys.set(Key::LEFT_SHIFT, true);
        assert_eq!(keys.held_count(), 2);
        keys.clear();
        assert!(!keys.is_down(Key::W));
        assert_eq!(keys.held_count(), 0);
    }
}
