//! Platform and clock stand-ins for running the frame loop without a window.

use crate::platform::{Clock, Platform};
use quadview_common::CursorMode;
use std::cell::Cell;

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Platform that remembers every title and cursor change.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    pub titles: Vec<String>,
    pub cursor_modes: Vec<CursorMode>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}

impl Platform for RecordingPlatform {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_modes.push(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1.0);
        clock.advance(0.5);
        assert_eq!(clock.now(), 1.5);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn recording_platform_keeps_history() {
        let mut platform = RecordingPlatform::new();
        platform.set_title("a");
        platform.set_title("b");
        platform.set_cursor_mode(CursorMode::Free);
        assert_eq!(platform.last_title(), Some("b"));
        assert_eq!(platform.cursor_modes, vec![CursorMode::Free]);
    }
}
