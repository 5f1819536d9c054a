/// Tracks the last cursor position and turns absolute samples into deltas.
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an absolute position and get `(dx, dy)` with y inverted so that
    /// moving up is positive. The first sample only seeds the tracker.
    pub fn update(&mut self, x: f64, y: f64) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));
        ((x - last_x) as f32, (last_y - y) as f32)
    }

    pub fn last_position(&self) -> Option<(f64, f64)> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_zero_delta() {
        let mut cursor = CursorTracker::new();
        assert_eq!(cursor.update(812.0, -40.5), (0.0, 0.0));
        assert_eq!(cursor.last_position(), Some((812.0, -40.5)));
    }

    #[test]
    fn second_sample_inverts_y() {
        let mut cursor = CursorTracker::new();
        cursor.update(400.0, 300.0);
        assert_eq!(cursor.update(410.0, 295.0), (10.0, 5.0));
        assert_eq!(cursor.update(405.0, 300.0), (-5.0, -5.0));
    }
}
