use quadview_common::{CameraMovement, CursorMode};

/// A high-level action produced by the input router.
///
/// The frame loop consumes actions, never raw input events, so the windowing
/// layer can be swapped without touching camera or scene logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate the camera by `amount` (already scaled by elapsed time and speed).
    Move(CameraMovement, f32),
    /// Rotate the camera by a cursor delta in pixels (`dy` positive is up).
    Look { dx: f32, dy: f32 },
    /// Grab or release the cursor.
    SetCursorMode(CursorMode),
    /// Show or hide the textured quad.
    ShowQuad(bool),
    /// Draw the quad filled (`true`) or as wireframe (`false`).
    ShowSolid(bool),
    /// The drawable area changed size.
    Resize { width: u32, height: u32 },
    /// Stop the frame loop after the current iteration.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_carries_direction_and_amount() {
        let a = Action::Move(CameraMovement::Forward, 0.5);
        assert!(matches!(a, Action::Move(CameraMovement::Forward, amount) if amount == 0.5));
    }

    #[test]
    fn toggles_compare_by_value() {
        assert_eq!(Action::ShowQuad(true), Action::ShowQuad(true));
        assert_ne!(Action::ShowQuad(true), Action::ShowQuad(false));
        assert_ne!(
            Action::SetCursorMode(CursorMode::Free),
            Action::SetCursorMode(CursorMode::Captured)
        );
    }
}
