use crate::action::Action;
use crate::cursor::CursorTracker;
use crate::event::InputEvent;
use crate::keys::KeyState;
use quadview_common::{CameraMovement, CursorMode, InputConfig, KeyBindings};

/// Turns input events and held keys into actions.
///
/// Discrete events (key transitions, cursor samples, resizes, focus loss, close requests)
/// go through [`InputRouter::handle_event`] as they are drained. Held keys are
/// read once per frame by [`InputRouter::resolve_continuous`].
#[derive(Debug, Clone)]
pub struct InputRouter {
    keys: KeyState,
    cursor: CursorTracker,
    bindings: KeyBindings,
    fast_multiplier: f32,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InputRouter {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            keys: KeyState::new(),
            cursor: CursorTracker::new(),
            bindings: config.bindings.clone(),
            fast_multiplier: config.fast_multiplier,
        }
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::Key { code, pressed } => {
                if !self.keys.set(code, pressed) {
                    tracing::trace!(%code, "ignoring out-of-range key code");
                }
                (pressed && code == self.bindings.quit).then_some(Action::Quit)
            }
            InputEvent::CursorMoved { x, y } => {
                let (dx, dy) = self.cursor.update(x, y);
                Some(Action::Look { dx, dy })
            }
            InputEvent::Resized { width, height } => Some(Action::Resize { width, height }),
            InputEvent::FocusLost => {
                self.release_all();
                None
            }
            InputEvent::CloseRequested => Some(Action::Quit),
        }
    }

    /// Mark every key released.
    pub fn release_all(&mut self) {
        let held = self.keys.held_count();
        if held > 0 {
            tracing::debug!(held, "releasing held keys");
        }
        self.keys.clear();
    }

    /// Actions implied by the keys held this frame, in evaluation order.
    ///
    /// Every binding is checked independently. When both keys of a toggle pair
    /// are held, the later action in the list wins once applied: cursor release,
    /// quad shown, solid fill.
    pub fn resolve_continuous(&self, dt: f32) -> Vec<Action> {
        let b = &self.bindings;
        let held = |key| self.keys.is_down(key);
        let speed = if held(b.fast) {
            self.fast_multiplier
        } else {
            1.0
        };
        let amount = dt * speed;

        let table = [
            (b.left, Action::Move(CameraMovement::Left, amount)),
            (b.right, Action::Move(CameraMovement::Right, amount)),
            (b.backward, Action::Move(CameraMovement::Backward, amount)),
            (b.forward, Action::Move(CameraMovement::Forward, amount)),
            (b.capture_cursor, Action::SetCursorMode(CursorMode::Captured)),
            (b.release_cursor, Action::SetCursorMode(CursorMode::Free)),
            (b.hide_quad, Action::ShowQuad(false)),
            (b.show_quad, Action::ShowQuad(true)),
            (b.wireframe, Action::ShowSolid(false)),
            (b.solid, Action::ShowSolid(true)),
        ];

        table
            .into_iter()
            .filter(|(key, _)| held(*key))
            .map(|(_, action)| action)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadview_common::Key;

    fn press(router: &mut InputRouter, code: Key) -> Option<Action> {
        router.handle_event(InputEvent::Key { code, pressed: true })
    }

    fn release(router: &mut InputRouter, code: Key) -> Option<Action> {
        router.handle_event(InputEvent::Key {
            code,
            pressed: false,
        })
    }

    #[test]
    fn escape_press_quits_release_does_not() {
        let mut router = InputRouter::default();
        assert_eq!(press(&mut router, Key::ESCAPE), Some(Action::Quit));
        assert_eq!(release(&mut router, Key::ESCAPE), None);
        assert_eq!(press(&mut router, Key::W), None);
    }

    #[test]
    fn close_request_quits() {
        let mut router = InputRouter::default();
        assert_eq!(
            router.handle_event(InputEvent::CloseRequested),
            Some(Action::Quit)
        );
    }

    #[test]
    fn cursor_events_become_look_deltas() {
        let mut router = InputRouter::default();
        let first = router.handle_event(InputEvent::CursorMoved { x: 120.0, y: 80.0 });
        assert_eq!(first, Some(Action::Look { dx: 0.0, dy: 0.0 }));
        let second = router.handle_event(InputEvent::CursorMoved { x: 130.0, y: 75.0 });
        assert_eq!(second, Some(Action::Look { dx: 10.0, dy: 5.0 }));
    }

    #[test]
    fn resize_is_forwarded() {
        let mut router = InputRouter::default();
        assert_eq!(
            router.handle_event(InputEvent::Resized {
                width: 640,
                height: 480
            }),
            Some(Action::Resize {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn nothing_held_means_no_actions() {
        let router = InputRouter::default();
        assert!(router.resolve_continuous(0.016).is_empty());
    }

    #[test]
    fn movement_scales_with_dt_and_fast_key() {
        let mut router = InputRouter::default();
        press(&mut router, Key::W);
        assert_eq!(
            router.resolve_continuous(0.5),
            vec![Action::Move(CameraMovement::Forward, 0.5)]
        );

        press(&mut router, Key::LEFT_SHIFT);
        assert_eq!(
            router.resolve_continuous(0.5),
            vec![Action::Move(CameraMovement::Forward, 2.5)]
        );
    }

    #[test]
    fn all_movement_keys_apply_together() {
        let mut router = InputRouter::default();
        for key in [Key::W, Key::A, Key::S, Key::D] {
            press(&mut router, key);
        }
        let actions = router.resolve_continuous(1.0);
        assert_eq!(
            actions,
            vec![
                Action::Move(CameraMovement::Left, 1.0),
                Action::Move(CameraMovement::Right, 1.0),
                Action::Move(CameraMovement::Backward, 1.0),
                Action::Move(CameraMovement::Forward, 1.0),
            ]
        );
    }

    #[test]
    fn conflicting_toggles_keep_fixed_order() {
        let mut router = InputRouter::default();
        for key in [Key::P, Key::O, Key::F, Key::L, Key::X, Key::Z] {
            press(&mut router, key);
        }
        let actions = router.resolve_continuous(0.0);
        let quad: Vec<_> = actions
            .iter()
            .filter(|a| matches!(a, Action::ShowQuad(_)))
            .collect();
        assert_eq!(quad, vec![&Action::ShowQuad(false), &Action::ShowQuad(true)]);
        assert_eq!(actions.last(), Some(&Action::ShowSolid(true)));
        assert!(
            actions
                .iter()
                .position(|a| *a == Action::SetCursorMode(CursorMode::Free))
                > actions
                    .iter()
                    .position(|a| *a == Action::SetCursorMode(CursorMode::Captured))
        );
    }

    #[test]
    fn custom_bindings_are_honoured() {
        let mut config = InputConfig::default();
        config.bindings.forward = Key(265);
        config.fast_multiplier = 2.0;
        config.bindings.fast = Key::SPACE;
        let mut router = InputRouter::new(&config);

        press(&mut router, Key::W);
        assert!(router.resolve_continuous(1.0).is_empty());

        press(&mut router, Key(265));
        press(&mut router, Key::SPACE);
        assert_eq!(
            router.resolve_continuous(1.0),
            vec![Action::Move(CameraMovement::Forward, 2.0)]
        );
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut router = InputRouter::default();
        press(&mut router, Key::W);
        press(&mut router, Key::LEFT_SHIFT);
        assert_eq!(router.resolve_continuous(1.0).len(), 1);

        assert_eq!(router.handle_event(InputEvent::FocusLost), None);
        assert_eq!(router.keys().held_count(), 0);
        assert!(router.resolve_continuous(1.0).is_empty());
    }

    #[test]
    fn released_keys_stop_acting() {
        let mut router = InputRouter::default();
        press(&mut router, Key::D);
        assert_eq!(router.resolve_continuous(1.0).len(), 1);
        release(&mut router, Key::D);
        assert!(router.resolve_continuous(1.0).is_empty());
    }
}
