//! Event → camera/spin mapping.

use glam::Vec2;

use super::{ButtonMask, InputEvent, KeyAction};
use crate::engine::ViewState;
use crate::options::{InputOptions, KeybindingOptions};

/// Whether an event changed anything worth redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// State changed; request a redraw.
    Redraw,
    /// The event had no effect.
    Ignored,
}

/// Maps pointer, wheel and key events onto a [`ViewState`].
///
/// Holds only configuration; every mutable value lives in the state passed
/// to [`handle_event`](Self::handle_event).
#[derive(Debug, Clone, Default)]
pub struct InputController {
    input: InputOptions,
    keybindings: KeybindingOptions,
}

impl InputController {
    /// Controller with the given sensitivity and key bindings.
    #[must_use]
    pub fn new(input: InputOptions, keybindings: KeybindingOptions) -> Self {
        Self { input, keybindings }
    }

    /// Apply one input event to `state`.
    ///
    /// `Resize` and `TimerTick` are not input mutations and are always
    /// [`EventResponse::Ignored`] here.
    pub fn handle_event(
        &self,
        state: &mut ViewState,
        event: &InputEvent,
    ) -> EventResponse {
        match event {
            InputEvent::PointerMove { x, y, buttons } => {
                self.pointer_moved(state, Vec2::new(*x, *y), *buttons)
            }
            InputEvent::Wheel { delta_y } => {
                if *delta_y > 0.0 {
                    state.camera.zoom_in();
                } else {
                    state.camera.zoom_out();
                }
                EventResponse::Redraw
            }
            InputEvent::KeyPress { key } => self.key_pressed(state, key),
            InputEvent::Resize { .. } | InputEvent::TimerTick => {
                EventResponse::Ignored
            }
        }
    }

    /// Forget the pointer baseline; the next move only re-establishes it.
    pub fn reset(&self, state: &mut ViewState) {
        state.pointer = None;
    }

    fn pointer_moved(
        &self,
        state: &mut ViewState,
        position: Vec2,
        buttons: ButtonMask,
    ) -> EventResponse {
        let Some(previous) = state.pointer.replace(position) else {
            return EventResponse::Ignored;
        };
        let delta = (previous - position) * self.input.drag_sensitivity;

        if buttons.contains(ButtonMask::PRIMARY) {
            state.camera.rotate(delta.x, delta.y);
        } else if buttons.contains(ButtonMask::SECONDARY) {
            state.spin.add(delta.x, delta.y);
        } else {
            return EventResponse::Ignored;
        }
        EventResponse::Redraw
    }

    fn key_pressed(&self, state: &mut ViewState, key: &str) -> EventResponse {
        let Some(action) = self.keybindings.lookup(key) else {
            return EventResponse::Ignored;
        };
        let step = self.input.move_step;
        match action {
            KeyAction::MoveForward => state.camera.move_y(step),
            KeyAction::MoveBack => state.camera.move_y(-step),
            KeyAction::StrafeLeft => state.camera.move_x(-step),
            KeyAction::StrafeRight => state.camera.move_x(step),
        }
        EventResponse::Redraw
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::{Camera, Spin};

    fn drag(x: f32, y: f32, buttons: ButtonMask) -> InputEvent {
        InputEvent::PointerMove { x, y, buttons }
    }

    fn key(code: &str) -> InputEvent {
        InputEvent::KeyPress { key: code.into() }
    }

    #[test]
    fn first_move_only_sets_baseline() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let response =
            controller.handle_event(&mut state, &drag(500.0, -80.0, ButtonMask::PRIMARY));
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(state.camera, Camera::default());
        assert_eq!(state.spin, Spin::default());
        assert_eq!(state.pointer, Some(Vec2::new(500.0, -80.0)));
    }

    #[test]
    fn primary_drag_rotates_camera() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let _ = controller.handle_event(&mut state, &drag(10.0, 10.0, ButtonMask::NONE));
        let response =
            controller.handle_event(&mut state, &drag(6.0, 14.0, ButtonMask::PRIMARY));
        assert_eq!(response, EventResponse::Redraw);
        assert_eq!(state.camera.yaw(), 2.0);
        assert_eq!(state.camera.pitch(), -2.0);
        assert_eq!(state.spin, Spin::default());
    }

    #[test]
    fn secondary_drag_spins_only() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let _ = controller.handle_event(&mut state, &drag(0.0, 0.0, ButtonMask::SECONDARY));
        let _ = controller.handle_event(&mut state, &drag(-20.0, 8.0, ButtonMask::SECONDARY));
        assert_eq!(state.spin, Spin { x: 10.0, y: -4.0 });
        assert_eq!(state.camera, Camera::default());
    }

    #[test]
    fn primary_wins_over_secondary() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let both = ButtonMask::PRIMARY | ButtonMask::SECONDARY;
        let _ = controller.handle_event(&mut state, &drag(0.0, 0.0, both));
        let _ = controller.handle_event(&mut state, &drag(-4.0, 0.0, both));
        assert_eq!(state.camera.yaw(), 2.0);
        assert_eq!(state.spin, Spin::default());
    }

    #[test]
    fn hover_moves_track_baseline() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let _ = controller.handle_event(&mut state, &drag(0.0, 0.0, ButtonMask::NONE));
        let hover = controller.handle_event(&mut state, &drag(100.0, 100.0, ButtonMask::NONE));
        assert_eq!(hover, EventResponse::Ignored);
        let _ = controller.handle_event(&mut state, &drag(98.0, 100.0, ButtonMask::PRIMARY));
        assert_eq!(state.camera.yaw(), 1.0);
    }

    #[test]
    fn reset_restores_baseline_behavior() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let _ = controller.handle_event(&mut state, &drag(0.0, 0.0, ButtonMask::PRIMARY));
        controller.reset(&mut state);
        let response =
            controller.handle_event(&mut state, &drag(300.0, 300.0, ButtonMask::PRIMARY));
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(state.camera.yaw(), 0.0);
    }

    #[test]
    fn wheel_zooms_by_sign() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        let _ = controller.handle_event(&mut state, &InputEvent::Wheel { delta_y: 3.0 });
        assert!((state.camera.scale() - 0.36).abs() < 1e-6);
        let _ = controller.handle_event(&mut state, &InputEvent::Wheel { delta_y: 0.0 });
        assert!((state.camera.scale() - 0.3).abs() < 1e-6);
        let _ = controller.handle_event(&mut state, &InputEvent::Wheel { delta_y: -1.0 });
        assert!((state.camera.scale() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn movement_keys() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        for (code, expected) in [
            ("KeyW", Vec3::new(0.0, 0.25, -0.7)),
            ("KeyS", Vec3::new(0.0, 0.0, -0.7)),
            ("KeyA", Vec3::new(-0.25, 0.0, -0.7)),
            ("KeyD", Vec3::new(0.0, 0.0, -0.7)),
        ] {
            assert_eq!(controller.handle_event(&mut state, &key(code)), EventResponse::Redraw);
            assert!(state.camera.position().abs_diff_eq(expected, 1e-6), "{code}");
        }
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let controller = InputController::default();
        let mut state = ViewState::default();
        assert_eq!(
            controller.handle_event(&mut state, &key("KeyQ")),
            EventResponse::Ignored
        );
        assert_eq!(state.camera, Camera::default());
    }
}
