/// Platform-agnostic input events, delivered in arrival order.
///
/// Window backends translate their native events into these and feed them
/// to [`ViewerEngine::handle_event`](crate::engine::ViewerEngine::handle_event).
///
/// # Example
///
/// ```
/// use cloudview::input::{ButtonMask, InputEvent};
///
/// let drag = InputEvent::PointerMove { x: 100.0, y: 200.0, buttons: ButtonMask::PRIMARY };
/// let key = InputEvent::KeyPress { key: "KeyW".into() };
/// # let _ = (drag, key);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an absolute position.
    PointerMove {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
        /// Buttons held during the move.
        buttons: ButtonMask,
    },
    /// Scroll wheel.
    Wheel {
        /// Vertical scroll amount (positive = away from the user).
        delta_y: f32,
    },
    /// Key pressed, identified by its physical key code string
    /// (winit `KeyCode` debug format: `"KeyW"`, `"Escape"`, ...).
    KeyPress {
        /// Key code string.
        key: String,
    },
    /// Drawable area resized.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// Periodic animation timer fired.
    TimerTick,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Back, forward, or any extra button; never tracked in a [`ButtonMask`].
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

/// Set of mouse buttons currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonMask(u8);

impl ButtonMask {
    /// No buttons held.
    pub const NONE: Self = Self(0);
    /// Primary button held.
    pub const PRIMARY: Self = Self(1);
    /// Secondary button held.
    pub const SECONDARY: Self = Self(1 << 1);
    /// Middle button held.
    pub const MIDDLE: Self = Self(1 << 2);

    fn bit(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::PRIMARY,
            MouseButton::Right => Self::SECONDARY,
            MouseButton::Middle => Self::MIDDLE,
            MouseButton::Other => Self::NONE,
        }
    }

    /// Whether every button in `other` is held.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Mask with `button` pressed or released.
    #[must_use]
    pub fn with(self, button: MouseButton, pressed: bool) -> Self {
        let bit = Self::bit(button).0;
        if pressed {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    /// Whether no button is held.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ButtonMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_bits() {
        let mask = ButtonMask::NONE
            .with(MouseButton::Left, true)
            .with(MouseButton::Right, true);
        assert!(mask.contains(ButtonMask::PRIMARY));
        assert!(mask.contains(ButtonMask::PRIMARY | ButtonMask::SECONDARY));
        let released = mask.with(MouseButton::Left, false);
        assert!(!released.contains(ButtonMask::PRIMARY));
        assert!(released.contains(ButtonMask::SECONDARY));
        assert!(released.with(MouseButton::Right, false).is_empty());
    }

    #[test]
    fn extra_buttons_never_enter_the_mask() {
        let mask = ButtonMask::NONE.with(MouseButton::Other, true);
        assert!(mask.is_empty());
        let held = ButtonMask::SECONDARY.with(MouseButton::Other, false);
        assert_eq!(held, ButtonMask::SECONDARY);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn winit_back_and_forward_are_extra_buttons() {
        for button in [
            winit::event::MouseButton::Back,
            winit::event::MouseButton::Forward,
            winit::event::MouseButton::Other(9),
        ] {
            assert_eq!(MouseButton::from(button), MouseButton::Other);
        }
        assert_eq!(
            MouseButton::from(winit::event::MouseButton::Left),
            MouseButton::Left
        );
    }
}
