//! Input handling: platform-agnostic event types and the controller that
//! turns them into camera and spin mutations.

/// Maps events onto [`ViewState`](crate::engine::ViewState) mutations.
pub mod controller;
/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
mod keyboard;

pub use controller::{EventResponse, InputController};
pub use event::{ButtonMask, InputEvent, MouseButton};
pub use keyboard::KeyAction;
