use serde::{Deserialize, Serialize};

/// Camera movements that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// move_forward = "KeyW"
/// strafe_left = "KeyA"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Move along the camera's local +Y.
    MoveForward,
    /// Move along the camera's local -Y.
    MoveBack,
    /// Strafe along the camera's local -X.
    StrafeLeft,
    /// Strafe along the camera's local +X.
    StrafeRight,
}
