use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Pointer and keyboard sensitivity.
pub struct InputOptions {
    /// Degrees of rotation (or spin) per pixel of drag.
    pub drag_sensitivity: f32,
    /// Distance moved per movement key press.
    pub move_step: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.5,
            move_step: 0.25,
        }
    }
}
