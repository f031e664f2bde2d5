use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Initial camera state and zoom behavior.
pub struct CameraOptions {
    /// Initial uniform scale (must be > 0).
    pub scale: f32,
    /// Initial camera position.
    pub position: [f32; 3],
    /// Initial yaw in degrees.
    pub yaw: f32,
    /// Initial pitch in degrees.
    pub pitch: f32,
    /// Scale multiplier per zoom step (must be > 0).
    pub zoom_factor: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            scale: 0.3,
            position: [0.0, 0.0, -0.7],
            yaw: 0.0,
            pitch: 0.0,
            zoom_factor: 1.2,
        }
    }
}
