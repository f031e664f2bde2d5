use glam::Vec2;

use crate::animation::Phases;
use crate::camera::{Camera, Spin};
use crate::options::Options;

/// Every value the loop mutates between frames.
///
/// Owned by the engine; the input controller gets it by `&mut`, the frame
/// renderer by `&`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Orbit/zoom/pan camera.
    pub camera: Camera,
    /// Secondary-button scene spin.
    pub spin: Spin,
    /// Torus animation phases.
    pub phases: Phases,
    /// Last pointer position; `None` until the first move after a reset.
    pub pointer: Option<Vec2>,
}

impl ViewState {
    /// Initial state with the configured camera.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            camera: Camera::from_options(&options.camera),
            ..Self::default()
        }
    }
}
