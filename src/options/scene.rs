use serde::{Deserialize, Serialize};

use crate::geometry::{Color, TorusParams};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// One coordinate axis segment.
pub struct AxisOptions {
    /// Endpoint weighted by `i / 100` (the last sample).
    pub a: [f32; 3],
    /// Endpoint weighted by `1 - i / 100` (the first sample).
    pub b: [f32; 3],
    /// Batch color.
    pub color: Color,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self::along([1.0, 0.0, 0.0], Color::RED)
    }
}

impl AxisOptions {
    /// Segment from `-50 * dir` to `100 * dir`.
    fn along(dir: [f32; 3], color: Color) -> Self {
        Self {
            a: dir.map(|c| c * -50.0),
            b: dir.map(|c| c * 100.0),
            color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// The procedural primitives drawn every frame.
pub struct SceneOptions {
    /// Torus shape and sampling.
    pub torus: TorusParams,
    /// Torus batch color.
    pub torus_color: Color,
    /// X axis segment.
    pub axis_x: AxisOptions,
    /// Y axis segment.
    pub axis_y: AxisOptions,
    /// Z axis segment.
    pub axis_z: AxisOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            torus: TorusParams::default(),
            torus_color: Color::YELLOW,
            axis_x: AxisOptions::along([1.0, 0.0, 0.0], Color::RED),
            axis_y: AxisOptions::along([0.0, 1.0, 0.0], Color::GREEN),
            axis_z: AxisOptions::along([0.0, 0.0, 1.0], Color::BLUE),
        }
    }
}
