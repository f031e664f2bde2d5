use glam::Vec3;

use super::{Color, Vertex};

/// Points emitted per axis segment.
pub const AXIS_POINT_COUNT: usize = 101;

/// Sample an axis segment as [`AXIS_POINT_COUNT`] evenly spaced points.
///
/// Point `i` is `a * (i / 100) + b * (1 - i / 100)`, so the first point is
/// `b` and the last is `a`.
#[must_use]
pub fn axis(a: Vec3, b: Vec3, color: Color) -> Vec<Vertex> {
    let last = (AXIS_POINT_COUNT - 1) as f32;
    (0..AXIS_POINT_COUNT)
        .map(|i| {
            let t = i as f32 / last;
            Vertex::new(a * t + b * (1.0 - t), color)
        })
        .collect()
}
