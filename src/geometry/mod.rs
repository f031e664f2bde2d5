//! Procedural point-cloud geometry.
//!
//! Every generator is a pure function of its arguments: no caching, no
//! hidden state, no clock. Meshes are rebuilt from scratch each frame.

mod axis;
mod color;
mod torus;

pub use axis::{axis, AXIS_POINT_COUNT};
pub use color::Color;
use glam::Vec3;
pub use torus::{torus, TorusParams, MAX_STEPS_PER_TURN};

/// A single point of a point-cloud batch, laid out for the GPU vertex
/// buffer (`a_position` at offset 0, `a_color` at offset 12).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Per-vertex RGBA color.
    pub color: [f32; 4],
}

impl Vertex {
    /// Vertex at `position` with the given color.
    #[must_use]
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    /// Position as a [`Vec3`].
    #[must_use]
    pub fn pos(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// One draw's worth of points plus the color the batch is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Debug label ("torus", "axis x", ...).
    pub label: &'static str,
    /// Batch color, uploaded as a uniform when the program has no
    /// per-vertex color attribute.
    pub color: Color,
    /// The points, in generation order.
    pub vertices: Vec<Vertex>,
}

impl Batch {
    /// Number of points in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the batch has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Normalize `v`, returning it unchanged when its length is zero.
#[must_use]
pub fn normalize_or_self(v: Vec3) -> Vec3 {
    let len = v.length();
    if len == 0.0 {
        return v;
    }
    v / len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_vector_is_unchanged() {
        assert_eq!(normalize_or_self(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let n = normalize_or_self(Vec3::new(3.0, 0.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!(n.abs_diff_eq(Vec3::new(0.6, 0.0, 0.8), 1e-6));
    }

    #[test]
    fn vertex_layout_matches_shader_offsets() {
        assert_eq!(size_of::<Vertex>(), 28);
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Color::RED);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 1.0]);
    }
}
