//! Bundled WGSL sources.

use crate::options::ShadingMode;

/// Vertex stage reading `a_position` and `a_color`.
pub const POINTS_VERTEX: &str =
    include_str!("../../assets/shaders/points_vertex.wgsl");
/// Fragment stage multiplying the vertex color by the `color` uniform.
pub const POINTS_FRAGMENT: &str =
    include_str!("../../assets/shaders/points_fragment.wgsl");
/// Vertex stage reading only `a_position`.
pub const FLAT_VERTEX: &str = include_str!("../../assets/shaders/flat_vertex.wgsl");
/// Fragment stage emitting the `color` uniform.
pub const FLAT_FRAGMENT: &str =
    include_str!("../../assets/shaders/flat_fragment.wgsl");

/// `(vertex, fragment)` sources for a shading mode.
#[must_use]
pub fn sources(mode: ShadingMode) -> (&'static str, &'static str) {
    match mode {
        ShadingMode::VertexColor => (POINTS_VERTEX, POINTS_FRAGMENT),
        ShadingMode::Flat => (FLAT_VERTEX, FLAT_FRAGMENT),
    }
}
