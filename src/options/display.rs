use serde::{Deserialize, Serialize};

use crate::geometry::Color;

/// Which shader program the points are drawn with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Per-vertex color attribute modulated by a uniform tint.
    #[default]
    VertexColor,
    /// A single uniform color per batch; no color attribute.
    Flat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and shading options.
pub struct DisplayOptions {
    /// Shader program selection.
    pub shading: ShadingMode,
    /// Framebuffer clear color.
    pub clear_color: Color,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            shading: ShadingMode::VertexColor,
            clear_color: Color::new(0.3, 0.0, 0.3, 1.0),
        }
    }
}
