use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `0.0..=1.0`.
///
/// Serializes as a 4-element array so options files stay compact:
/// ```toml
/// torus_color = [1.0, 1.0, 0.0, 1.0]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Opaque white; the neutral tint when vertex colors carry the shading.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red (X axis).
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green (Y axis).
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue (Z axis).
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow (torus).
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);

    /// Color from float components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Components as `[r, g, b, a]`.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<Color> for wgpu::Color {
    fn from(color: Color) -> Self {
        Self {
            r: f64::from(color.r),
            g: f64::from(color.g),
            b: f64::from(color.b),
            a: f64::from(color.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_conversion_keeps_channel_order() {
        let c = Color::from([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(c.g, 0.2);
        assert_eq!(<[f32; 4]>::from(c), [0.1, 0.2, 0.3, 0.4]);
    }
}
