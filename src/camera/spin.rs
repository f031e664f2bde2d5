use glam::Mat4;

/// Secondary world rotation accumulated from secondary-button drags.
///
/// Angles are in degrees and unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    /// Rotation about the Y axis, in degrees.
    pub x: f32,
    /// Rotation about the X axis, in degrees.
    pub y: f32,
}

impl Spin {
    /// Accumulate a drag delta.
    pub fn add(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        log::trace!("spin -> ({}, {})", self.x, self.y);
    }

    /// `RotateY(x) · RotateX(y)`, to be post-multiplied onto the view matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.x.to_radians())
            * Mat4::from_rotation_x(self.y.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn zero_spin_is_identity() {
        assert_eq!(Spin::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn y_rotation_applies_outside_x_rotation() {
        let spin = Spin { x: 90.0, y: 90.0 };
        // RotX(90) takes +Y to +Z, then RotY(90) takes +Z to +X
        let p = spin.matrix().transform_point3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn add_accumulates() {
        let mut spin = Spin::default();
        spin.add(1.5, -2.0);
        spin.add(1.5, 0.5);
        assert_eq!(spin, Spin { x: 3.0, y: -1.5 });
    }
}
