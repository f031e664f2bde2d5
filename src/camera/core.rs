use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;

/// Smallest scale zooming out can reach.
pub const MIN_SCALE: f32 = 1e-6;
/// Largest scale zooming in can reach.
pub const MAX_SCALE: f32 = 1e6;

/// Orbit/zoom/pan camera with a fixed transform composition order.
///
/// Angles are in degrees and deliberately unbounded; they wrap through the
/// trigonometric functions used when building the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Rotation about the view (Z) axis, in degrees.
    yaw: f32,
    /// Rotation about the horizontal (X) axis, in degrees.
    pitch: f32,
    /// Camera position; the view translates by its negation.
    position: Vec3,
    /// Uniform scale factor, within `[MIN_SCALE, MAX_SCALE]`.
    scale: f32,
    /// Multiplier applied by [`zoom_in`](Self::zoom_in), always > 0.
    zoom_factor: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position: Vec3::new(0.0, 0.0, -0.7),
            scale: 0.3,
            zoom_factor: 1.2,
        }
    }
}

impl Camera {
    /// Camera initialised from configuration.
    ///
    /// A non-positive (or non-finite) scale or zoom factor is replaced by the
    /// default; the scale is then clamped to `[MIN_SCALE, MAX_SCALE]`.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let defaults = Self::default();
        let scale = positive_or(options.scale, defaults.scale, "scale")
            .clamp(MIN_SCALE, MAX_SCALE);
        let zoom_factor =
            positive_or(options.zoom_factor, defaults.zoom_factor, "zoom_factor");
        Self {
            yaw: options.yaw,
            pitch: options.pitch,
            position: Vec3::from_array(options.position),
            scale,
            zoom_factor,
        }
    }

    /// Current yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scale up by the zoom factor, stopping at [`MAX_SCALE`].
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * self.zoom_factor).min(MAX_SCALE);
        log::trace!("zoom in -> scale {}", self.scale);
    }

    /// Scale down by the zoom factor, stopping at [`MIN_SCALE`].
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / self.zoom_factor).max(MIN_SCALE);
        log::trace!("zoom out -> scale {}", self.scale);
    }

    /// Add to yaw and pitch. No clamping.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        log::trace!("rotate -> yaw {} pitch {}", self.yaw, self.pitch);
    }

    /// Strafe along the camera's local X direction.
    pub fn move_x(&mut self, dist: f32) {
        self.translate_local(Vec2::new(dist, 0.0));
    }

    /// Move along the camera's local Y direction.
    pub fn move_y(&mut self, dist: f32) {
        self.translate_local(Vec2::new(0.0, dist));
    }

    /// Rotate a planar step by the current yaw and add it to the position.
    fn translate_local(&mut self, step: Vec2) {
        let heading = Vec2::from_angle(self.yaw.to_radians());
        let world = heading.rotate(step);
        self.position.x += world.x;
        self.position.y += world.y;
        log::trace!("move -> position {}", self.position);
    }

    /// View matrix:
    /// `Scale(scale) · RotateX(pitch) · RotateZ(-yaw) · Translate(-position)`.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale))
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_z((-self.yaw).to_radians())
            * Mat4::from_translation(-self.position)
    }
}

fn positive_or(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("camera {name} must be positive, got {value}; using {fallback}");
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn rot_x(deg: f32) -> Mat4 {
        Mat4::from_rotation_x(deg.to_radians())
    }

    fn rot_z(deg: f32) -> Mat4 {
        Mat4::from_rotation_z(deg.to_radians())
    }

    #[test]
    fn default_state() {
        let cam = Camera::default();
        assert_eq!(cam.scale(), 0.3);
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, -0.7));
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn zoom_pair_restores_scale() {
        for scale in [0.3, 1.0, 1e-3, 250.0] {
            let mut cam = Camera::from_options(&CameraOptions {
                scale,
                ..CameraOptions::default()
            });
            cam.zoom_in();
            assert!((cam.scale() - scale * 1.2).abs() <= scale * 1e-6);
            cam.zoom_out();
            assert!((cam.scale() - scale).abs() <= scale * 1e-6);
        }
    }

    #[test]
    fn zoom_in_saturates_and_recovers() {
        let mut cam = Camera::default();
        for _ in 0..1000 {
            cam.zoom_in();
        }
        assert_eq!(cam.scale(), MAX_SCALE);
        assert!(cam.matrix().is_finite());
        cam.zoom_out();
        assert!((cam.scale() - MAX_SCALE / 1.2).abs() <= MAX_SCALE * 1e-6);
    }

    #[test]
    fn zoom_out_saturates_and_recovers() {
        let mut cam = Camera::default();
        for _ in 0..1000 {
            cam.zoom_out();
        }
        assert_eq!(cam.scale(), MIN_SCALE);
        assert!(cam.matrix().is_finite());
        cam.zoom_in();
        assert!((cam.scale() - MIN_SCALE * 1.2).abs() <= MIN_SCALE * 1e-6);
        for _ in 0..1000 {
            cam.zoom_in();
        }
        assert_eq!(cam.scale(), MAX_SCALE);
    }

    #[test]
    fn configured_scale_is_clamped() {
        let huge = Camera::from_options(&CameraOptions {
            scale: 1e30,
            ..CameraOptions::default()
        });
        assert_eq!(huge.scale(), MAX_SCALE);
        let tiny = Camera::from_options(&CameraOptions {
            scale: 1e-30,
            ..CameraOptions::default()
        });
        assert_eq!(tiny.scale(), MIN_SCALE);
    }

    #[test]
    fn default_matrix() {
        let expected = Mat4::from_scale(Vec3::splat(0.3))
            * Mat4::from_translation(Vec3::new(0.0, 0.0, 0.7));
        assert!(Camera::default().matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn rotate_then_matrix() {
        let mut cam = Camera::default();
        cam.rotate(10.0, -5.0);
        let expected = Mat4::from_scale(Vec3::splat(0.3))
            * rot_x(-5.0)
            * rot_z(-10.0)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, 0.7));
        assert!(cam.matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn matrix_order_is_scale_pitch_yaw_translate() {
        let mut cam = Camera::default();
        cam.rotate(33.0, 71.0);
        cam.move_x(1.5);
        cam.move_y(-0.25);
        cam.zoom_in();
        let expected = Mat4::from_scale(Vec3::splat(cam.scale()))
            * rot_x(cam.pitch())
            * rot_z(-cam.yaw())
            * Mat4::from_translation(-cam.position());
        assert!(cam.matrix().abs_diff_eq(expected, EPS));

        let swapped = Mat4::from_scale(Vec3::splat(cam.scale()))
            * rot_z(-cam.yaw())
            * rot_x(cam.pitch())
            * Mat4::from_translation(-cam.position());
        assert!(!cam.matrix().abs_diff_eq(swapped, EPS));
    }

    #[test]
    fn full_turn_wraps() {
        let mut cam = Camera::default();
        cam.rotate(360.0, -720.0);
        assert!(cam.matrix().abs_diff_eq(Camera::default().matrix(), 1e-4));
    }

    #[test]
    fn move_without_yaw_is_world_aligned() {
        let mut cam = Camera::default();
        cam.move_x(0.25);
        cam.move_y(-0.5);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.25, -0.5, -0.7), EPS));
    }

    #[test]
    fn move_is_heading_relative() {
        let mut cam = Camera::default();
        cam.rotate(90.0, 0.0);
        cam.move_x(1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 1.0, -0.7), EPS));
        cam.move_y(1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(-1.0, 1.0, -0.7), EPS));
    }

    #[test]
    fn move_is_linear() {
        for yaw in [0.0, 37.0, -145.0, 400.0] {
            let mut split = Camera::default();
            split.rotate(yaw, 0.0);
            let mut single = split.clone();
            split.move_x(0.75);
            split.move_x(-2.0);
            single.move_x(0.75 - 2.0);
            assert!(split.position().abs_diff_eq(single.position(), EPS));

            split.move_y(0.3);
            split.move_y(0.9);
            single.move_y(1.2);
            assert!(split.position().abs_diff_eq(single.position(), EPS));
        }
    }

    #[test]
    fn moves_leave_z_untouched() {
        let mut cam = Camera::default();
        cam.rotate(12.0, 80.0);
        cam.move_x(3.0);
        cam.move_y(-4.0);
        assert_eq!(cam.position().z, -0.7);
    }

    #[test]
    fn invalid_options_fall_back_to_defaults() {
        let cam = Camera::from_options(&CameraOptions {
            scale: -1.0,
            zoom_factor: 0.0,
            ..CameraOptions::default()
        });
        assert_eq!(cam.scale(), 0.3);
        let mut zoomed = cam.clone();
        zoomed.zoom_in();
        assert!((zoomed.scale() - 0.36).abs() < EPS);
    }
}
