use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::{normalize_or_self, Color, Vertex};

/// Most samples a single turn may take (a 0.1° step).
pub const MAX_STEPS_PER_TURN: usize = 3600;

/// Shape and sampling density of the torus point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusParams {
    /// Ring radius: distance from the origin to the inner edge of the tube.
    pub major_radius: f32,
    /// Tube radius.
    pub minor_radius: f32,
    /// Angular step around the ring, in degrees.
    pub major_step: f32,
    /// Angular step around the tube, in degrees.
    pub minor_step: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            major_radius: 40.0,
            minor_radius: 0.05,
            major_step: 1.0,
            minor_step: 6.0,
        }
    }
}

impl TorusParams {
    /// Number of points [`torus`] emits for these parameters.
    #[must_use]
    pub fn point_count(&self) -> usize {
        step_count(self.major_step)
            .checked_mul(step_count(self.minor_step))
            .unwrap_or(0)
    }
}

/// Samples in a full turn for the given angular step; zero for a
/// non-positive or non-finite step, or one finer than
/// [`MAX_STEPS_PER_TURN`] allows.
fn step_count(step: f32) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let steps = (360.0 / step).round();
    if steps > MAX_STEPS_PER_TURN as f32 {
        0
    } else {
        steps as usize
    }
}

/// Sample a torus as a point cloud.
///
/// Each ring sample rotates about Z by `i * major_step + phase_a` degrees and
/// moves out along the local X axis by `major_radius + minor_radius`. Each
/// tube sample then rotates about the local Y axis by
/// `j * minor_step + phase_b` degrees and emits an offset of length
/// `minor_radius` pointing back toward the ring center. With
/// `minor_radius == 0` every point lies at distance `major_radius` from the
/// origin.
#[must_use]
pub fn torus(
    params: &TorusParams,
    phase_a: f32,
    phase_b: f32,
    color: Color,
) -> Vec<Vertex> {
    let major_steps = step_count(params.major_step);
    let minor_steps = step_count(params.minor_step);

    let ring = Vec3::X * (params.major_radius + params.minor_radius);
    let tube_offset = normalize_or_self(-ring) * params.minor_radius;

    let mut vertices = Vec::with_capacity(major_steps * minor_steps);
    for i in 0..major_steps {
        let major_angle = (i as f32 * params.major_step + phase_a).to_radians();
        let ring_frame = Mat4::from_rotation_z(major_angle)
            * Mat4::from_translation(ring);
        for j in 0..minor_steps {
            let minor_angle =
                (j as f32 * params.minor_step + phase_b).to_radians();
            let m = ring_frame * Mat4::from_rotation_y(minor_angle);
            vertices.push(Vertex::new(m.transform_point3(tube_offset), color));
        }
    }
    vertices
}
