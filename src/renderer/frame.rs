use glam::Mat4;

use super::shaders;
use crate::animation::Phases;
use crate::engine::ViewState;
use crate::geometry::{axis, torus, Batch, Color};
use crate::gpu::{
    AttribLocation, CompileError, GpuBackend, PointDraw, ProgramHandle,
    UniformLocation,
};
use crate::options::{AxisOptions, SceneOptions, ShadingMode};

/// What one frame submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Batches drawn, including empty ones.
    pub batches: usize,
    /// Points submitted across all batches.
    pub vertices: usize,
}

/// The camera matrix with the spin post-multiplied onto it.
#[must_use]
pub fn frame_matrix(state: &ViewState) -> Mat4 {
    state.camera.matrix() * state.spin.matrix()
}

/// Regenerate every batch from scratch: torus, then X, Y, Z axes.
#[must_use]
pub fn build_batches(scene: &SceneOptions, phases: Phases) -> Vec<Batch> {
    let axis_batch = |label: &'static str, options: &AxisOptions| Batch {
        label,
        color: options.color,
        vertices: axis(options.a.into(), options.b.into(), options.color),
    };
    vec![
        Batch {
            label: "torus",
            color: scene.torus_color,
            vertices: torus(&scene.torus, phases.a, phases.b, scene.torus_color),
        },
        axis_batch("axis x", &scene.axis_x),
        axis_batch("axis y", &scene.axis_y),
        axis_batch("axis z", &scene.axis_z),
    ]
}

/// Owns the point program and its resolved names, and issues the per-batch
/// draw sequence.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    program: ProgramHandle,
    position: AttribLocation,
    color: AttribLocation,
    mvp: UniformLocation,
    tint: UniformLocation,
}

impl FrameRenderer {
    /// Compile the program for `shading` and resolve its names.
    ///
    /// Names the program does not declare resolve to invalid locations. The
    /// flat program has no `a_color`, so its batches get their color from
    /// the uniform instead.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the program fails to compile or link.
    pub fn new<B: GpuBackend>(
        backend: &mut B,
        shading: ShadingMode,
    ) -> Result<Self, CompileError> {
        let (vertex, fragment) = shaders::sources(shading);
        let program = backend.compile_program(vertex, fragment)?;
        let position = backend.attribute_location(program, "a_position");
        let color = backend.attribute_location(program, "a_color");
        let mvp = backend.uniform_location(program, "u_mvp");
        let tint = backend.uniform_location(program, "color");
        log::info!("point program ready ({shading:?})");
        Ok(Self {
            program,
            position,
            color,
            mvp,
            tint,
        })
    }

    /// The compiled program.
    #[must_use]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Whether points carry their own color.
    #[must_use]
    pub fn uses_vertex_color(&self) -> bool {
        self.color.is_valid()
    }

    /// Draw one frame of the current state.
    ///
    /// # Errors
    ///
    /// Returns the backend's frame error when the frame cannot be presented.
    pub fn render<B: GpuBackend>(
        &self,
        backend: &mut B,
        state: &ViewState,
        scene: &SceneOptions,
        clear: Color,
    ) -> Result<FrameStats, B::FrameError> {
        let matrix = frame_matrix(state);
        let batches = build_batches(scene, state.phases);

        backend.begin_frame(clear);
        let mut stats = FrameStats::default();
        for batch in &batches {
            let tint = if self.uses_vertex_color() {
                Color::WHITE
            } else {
                batch.color
            };
            backend.bind(self.program);
            backend.set_uniform_matrix4(self.mvp, &matrix);
            backend.set_uniform_color(self.tint, tint);
            backend.draw_points(PointDraw {
                vertices: &batch.vertices,
                position: self.position,
                color: self.color,
            });
            backend.release();

            stats.batches += 1;
            stats.vertices += batch.len();
        }
        backend.end_frame()?;
        log::debug!(
            "frame: {} batches, {} points",
            stats.batches,
            stats.vertices
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::Spin;
    use crate::geometry::{Vertex, AXIS_POINT_COUNT};
    use crate::gpu::{GpuCall, RecordingBackend};

    const CLEAR: Color = Color::new(0.3, 0.0, 0.3, 1.0);

    fn render_once(shading: ShadingMode, state: &ViewState, scene: &SceneOptions) -> Vec<GpuCall> {
        let mut backend = RecordingBackend::new();
        let renderer = FrameRenderer::new(&mut backend, shading).unwrap();
        let _ = renderer.render(&mut backend, state, scene, CLEAR).unwrap();
        backend.take_calls()
    }

    fn draws(calls: &[GpuCall]) -> Vec<(AttribLocation, &[Vertex])> {
        calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::DrawPoints { color, vertices, .. } => {
                    Some((*color, vertices.as_slice()))
                }
                _ => None,
            })
            .collect()
    }

    fn tints(calls: &[GpuCall]) -> Vec<Color> {
        calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::SetColor(_, color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn batch_sequence_per_frame() {
        let calls = render_once(ShadingMode::VertexColor, &ViewState::default(), &SceneOptions::default());
        assert_eq!(calls.len(), 22);
        assert_eq!(calls[0], GpuCall::BeginFrame(CLEAR));
        assert_eq!(calls[21], GpuCall::EndFrame);
        for batch in calls[1..21].chunks(5) {
            assert!(matches!(batch[0], GpuCall::Bind(_)));
            assert!(matches!(batch[1], GpuCall::SetMatrix(..)));
            assert!(matches!(batch[2], GpuCall::SetColor(..)));
            assert!(matches!(batch[3], GpuCall::DrawPoints { .. }));
            assert_eq!(batch[4], GpuCall::Release);
        }
    }

    #[test]
    fn batches_in_torus_x_y_z_order() {
        let calls = render_once(ShadingMode::VertexColor, &ViewState::default(), &SceneOptions::default());
        let draws = draws(&calls);
        let counts: Vec<usize> = draws.iter().map(|(_, v)| v.len()).collect();
        assert_eq!(counts, [21_600, AXIS_POINT_COUNT, AXIS_POINT_COUNT, AXIS_POINT_COUNT]);
        let colors: Vec<[f32; 4]> = draws.iter().map(|(_, v)| v[0].color).collect();
        assert_eq!(
            colors,
            [Color::YELLOW, Color::RED, Color::GREEN, Color::BLUE].map(Color::to_array)
        );
    }

    #[test]
    fn vertex_color_mode_uses_white_tint() {
        let calls = render_once(ShadingMode::VertexColor, &ViewState::default(), &SceneOptions::default());
        assert_eq!(tints(&calls), [Color::WHITE; 4]);
        assert!(draws(&calls).iter().all(|(color, _)| color.is_valid()));
    }

    #[test]
    fn flat_mode_uploads_batch_colors() {
        let calls = render_once(ShadingMode::Flat, &ViewState::default(), &SceneOptions::default());
        assert_eq!(
            tints(&calls),
            [Color::YELLOW, Color::RED, Color::GREEN, Color::BLUE]
        );
        assert!(draws(&calls).iter().all(|(color, _)| !color.is_valid()));
    }

    #[test]
    fn mvp_is_camera_then_spin() {
        let mut state = ViewState::default();
        state.camera.rotate(20.0, 35.0);
        state.spin = Spin { x: 15.0, y: -40.0 };
        let expected = state.camera.matrix()
            * Mat4::from_rotation_y(15f32.to_radians())
            * Mat4::from_rotation_x((-40f32).to_radians());
        assert!(frame_matrix(&state).abs_diff_eq(expected, 1e-5));

        let calls = render_once(ShadingMode::VertexColor, &state, &SceneOptions::default());
        let uploaded: Vec<Mat4> = calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::SetMatrix(_, m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(uploaded, [frame_matrix(&state); 4]);
    }

    #[test]
    fn empty_torus_still_draws_axes() {
        let mut scene = SceneOptions::default();
        scene.torus.major_step = 0.0;
        let mut backend = RecordingBackend::new();
        let renderer = FrameRenderer::new(&mut backend, ShadingMode::VertexColor).unwrap();
        let stats = renderer
            .render(&mut backend, &ViewState::default(), &scene, CLEAR)
            .unwrap();
        assert_eq!(stats, FrameStats { batches: 4, vertices: 3 * AXIS_POINT_COUNT });
        assert!(draws(backend.calls())[0].1.is_empty());
    }

    #[test]
    fn redraw_without_tick_is_identical() {
        let state = ViewState::default();
        let scene = SceneOptions::default();
        let mut backend = RecordingBackend::new();
        let renderer = FrameRenderer::new(&mut backend, ShadingMode::VertexColor).unwrap();
        let _ = renderer.render(&mut backend, &state, &scene, CLEAR).unwrap();
        let first = backend.take_calls();
        let _ = renderer.render(&mut backend, &state, &scene, CLEAR).unwrap();
        assert_eq!(first, backend.take_calls());
    }

    #[test]
    fn phases_feed_the_torus_only() {
        let scene = SceneOptions::default();
        let still = build_batches(&scene, Phases::default());
        let moved = build_batches(&scene, Phases { a: 1.0, b: 3.0 });
        assert_ne!(still[0], moved[0]);
        assert_eq!(still[1..], moved[1..]);
        assert_eq!(moved[1].vertices[0].pos(), Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(moved[1].vertices[100].pos(), Vec3::new(-50.0, 0.0, 0.0));
    }
}
