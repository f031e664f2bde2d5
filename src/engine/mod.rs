//! The engine: explicit view state, backend, renderer, and controller
//! behind a single event entry point.
//!
//! The loop owning a [`ViewerEngine`] feeds it [`InputEvent`]s in arrival
//! order and calls [`ViewerEngine::render`] when a redraw is due. Nothing
//! here blocks or spawns; all state is mutated in place between events.

mod state;

pub use state::ViewState;
use web_time::Duration;

use crate::error::ViewerError;
use crate::gpu::GpuBackend;
use crate::input::{EventResponse, InputController, InputEvent};
use crate::options::Options;
use crate::renderer::{FrameRenderer, FrameStats};

/// Point-cloud viewer core, generic over the GPU backend.
pub struct ViewerEngine<B: GpuBackend> {
    backend: B,
    renderer: FrameRenderer,
    controller: InputController,
    state: ViewState,
    options: Options,
}

impl<B: GpuBackend> ViewerEngine<B> {
    /// Compile the point program on `backend` and set up the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Shader`] if the program fails to compile.
    pub fn new(mut backend: B, options: Options) -> Result<Self, ViewerError> {
        let renderer = FrameRenderer::new(&mut backend, options.display.shading)?;
        let controller = InputController::new(
            options.input.clone(),
            options.keybindings.clone(),
        );
        let state = ViewState::from_options(&options);
        let torus = &options.scene.torus;
        if torus.point_count() == 0 {
            log::warn!(
                "torus steps {}°/{}° must be positive and at most {} per turn; \
                 the torus will be empty",
                torus.major_step,
                torus.minor_step,
                crate::geometry::MAX_STEPS_PER_TURN
            );
        }
        log::info!(
            "engine ready: scale {}, torus {} points",
            state.camera.scale(),
            options.scene.torus.point_count()
        );
        Ok(Self {
            backend,
            renderer,
            controller,
            state,
            options,
        })
    }

    /// Process one event.
    ///
    /// Timer ticks advance the torus phases; resizes reach the backend;
    /// everything else goes through the input controller.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        match event {
            InputEvent::TimerTick => {
                let anim = &self.options.animation;
                self.state.phases.advance(anim.phase_a_step, anim.phase_b_step);
                EventResponse::Redraw
            }
            InputEvent::Resize { width, height } => {
                self.backend.resize(*width, *height);
                EventResponse::Redraw
            }
            _ => self.controller.handle_event(&mut self.state, event),
        }
    }

    /// Draw the current state.
    ///
    /// # Errors
    ///
    /// Returns the backend's frame error when presentation fails.
    pub fn render(&mut self) -> Result<FrameStats, B::FrameError> {
        self.renderer.render(
            &mut self.backend,
            &self.state,
            &self.options.scene,
            self.options.display.clear_color,
        )
    }

    /// Forget the pointer baseline (cursor left the window).
    pub fn reset_pointer(&mut self) {
        self.controller.reset(&mut self.state);
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Time between animation ticks; zero disables animation.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.options.animation.tick_interval_ms)
    }

    /// The GPU backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The GPU backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Phases;
    use crate::gpu::{CompileError, GpuCall, ProgramHandle, RecordingBackend};
    use crate::gpu::program::ProgramTable;
    use crate::input::ButtonMask;
    use crate::options::ShadingMode;

    fn engine(options: Options) -> ViewerEngine<RecordingBackend> {
        ViewerEngine::new(RecordingBackend::new(), options).unwrap()
    }

    #[test]
    fn ticks_advance_phases_renders_do_not() {
        let mut engine = engine(Options::default());
        let _ = engine.render().unwrap();
        let _ = engine.render().unwrap();
        assert_eq!(engine.state().phases, Phases::default());

        for _ in 0..3 {
            assert_eq!(engine.handle_event(&InputEvent::TimerTick), EventResponse::Redraw);
        }
        assert_eq!(engine.state().phases, Phases { a: 3.0, b: 9.0 });
    }

    #[test]
    fn resize_reaches_backend() {
        let mut engine = engine(Options::default());
        let _ = engine.handle_event(&InputEvent::Resize { width: 640, height: 480 });
        assert_eq!(engine.backend().calls().last(), Some(&GpuCall::Resize(640, 480)));
    }

    #[test]
    fn tiny_torus_step_from_toml_renders_axes_only() {
        let options = Options::from_toml_str(
            "[scene.torus]\nmajor_step = 1e-30\nminor_step = 1e-30\n",
        )
        .unwrap();
        let mut engine = engine(options);
        let stats = engine.render().unwrap();
        assert_eq!(stats.batches, 4);
        assert_eq!(stats.vertices, 3 * crate::geometry::AXIS_POINT_COUNT);
    }

    #[test]
    fn camera_options_seed_state() {
        let mut options = Options::default();
        options.camera.scale = 2.0;
        options.camera.yaw = 45.0;
        let engine = engine(options);
        assert_eq!(engine.state().camera.scale(), 2.0);
        assert_eq!(engine.state().camera.yaw(), 45.0);
    }

    #[test]
    fn pointer_reset_through_engine() {
        let mut engine = engine(Options::default());
        let drag = |x| InputEvent::PointerMove { x, y: 0.0, buttons: ButtonMask::PRIMARY };
        let _ = engine.handle_event(&drag(0.0));
        engine.reset_pointer();
        assert_eq!(engine.handle_event(&drag(50.0)), EventResponse::Ignored);
        assert_eq!(engine.state().camera.yaw(), 0.0);
    }

    #[test]
    fn render_reports_stats() {
        let mut engine = engine(Options::default());
        let stats = engine.render().unwrap();
        assert_eq!(stats, FrameStats { batches: 4, vertices: 21_600 + 3 * 101 });
    }

    #[test]
    fn flat_shading_option_selects_flat_program() {
        let mut options = Options::default();
        options.display.shading = ShadingMode::Flat;
        let engine = engine(options);
        let program = engine.backend().programs().get(ProgramHandle(0)).unwrap();
        assert_eq!(program.attribute("a_color"), None);
    }

    /// Backend whose compiler always rejects the sources.
    #[derive(Default)]
    struct BrokenCompiler {
        programs: ProgramTable,
    }

    impl GpuBackend for BrokenCompiler {
        type FrameError = std::convert::Infallible;

        fn programs(&self) -> &ProgramTable {
            &self.programs
        }

        fn compile_program(
            &mut self,
            _vertex_source: &str,
            _fragment_source: &str,
        ) -> Result<ProgramHandle, CompileError> {
            Err(CompileError::Link("rejected".into()))
        }

        fn begin_frame(&mut self, _clear: crate::geometry::Color) {}
        fn bind(&mut self, _program: ProgramHandle) {}
        fn release(&mut self) {}
        fn set_uniform_matrix4(&mut self, _: crate::gpu::UniformLocation, _: &glam::Mat4) {}
        fn set_uniform_color(&mut self, _: crate::gpu::UniformLocation, _: crate::geometry::Color) {}
        fn draw_points(&mut self, _draw: crate::gpu::PointDraw<'_>) {}

        fn end_frame(&mut self) -> Result<(), Self::FrameError> {
            Ok(())
        }
    }

    #[test]
    fn compile_failure_aborts_construction() {
        let result = ViewerEngine::new(BrokenCompiler::default(), Options::default());
        assert!(matches!(result, Err(ViewerError::Shader(CompileError::Link(_)))));
    }
}
