//! Standalone viewer window backed by winit.
//!
//! Window events are translated into [`InputEvent`]s for the engine; the
//! animation timer is polled from the same loop through
//! `ControlFlow::WaitUntil`, so input and ticks never interleave.
//!
//! ```no_run
//! # use cloudview::Viewer;
//! Viewer::builder()
//!     .with_title("torus")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    animation::TickTimer,
    engine::ViewerEngine,
    error::ViewerError,
    gpu::{render_context::RenderContext, WgpuBackend},
    input::{ButtonMask, EventResponse, InputEvent, MouseButton},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Builder with default options and the title "cloudview".
    fn new() -> Self {
        Self {
            options: None,
            title: "cloudview".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the animated torus and axes.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError`] if the event loop, the GPU context, or the
    /// point program cannot be created.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            timer: None,
            buttons: ButtonMask::NONE,
            options: Some(self.options),
            title: self.title,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine<WgpuBackend>>,
    timer: Option<TickTimer>,
    /// Buttons currently held; winit reports presses separately from moves.
    buttons: ButtonMask,
    options: Option<Options>,
    title: String,
    /// Startup failure reported from [`Viewer::run`].
    error: Option<ViewerError>,
}

fn surface_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn start(&mut self, window: &Arc<Window>) -> Result<(), ViewerError> {
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            surface_size(window.inner_size()),
        ))?;
        let options = self.options.take().unwrap_or_default();
        let engine = ViewerEngine::new(WgpuBackend::new(context), options)?;
        self.timer = Some(TickTimer::new(engine.tick_interval(), Instant::now()));
        self.engine = Some(engine);
        Ok(())
    }

    /// Forward an event and redraw if the engine asks for it.
    fn dispatch(&mut self, event: &InputEvent) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if engine.handle_event(event) == EventResponse::Redraw {
            self.request_redraw();
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let (Some(engine), Some(window)) = (&mut self.engine, &self.window)
        else {
            return;
        };
        match engine.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = surface_size(window.inner_size());
                let _ = engine.handle_event(&InputEvent::Resize { width, height });
                window.request_redraw();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.error = Some(ViewerError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.start(&window) {
            log::error!("failed to initialize viewer: {e}");
            self.error = Some(e);
            event_loop.exit();
            return;
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = surface_size(size);
                self.dispatch(&InputEvent::Resize { width, height });
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.buttons = self
                    .buttons
                    .with(MouseButton::from(button), state == ElementState::Pressed);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(&InputEvent::PointerMove {
                    x: position.x as f32,
                    y: position.y as f32,
                    buttons: self.buttons,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.reset_pointer();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.dispatch(&InputEvent::Wheel { delta_y });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.dispatch(&InputEvent::KeyPress {
                    key: format!("{code:?}"),
                });
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(timer) = &mut self.timer else {
            return;
        };
        let ticks = timer.poll(Instant::now());
        let control_flow = timer
            .deadline()
            .map_or(ControlFlow::Wait, ControlFlow::WaitUntil);
        event_loop.set_control_flow(control_flow);

        for _ in 0..ticks {
            self.dispatch(&InputEvent::TimerTick);
        }
    }
}
