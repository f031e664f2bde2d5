//! Backend that records calls instead of touching a GPU.
//!
//! Programs still go through full WGSL compilation, so name resolution and
//! compile errors behave exactly as they do on the wgpu backend.

use std::convert::Infallible;

use glam::Mat4;

use super::backend::{
    AttribLocation, GpuBackend, PointDraw, ProgramHandle, UniformLocation,
};
use super::program::{CompileError, CompiledProgram, ProgramTable, UniformValue};
use crate::geometry::{Color, Vertex};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    /// Frame started with this clear color.
    BeginFrame(Color),
    /// Program bound.
    Bind(ProgramHandle),
    /// Program released.
    Release,
    /// Matrix uniform upload.
    SetMatrix(UniformLocation, Mat4),
    /// Color uniform upload.
    SetColor(UniformLocation, Color),
    /// Point draw, with the vertices copied out.
    DrawPoints {
        /// Program bound at draw time.
        program: Option<ProgramHandle>,
        /// Position attribute location.
        position: AttribLocation,
        /// Color attribute location.
        color: AttribLocation,
        /// Drawn vertices.
        vertices: Vec<Vertex>,
    },
    /// Frame finished.
    EndFrame,
    /// Drawable resized.
    Resize(u32, u32),
}

/// Headless [`GpuBackend`] that keeps a log of every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    programs: ProgramTable,
    calls: Vec<GpuCall>,
}

impl RecordingBackend {
    /// Empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> &[GpuCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<GpuCall> {
        std::mem::take(&mut self.calls)
    }
}

impl GpuBackend for RecordingBackend {
    type FrameError = Infallible;

    fn programs(&self) -> &ProgramTable {
        &self.programs
    }

    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, CompileError> {
        let program = CompiledProgram::compile(vertex_source, fragment_source)?;
        Ok(self.programs.insert(program))
    }

    fn begin_frame(&mut self, clear: Color) {
        self.calls.push(GpuCall::BeginFrame(clear));
    }

    fn bind(&mut self, program: ProgramHandle) {
        let _ = self.programs.bind(program);
        self.calls.push(GpuCall::Bind(program));
    }

    fn release(&mut self) {
        self.programs.release();
        self.calls.push(GpuCall::Release);
    }

    fn set_uniform_matrix4(&mut self, location: UniformLocation, matrix: &Mat4) {
        let _ = self
            .programs
            .set_uniform(location, UniformValue::Mat4(*matrix));
        self.calls.push(GpuCall::SetMatrix(location, *matrix));
    }

    fn set_uniform_color(&mut self, location: UniformLocation, color: Color) {
        let _ = self.programs.set_uniform(location, UniformValue::Color(color));
        self.calls.push(GpuCall::SetColor(location, color));
    }

    fn draw_points(&mut self, draw: PointDraw<'_>) {
        self.calls.push(GpuCall::DrawPoints {
            program: self.programs.bound(),
            position: draw.position,
            color: draw.color,
            vertices: draw.vertices.to_vec(),
        });
    }

    fn end_frame(&mut self) -> Result<(), Infallible> {
        self.calls.push(GpuCall::EndFrame);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(GpuCall::Resize(width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shaders;

    #[test]
    fn compile_failure_registers_nothing() {
        let mut backend = RecordingBackend::new();
        assert!(backend.compile_program("fn", shaders::FLAT_FRAGMENT).is_err());
        assert!(backend.programs().is_empty());
    }

    #[test]
    fn uniform_state_follows_binding() {
        let mut backend = RecordingBackend::new();
        let program = backend
            .compile_program(shaders::FLAT_VERTEX, shaders::FLAT_FRAGMENT)
            .unwrap();
        let color = backend.uniform_location(program, "color");

        backend.bind(program);
        backend.set_uniform_color(color, Color::GREEN);
        backend.release();
        assert_eq!(
            backend.programs().uniform_value(program, 1),
            Some(UniformValue::Color(Color::GREEN))
        );
        assert_eq!(backend.programs().bound(), None);
        assert_eq!(backend.calls().len(), 3);
    }
}
