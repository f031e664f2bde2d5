//! The GPU-backend contract the frame renderer draws through.
//!
//! Programs are compiled from a vertex and a fragment WGSL source and then
//! addressed through opaque handles. Attribute and uniform names are
//! resolved by string lookup; an unresolved name yields an invalid handle
//! and every operation on an invalid handle is a no-op.

use glam::Mat4;

use super::program::{CompileError, ProgramTable};
use crate::geometry::{Color, Vertex};

/// Opaque handle to a compiled program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub(crate) usize);

/// Resolved vertex attribute location (shader `@location`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribLocation(Option<u32>);

impl AttribLocation {
    /// The handle returned for names the program does not declare.
    pub const INVALID: Self = Self(None);

    pub(crate) const fn new(location: u32) -> Self {
        Self(Some(location))
    }

    /// Whether the name resolved.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0.is_some()
    }

    /// The shader location, if resolved.
    #[must_use]
    pub fn index(self) -> Option<u32> {
        self.0
    }
}

/// Resolved uniform location (bind group 0 `@binding`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(Option<u32>);

impl UniformLocation {
    /// The handle returned for names the program does not declare.
    pub const INVALID: Self = Self(None);

    pub(crate) const fn new(binding: u32) -> Self {
        Self(Some(binding))
    }

    /// Whether the name resolved.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0.is_some()
    }

    /// The binding index, if resolved.
    #[must_use]
    pub fn index(self) -> Option<u32> {
        self.0
    }
}

/// One point-list draw: the vertices plus where to feed each attribute.
///
/// Attribute bindings only live for the duration of the draw call.
#[derive(Debug, Clone, Copy)]
pub struct PointDraw<'a> {
    /// Points to draw; an empty slice is a no-op draw.
    pub vertices: &'a [Vertex],
    /// Location receiving [`Vertex::position`].
    pub position: AttribLocation,
    /// Location receiving [`Vertex::color`]; invalid when the program has
    /// no color attribute.
    pub color: AttribLocation,
}

/// Capability set `{compile, bind, set uniform, draw}` behind which concrete
/// GPU bindings live.
///
/// Calls within a frame are bracketed by [`begin_frame`](Self::begin_frame)
/// and [`end_frame`](Self::end_frame). Uniform values are program state:
/// they persist across bind/release until overwritten.
pub trait GpuBackend {
    /// Failure reported when a finished frame cannot be presented.
    type FrameError: std::error::Error;

    /// Compiled programs and their bind/uniform state.
    fn programs(&self) -> &ProgramTable;

    /// Compile and link a program from WGSL sources.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on a syntax, validation, or link failure.
    fn compile_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, CompileError>;

    /// Resolve a vertex attribute by name.
    fn attribute_location(
        &self,
        program: ProgramHandle,
        name: &str,
    ) -> AttribLocation {
        self.programs().attribute_location(program, name)
    }

    /// Resolve a uniform by name.
    fn uniform_location(
        &self,
        program: ProgramHandle,
        name: &str,
    ) -> UniformLocation {
        self.programs().uniform_location(program, name)
    }

    /// Start a frame cleared to `clear`.
    fn begin_frame(&mut self, clear: Color);

    /// Make `program` the target of uniform uploads and draws.
    fn bind(&mut self, program: ProgramHandle);

    /// Unbind the current program.
    fn release(&mut self);

    /// Upload a 4×4 matrix uniform to the bound program.
    fn set_uniform_matrix4(&mut self, location: UniformLocation, matrix: &Mat4);

    /// Upload an RGBA uniform to the bound program.
    fn set_uniform_color(&mut self, location: UniformLocation, color: Color);

    /// Draw points with the bound program.
    fn draw_points(&mut self, draw: PointDraw<'_>);

    /// Finish and present the frame.
    ///
    /// # Errors
    ///
    /// Returns the backend's frame error when presentation fails.
    fn end_frame(&mut self) -> Result<(), Self::FrameError>;

    /// Drawable area changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}
