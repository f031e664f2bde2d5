//! GPU abstraction and its implementations.
//!
//! [`GpuBackend`] is the capability set the frame renderer draws through.
//! [`WgpuBackend`] drives a real window surface; [`RecordingBackend`] runs
//! headless and records calls for tests and tooling.

/// The backend trait, program handles, and draw descriptors.
pub mod backend;
/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Call-recording backend with no GPU.
pub mod headless;
/// WGSL compilation, validation, and name reflection.
pub mod program;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;
/// Backend on a wgpu window surface.
pub mod wgpu_backend;

pub use backend::{
    AttribLocation, GpuBackend, PointDraw, ProgramHandle, UniformLocation,
};
pub use headless::{GpuCall, RecordingBackend};
pub use program::{CompileError, ShaderStage};
pub use wgpu_backend::WgpuBackend;
