//! Per-frame rendering: batch generation and the draw sequence issued to a
//! [`GpuBackend`](crate::gpu::GpuBackend).

/// Frame renderer and batch builder.
pub mod frame;
/// Bundled WGSL sources.
pub mod shaders;

pub use frame::{build_batches, frame_matrix, FrameRenderer, FrameStats};
