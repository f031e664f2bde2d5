//! Camera system for 3D scene viewing.
//!
//! The [`Camera`] owns orbit, zoom, and pan state and produces the view
//! matrix. [`Spin`] is a separate world rotation that is composed after the
//! camera matrix and never folded into the camera's own fields.

/// Orbit/zoom/pan camera and its view matrix.
pub mod core;
/// Camera-independent scene spin.
pub mod spin;

pub use self::core::Camera;
pub use self::spin::Spin;
