// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive point-cloud viewer: a procedurally generated torus and three
//! coordinate axes, drawn as colored points and driven by pointer, wheel,
//! keyboard and timer input.
//!
//! # Key entry points
//!
//! - [`engine::ViewerEngine`] - the event and render core, generic over the
//!   GPU backend
//! - [`camera::Camera`] - orbit/zoom/pan state and its view matrix
//! - [`geometry`] - the pure torus and axis generators
//! - [`options::Options`] - TOML-backed configuration
//! - `Viewer` - the winit window (feature `viewer`)
//!
//! # Architecture
//!
//! One loop owns a [`engine::ViewState`] and feeds events to the engine in
//! arrival order. The [`input::InputController`] mutates the camera and spin;
//! timer ticks advance the torus phases. Each redraw rebuilds every batch from
//! the current state and issues `bind → set uniforms → draw → release` per
//! batch through a [`gpu::GpuBackend`]: either [`gpu::WgpuBackend`] on a
//! window surface, or the headless [`gpu::RecordingBackend`].

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
#[cfg(feature = "viewer")]
mod viewer;

pub use engine::{ViewState, ViewerEngine};
pub use error::ViewerError;
pub use input::{EventResponse, InputEvent};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
