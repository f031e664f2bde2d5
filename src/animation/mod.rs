//! Timer-driven torus animation.
//!
//! [`Phases`] holds the two angles fed to the torus generator;
//! [`TickTimer`] decides when the event loop should emit a tick.

mod phase;
mod timer;

pub use phase::Phases;
pub use timer::{TickTimer, MAX_CATCH_UP_TICKS};
