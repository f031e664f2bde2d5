use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Timer-driven torus animation.
pub struct AnimationOptions {
    /// Interval between timer ticks, in milliseconds (0 disables the timer).
    pub tick_interval_ms: u64,
    /// Degrees added to the ring phase per tick.
    pub phase_a_step: f32,
    /// Degrees added to the tube phase per tick.
    pub phase_b_step: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            phase_a_step: 1.0,
            phase_b_step: 3.0,
        }
    }
}
