/// Ring and tube phase angles of the torus, in degrees within `[0, 360)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Phases {
    /// Offset added to every ring (major) angle.
    pub a: f32,
    /// Offset added to every tube (minor) angle.
    pub b: f32,
}

impl Phases {
    /// Advance both phases by one tick's increment.
    ///
    /// The result is wrapped into `[0, 360)`; the torus samples are
    /// periodic in both angles so wrapping only bounds float drift.
    pub fn advance(&mut self, step_a: f32, step_b: f32) {
        self.a = (self.a + step_a).rem_euclid(360.0);
        self.b = (self.b + step_b).rem_euclid(360.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_fixed_steps() {
        let mut phases = Phases::default();
        phases.advance(1.0, 3.0);
        phases.advance(1.0, 3.0);
        assert_eq!(phases, Phases { a: 2.0, b: 6.0 });
    }

    #[test]
    fn advance_wraps_both_directions() {
        let mut phases = Phases { a: 359.0, b: 1.0 };
        phases.advance(2.0, -3.0);
        assert_eq!(phases, Phases { a: 1.0, b: 358.0 });
    }
}
