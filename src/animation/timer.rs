use web_time::{Duration, Instant};

/// Most ticks a single poll reports. One full phase wrap at the default
/// 1° step; anything older is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 360;

/// Fixed-interval tick source polled from the event loop.
///
/// The loop asks for [`deadline`](Self::deadline) to know how long it may
/// sleep, then calls [`poll`](Self::poll) on wake-up to learn how many ticks
/// elapsed. A zero interval disables the timer.
#[derive(Debug, Clone)]
pub struct TickTimer {
    /// Time between ticks.
    interval: Duration,
    /// When the next tick is due.
    next: Instant,
}

impl TickTimer {
    /// Timer whose first tick is due one interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Whether the timer ever fires.
    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// When the next tick is due, or `None` when disabled.
    pub fn deadline(&self) -> Option<Instant> {
        self.is_enabled().then_some(self.next)
    }

    /// Number of whole intervals elapsed up to `now`, at most
    /// [`MAX_CATCH_UP_TICKS`]; advances the deadline past `now` on the
    /// original tick grid.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if !self.is_enabled() || now < self.next {
            return 0;
        }
        let interval = self.interval.as_nanos();
        let behind = now.duration_since(self.next).as_nanos();
        let elapsed = behind / interval + 1;
        let into_interval = Duration::from_nanos((behind % interval) as u64);
        self.next = now + (self.interval - into_interval);

        let ticks = u32::try_from(elapsed)
            .unwrap_or(u32::MAX)
            .min(MAX_CATCH_UP_TICKS);
        if u128::from(ticks) < elapsed {
            log::debug!("timer fell {elapsed} ticks behind; replaying {ticks}");
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn no_tick_before_deadline() {
        let start = Instant::now();
        let mut timer = TickTimer::new(INTERVAL, start);
        assert_eq!(timer.poll(start + Duration::from_millis(99)), 0);
        assert_eq!(timer.deadline(), Some(start + INTERVAL));
    }

    #[test]
    fn one_tick_per_interval() {
        let start = Instant::now();
        let mut timer = TickTimer::new(INTERVAL, start);
        assert_eq!(timer.poll(start + INTERVAL), 1);
        assert_eq!(timer.poll(start + INTERVAL), 0);
        assert_eq!(timer.deadline(), Some(start + INTERVAL * 2));
    }

    #[test]
    fn late_poll_reports_missed_ticks() {
        let start = Instant::now();
        let mut timer = TickTimer::new(INTERVAL, start);
        assert_eq!(timer.poll(start + Duration::from_millis(350)), 3);
        assert_eq!(timer.deadline(), Some(start + Duration::from_millis(400)));
    }

    #[test]
    fn long_stall_is_capped() {
        let start = Instant::now();
        let mut timer = TickTimer::new(INTERVAL, start);
        let wake = start + Duration::from_secs(24 * 60 * 60) + Duration::from_millis(30);
        assert_eq!(timer.poll(wake), MAX_CATCH_UP_TICKS);
        assert_eq!(timer.deadline(), Some(wake + Duration::from_millis(70)));
        assert_eq!(timer.poll(wake + Duration::from_millis(70)), 1);
    }

    #[test]
    fn zero_interval_never_fires() {
        let start = Instant::now();
        let mut timer = TickTimer::new(Duration::ZERO, start);
        assert!(!timer.is_enabled());
        assert_eq!(timer.deadline(), None);
        assert_eq!(timer.poll(start + Duration::from_secs(5)), 0);
    }
}
