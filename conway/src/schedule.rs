// schedule.rs - Poll-style tick cadence for frame-driven front-ends

use std::time::{Duration, Instant};

use tracing::warn;

/// Slowest and fastest accepted speed multipliers.
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 100.0;

/// When the next generation is due.
///
/// The effective interval is `base / speed`. Speed only changes cadence,
/// never the grid.
#[derive(Clone, Debug)]
pub struct TickSchedule {
    base: Duration,
    speed: f64,
    last_tick: Instant,
}

impl TickSchedule {
    pub fn new(base: Duration) -> Self {
        Self { base, speed: 1.0, last_tick: Instant::now() }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current time between ticks, saturating at `Duration::MAX`.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.base.as_secs_f64() / self.speed).unwrap_or(Duration::MAX)
    }

    /// Set the speed multiplier and return the value actually applied.
    ///
    /// Out-of-range requests are clamped to `MIN_SPEED..=MAX_SPEED`; a
    /// non-finite request keeps the current speed.
    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        if !multiplier.is_finite() {
            warn!(multiplier, "ignoring non-finite speed");
            return self.speed;
        }
        let applied = multiplier.clamp(MIN_SPEED, MAX_SPEED);
        if applied != multiplier {
            warn!(requested = multiplier, applied, "speed clamped");
        }
        self.speed = applied;
        applied
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_tick) >= self.interval()
    }

    /// Record that a tick happened at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_tick = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_scales_with_speed() {
        let mut s = TickSchedule::new(Duration::from_millis(100));
        assert_eq!(s.interval(), Duration::from_millis(100));
        s.set_speed(2.0);
        assert_eq!(s.interval(), Duration::from_millis(50));
        s.set_speed(0.5);
        assert_eq!(s.interval(), Duration::from_millis(200));
    }

    #[test]
    fn speed_is_clamped() {
        let mut s = TickSchedule::new(Duration::from_millis(100));
        assert_eq!(s.set_speed(0.0), MIN_SPEED);
        assert_eq!(s.set_speed(1e9), MAX_SPEED);
        assert_eq!(s.set_speed(f64::NAN), MAX_SPEED);
        assert_eq!(s.speed(), MAX_SPEED);
    }

    #[test]
    fn huge_base_saturates_instead_of_panicking() {
        let mut s = TickSchedule::new(Duration::MAX);
        assert_eq!(s.set_speed(0.5), 0.5);
        assert_eq!(s.interval(), Duration::MAX);
        assert!(!s.is_due(Instant::now()));
    }

    #[test]
    fn due_after_interval_elapses() {
        let mut s = TickSchedule::new(Duration::from_millis(100));
        let start = Instant::now();
        s.mark(start);
        assert!(!s.is_due(start + Duration::from_millis(99)));
        assert!(s.is_due(start + Duration::from_millis(100)));
        s.mark(start + Duration::from_millis(100));
        assert!(!s.is_due(start + Duration::from_millis(150)));
        // A clock reading before the last tick is never due.
        assert!(!s.is_due(start));
    }
}
