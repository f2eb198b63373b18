// ticker.rs - Async periodic tick source

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::driver::{Driver, TickOutcome};
use crate::schedule::TickSchedule;

/// Calls [`Driver::on_tick`] on a fixed period.
///
/// Cancelling is just not rescheduling: each tick runs to completion on the
/// calling task, so there is never an in-flight `advance()` to abort.
#[derive(Clone, Copy, Debug)]
pub struct Ticker {
    period: Duration,
}

impl Ticker {
    /// A zero period is raised to 1ms.
    pub fn new(period: Duration) -> Self {
        Self { period: period.max(Duration::from_millis(1)) }
    }

    pub fn from_schedule(schedule: &TickSchedule) -> Self {
        Self::new(schedule.interval())
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tick `driver` until `limit` ticks have run, `stop` turns `true` (or
    /// its sender is dropped), or the driver stops running on its own.
    /// Returns the number of generations computed.
    pub async fn drive<D>(
        &self,
        driver: &mut D,
        mut stop: watch::Receiver<bool>,
        limit: Option<u64>,
    ) -> u64
    where
        D: Driver + ?Sized,
    {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = 0;

        loop {
            if limit.is_some_and(|limit| ticks >= limit) || *stop.borrow() {
                break;
            }
            tokio::select! {
                _ = interval.tick() => {}
                changed = stop.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }
            match driver.on_tick() {
                TickOutcome::Paused => break,
                TickOutcome::Advanced(_) => ticks += 1,
                TickOutcome::Settled(_) => {
                    ticks += 1;
                    break;
                }
            }
        }

        debug!(ticks, running = driver.is_running(), "ticker finished");
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GridEngine;
    use crate::grid::EdgePolicy;
    use crate::driver::Simulation;

    fn running_sim(cycle_history: usize) -> Simulation {
        let engine = GridEngine::new(8, 8, EdgePolicy::Wrapped).unwrap();
        let schedule = TickSchedule::new(Duration::from_millis(1));
        let mut sim = Simulation::new(engine, schedule, 10, cycle_history);
        sim.on_start_stop();
        sim
    }

    #[tokio::test]
    async fn stops_at_limit() {
        let mut sim = running_sim(0);
        let (_tx, rx) = watch::channel(false);
        let ticks = Ticker::new(Duration::from_millis(1)).drive(&mut sim, rx, Some(5)).await;
        assert_eq!(ticks, 5);
        assert_eq!(sim.engine().generation(), 5);
        assert!(sim.is_running());
    }

    #[tokio::test]
    async fn paused_driver_ends_immediately() {
        let mut sim = running_sim(0);
        sim.on_start_stop();
        let (_tx, rx) = watch::channel(false);
        let ticks = Ticker::new(Duration::from_millis(1)).drive(&mut sim, rx, Some(5)).await;
        assert_eq!(ticks, 0);
        assert_eq!(sim.engine().generation(), 0);
    }

    #[tokio::test]
    async fn stop_flag_already_set() {
        let mut sim = running_sim(0);
        let (_tx, rx) = watch::channel(true);
        let ticks = Ticker::new(Duration::from_millis(1)).drive(&mut sim, rx, None).await;
        assert_eq!(ticks, 0);
    }

    #[tokio::test]
    async fn stop_signal_cancels_run() {
        let mut sim = running_sim(0);
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });
        let ticks = Ticker::new(Duration::from_millis(1)).drive(&mut sim, rx, None).await;
        assert!(ticks >= 1);
        assert_eq!(sim.engine().generation(), ticks);
    }

    #[tokio::test]
    async fn settled_run_ends_early() {
        // All-dead grid repeats immediately.
        let mut sim = running_sim(10);
        let (_tx, rx) = watch::channel(false);
        let ticks = Ticker::new(Duration::from_millis(1)).drive(&mut sim, rx, Some(50)).await;
        assert_eq!(ticks, 1);
        assert!(!sim.is_running());
    }

    #[test]
    fn zero_period_is_raised() {
        assert_eq!(Ticker::new(Duration::ZERO).period(), Duration::from_millis(1));
    }
}
