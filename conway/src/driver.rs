// driver.rs - Run/pause control layer between a front-end and the engine

use std::collections::VecDeque;
use std::time::Instant;

use tracing::info;

use crate::engine::{GridEngine, Transition};
use crate::error::Result;
use crate::grid::Cell;
use crate::schedule::TickSchedule;

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; the engine was not touched.
    Paused,
    /// One generation was computed.
    Advanced(Transition),
    /// One generation was computed and it repeats a recent one, so the run
    /// was stopped.
    ///
    /// Pausing keeps the history, so starting a settled run again without
    /// an edit settles on the very next tick.
    Settled(Transition),
}

/// Event surface any front-end drives.
///
/// The driver owns the running flag and cadence; the engine stays a pure
/// state holder.
pub trait Driver {
    fn on_tick(&mut self) -> TickOutcome;

    /// Toggle a cell while paused. Returns `Ok(None)` when the click was
    /// ignored because the simulation is running.
    fn on_cell_click(&mut self, row: i32, col: i32) -> Result<Option<Cell>>;

    /// Flip run/pause and return the new running state.
    fn on_start_stop(&mut self) -> bool;

    fn is_running(&self) -> bool;
}

/// Bounded set of recent grid fingerprints.
#[derive(Clone, Debug)]
struct History {
    hashes: VecDeque<u64>,
    capacity: usize,
}

impl History {
    fn new(capacity: usize) -> Self {
        Self { hashes: VecDeque::with_capacity(capacity), capacity }
    }

    /// Record `hash`; `true` if it was already present.
    fn observe(&mut self, hash: u64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.hashes.contains(&hash) {
            return true;
        }
        if self.hashes.len() == self.capacity {
            self.hashes.pop_front();
        }
        self.hashes.push_back(hash);
        false
    }

    fn clear(&mut self) {
        self.hashes.clear();
    }
}

/// Default [`Driver`]: a [`GridEngine`] plus run state, cadence, the pixel
/// to cell mapping and repeat detection.
#[derive(Clone, Debug)]
pub struct Simulation {
    engine: GridEngine,
    running: bool,
    schedule: TickSchedule,
    cell_size: u32,
    history: History,
}

impl Simulation {
    /// `cell_size` is the pixel divisor for `on_pixel_click` (0 is read as
    /// 1). `cycle_history` is how many recent generations are checked for a
    /// repeat; 0 disables the check.
    pub fn new(
        engine: GridEngine,
        schedule: TickSchedule,
        cell_size: u32,
        cycle_history: usize,
    ) -> Self {
        Self {
            engine,
            running: false,
            schedule,
            cell_size: cell_size.max(1),
            history: History::new(cycle_history),
        }
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Map a click in pixels to a cell and toggle it (while paused).
    ///
    /// Uses floor division, so pixels left of or above the grid land on
    /// negative coordinates and come back as `OutOfBounds`.
    pub fn on_pixel_click(&mut self, x: i32, y: i32) -> Result<Option<Cell>> {
        let size = i64::from(self.cell_size);
        let row = i64::from(y).div_euclid(size) as i32;
        let col = i64::from(x).div_euclid(size) as i32;
        self.on_cell_click(row, col)
    }

    /// Change cadence only. Returns the multiplier actually applied.
    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        self.schedule.set_speed(multiplier)
    }

    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            info!(generation = self.engine.generation(), "simulation paused");
        }
    }

    /// Stop, kill every cell and rewind to generation 0.
    pub fn clear(&mut self) {
        self.pause();
        self.engine.reset();
        self.history.clear();
    }

    /// Stop and refill the grid at random; see [`GridEngine::randomize`].
    pub fn randomize(&mut self, seed: u64, density: f64) {
        self.pause();
        self.engine.randomize(seed, density);
        self.history.clear();
    }

    /// Tick if running and the schedule says a generation is due.
    pub fn tick_if_due(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.running || !self.schedule.is_due(now) {
            return None;
        }
        self.schedule.mark(now);
        Some(self.on_tick())
    }
}

impl Driver for Simulation {
    fn on_tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Paused;
        }
        let transition = self.engine.advance();
        if self.history.observe(self.engine.fingerprint()) {
            self.running = false;
            info!(
                generation = transition.generation,
                population = transition.population,
                "pattern repeats, simulation stopped"
            );
            return TickOutcome::Settled(transition);
        }
        TickOutcome::Advanced(transition)
    }

    fn on_cell_click(&mut self, row: i32, col: i32) -> Result<Option<Cell>> {
        if self.running {
            return Ok(None);
        }
        let cell = self.engine.toggle(row, col)?;
        self.history.clear();
        Ok(Some(cell))
    }

    fn on_start_stop(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.running = true;
            self.schedule.mark(Instant::now());
            self.history.observe(self.engine.fingerprint());
            info!(generation = self.engine.generation(), "simulation started");
        }
        self.running
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
