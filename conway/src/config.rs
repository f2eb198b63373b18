// config.rs - Runtime configuration loaded from TOML

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::Simulation;
use crate::engine::GridEngine;
use crate::error::ConfigError;
use crate::grid::{EdgePolicy, Grid};
use crate::schedule::{MAX_SPEED, MIN_SPEED, TickSchedule};

/// Grid size, edge policy and cadence for one run.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// width = 80
/// edge = "clamped"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    pub width: u32,
    pub height: u32,
    pub edge: EdgePolicy,
    /// Pixels per cell side; also the click divisor.
    pub cell_size: u32,
    /// Interval between generations at speed 1.0.
    pub tick_interval_ms: u64,
    pub speed: f64,
    /// Recent generations compared for a repeat. 0 disables.
    pub cycle_history: usize,
    /// Probability that a cell starts alive on a random fill.
    pub random_density: f64,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            edge: EdgePolicy::Wrapped,
            cell_size: 10,
            tick_interval_ms: 100,
            speed: 1.0,
            cycle_history: 10,
            random_density: 1.0 / 3.0,
        }
    }
}

impl LifeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > Grid::MAX_DIM {
                return Err(invalid(field, format!("{value} is not in 1..={}", Grid::MAX_DIM)));
            }
        }
        if self.cell_size == 0 {
            return Err(invalid("cell_size", "must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be at least 1".into()));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            let reason = format!("{} is not in {MIN_SPEED}..={MAX_SPEED}", self.speed);
            return Err(invalid("speed", reason));
        }
        if !(0.0..=1.0).contains(&self.random_density) {
            let reason = format!("{} is not in 0..=1", self.random_density);
            return Err(invalid("random_density", reason));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn build_engine(&self) -> Result<GridEngine, ConfigError> {
        Ok(GridEngine::new(self.width, self.height, self.edge)?)
    }

    pub fn build_simulation(&self) -> Result<Simulation, ConfigError> {
        self.validate()?;
        let mut schedule = TickSchedule::new(self.tick_interval());
        schedule.set_speed(self.speed);
        Ok(Simulation::new(self.build_engine()?, schedule, self.cell_size, self.cycle_history))
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
