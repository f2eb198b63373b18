//! Conway's Game of Life: a B3/S23 grid engine with clamped or toroidal
//! edges, plus the run/pause driver and tick sources that front-ends build on.
//!
//! ```
//! use conway::{EdgePolicy, GridEngine};
//!
//! let mut engine = GridEngine::new(5, 5, EdgePolicy::Wrapped)?;
//! for col in 1..=3 {
//!     engine.toggle(2, col)?;
//! }
//! engine.advance();
//! assert!(engine.cell_state(1, 2)?.is_alive());
//! assert_eq!(engine.generation(), 1);
//! # Ok::<(), conway::LifeError>(())
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod schedule;
pub mod ticker;

pub use config::LifeConfig;
pub use driver::{Driver, Simulation, TickOutcome};
pub use engine::{GridEngine, Transition, next_state};
pub use error::{ConfigError, LifeError, ParseEdgePolicyError, Result};
pub use grid::{Cell, EdgePolicy, Grid};
pub use schedule::TickSchedule;
pub use ticker::Ticker;
