// engine.rs - Generation-advance engine for Conway's Game of Life (B3/S23)

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::Result;
use crate::grid::{Cell, EdgePolicy, Grid};

/// The 8 neighbor offsets as `(d_row, d_col)`.
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Classic Game of Life transition for one cell.
#[rustfmt::skip]
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    match (cell, neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Dead, 3)                     => Cell::Alive, // Birth
        _                                   => Cell::Dead,  // Death or stays dead
    }
}

/// Summary of one completed `advance()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Generation number after the step.
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Owns the live grid and steps it one generation at a time.
///
/// Every next state is computed from the same snapshot: `advance` writes
/// into a second buffer and swaps it in once the whole grid is done.
#[derive(Clone, Debug)]
pub struct GridEngine {
    current: Grid,
    next: Grid,
    edge: EdgePolicy,
    generation: u64,
}

impl GridEngine {
    /// All-dead engine at generation 0.
    ///
    /// Fails with `InvalidDimensions` when either side is zero or too large
    /// for `i32` coordinates.
    pub fn new(width: u32, height: u32, edge: EdgePolicy) -> Result<Self> {
        let current = Grid::new(width, height)?;
        let next = current.clone();
        debug!(width, height, %edge, "grid engine created");
        Ok(Self { current, next, edge, generation: 0 })
    }

    /// Live neighbors of `(row, col)` under the configured edge policy.
    ///
    /// The center must be on the grid; only the neighbors go through the
    /// edge policy.
    pub fn neighbor_count(&self, row: i32, col: i32) -> Result<u8> {
        self.current.get(row, col)?;
        Ok(self.count_neighbors(row as u32, col as u32))
    }

    fn count_neighbors(&self, row: u32, col: u32) -> u8 {
        let (width, height) = self.current.dimensions();
        let mut count = 0;
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let r = self.edge.resolve(i64::from(row) + dr, height);
            let c = self.edge.resolve(i64::from(col) + dc, width);
            if let (Some(r), Some(c)) = (r, c) {
                if self.current.at(r, c).is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Replace the grid with its next generation and bump the counter.
    pub fn advance(&mut self) -> Transition {
        let (width, height) = self.current.dimensions();
        let mut births = 0;
        let mut deaths = 0;

        for row in 0..height {
            for col in 0..width {
                let cell = self.current.at(row, col);
                let next = next_state(cell, self.count_neighbors(row, col));
                match (cell, next) {
                    (Cell::Dead, Cell::Alive) => births += 1,
                    (Cell::Alive, Cell::Dead) => deaths += 1,
                    _ => {}
                }
                self.next.put(row, col, next);
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        let transition = Transition {
            generation: self.generation,
            births,
            deaths,
            population: self.current.population(),
        };
        trace!(
            generation = transition.generation,
            births,
            deaths,
            population = transition.population,
            "advanced"
        );
        transition
    }

    /// Flip one cell and return its new state. Generation is unchanged.
    pub fn toggle(&mut self, row: i32, col: i32) -> Result<Cell> {
        let flipped = self.current.get(row, col)?.flipped();
        self.current.set(row, col, flipped)?;
        Ok(flipped)
    }

    pub fn cell_state(&self, row: i32, col: i32) -> Result<Cell> {
        self.current.get(row, col)
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.current.dimensions()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge
    }

    /// Read-only view of the current generation.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    /// Kill every cell and rewind the generation counter.
    pub fn reset(&mut self) {
        self.current.clear();
        self.generation = 0;
        debug!("grid engine reset");
    }

    /// Refill the grid from `seed`, each cell alive with probability
    /// `density`, and rewind the generation counter.
    ///
    /// The same seed and density always give the same grid.
    pub fn randomize(&mut self, seed: u64, density: f64) {
        let p = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for cell in self.current.cells_mut() {
            *cell = Cell::from(rng.gen_bool(p));
        }
        self.generation = 0;
        debug!(seed, density = p, population = self.population(), "grid randomized");
    }

    /// Hash of the current cell states, for repeat detection.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.current.hash(&mut hasher);
        hasher.finish()
    }
}
