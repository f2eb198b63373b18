// grid.rs - Grid types for Conway's Game of Life

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, ParseEdgePolicyError, Result};

/// State of a single grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn flipped(self) -> Cell {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// How neighbor lookups resolve past the grid boundary.
///
/// Only neighbor counting goes through the policy. Caller-supplied
/// coordinates (`toggle`, `cell_state`) are always bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Out-of-range neighbors are not counted. Edge gliders die.
    Clamped,
    /// Out-of-range neighbors wrap to the opposite edge (torus).
    Wrapped,
}

impl EdgePolicy {
    /// Resolve one axis of a neighbor coordinate against an axis of `len`
    /// cells. `None` means the neighbor does not exist under this policy.
    pub fn resolve(self, value: i64, len: u32) -> Option<u32> {
        let n = i64::from(len);
        if (0..n).contains(&value) {
            return Some(value as u32);
        }
        match self {
            EdgePolicy::Clamped => None,
            EdgePolicy::Wrapped => Some(value.rem_euclid(n) as u32),
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgePolicy::Clamped => f.write_str("clamped"),
            EdgePolicy::Wrapped => f.write_str("wrapped"),
        }
    }
}

impl FromStr for EdgePolicy {
    type Err = ParseEdgePolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamped" | "clamp" => Ok(EdgePolicy::Clamped),
            "wrapped" | "wrap" | "torus" => Ok(EdgePolicy::Wrapped),
            _ => Err(ParseEdgePolicyError(s.to_string())),
        }
    }
}

/// Fixed-size rectangular array of cells, stored row-major.
///
/// `row` ranges over `0..height` and `col` over `0..width`. Coordinates are
/// signed so callers can pass `-1` and get a clean `OutOfBounds`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Largest side length; every in-range coordinate must fit in an `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// All-dead grid of `width` columns by `height` rows.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let invalid = LifeError::InvalidDimensions { width, height, max: Self::MAX_DIM };
        if width == 0 || height == 0 || width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(invalid);
        }
        let len = (width as usize).checked_mul(height as usize).ok_or(invalid)?;
        Ok(Self { width, height, cells: vec![Cell::Dead; len] })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as u32) < self.height && (col as u32) < self.width
    }

    fn index(&self, row: i32, col: i32) -> Result<usize> {
        if !self.contains(row, col) {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset(row as u32, col as u32))
    }

    fn offset(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    pub fn get(&self, row: i32, col: i32) -> Result<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> Result<()> {
        let i = self.index(row, col)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Unchecked read for coordinates already resolved into range.
    pub(crate) fn at(&self, row: u32, col: u32) -> Cell {
        self.cells[self.offset(row, col)]
    }

    pub(crate) fn put(&mut self, row: u32, col: u32, cell: Cell) {
        let i = self.offset(row, col);
        self.cells[i] = cell;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Rows from top to bottom, each `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// `(row, col)` of every live cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| ((i / width) as i32, (i % width) as i32))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// One line per row, `#` for alive and `.` for dead.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
