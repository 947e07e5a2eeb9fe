//! Bounded Game of Life engine
//!
//! Only live cells are stored. The grid has a hard edge: cells outside
//! `[0, rows) x [0, cols)` do not exist and are never counted.

use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Row/column offsets of the eight Moore neighbors
#[rustfmt::skip]
static NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// A cell coordinate on the bounded grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Grid size, fixed for the lifetime of a simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }
}

/// The set of live cells making up one generation.
///
/// Equality is set equality, so two configurations built from the same
/// cells in a different order compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Configuration {
    alive: HashSet<Cell>,
}

impl Configuration {
    /// An empty configuration (total extinction)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            alive: cells.into_iter().collect(),
        }
    }

    pub fn population(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.alive
    }

    /// True if every live cell lies inside `dims`
    pub fn fits(&self, dims: Dimensions) -> bool {
        self.alive.iter().all(|&cell| dims.contains(cell))
    }
}

impl FromIterator<Cell> for Configuration {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

/// Moore neighbors of `cell` that fall inside `dims`.
///
/// Yields at most eight distinct cells and never `cell` itself.
pub fn neighbors(cell: Cell, dims: Dimensions) -> impl Iterator<Item = Cell> {
    NEIGHBORS.iter().filter_map(move |&(dr, dc)| {
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        let neighbor = Cell::new(row, col);
        dims.contains(neighbor).then_some(neighbor)
    })
}

/// Compute the generation that follows `current`.
///
/// Every live cell scatters one count to each in-bounds neighbor, so the
/// count map covers exactly the candidate set minus live cells with no
/// live neighbors (which die anyway). All reads go to `current`; the
/// result is a fresh configuration.
pub fn next_generation(current: &Configuration, dims: Dimensions) -> Configuration {
    debug_assert!(current.fits(dims), "live cell outside {}x{} grid", dims.rows, dims.cols);

    let mut counts: HashMap<Cell, u8> = HashMap::with_capacity(current.population() * 4);
    for &cell in &current.alive {
        for neighbor in neighbors(cell, dims) {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }
    trace!(candidates = counts.len(), "counted neighbors");

    counts
        .into_iter()
        .filter(|&(cell, count)| match count {
            // birth or survival
            3 => true,
            // survival only
            2 => current.is_alive(cell),
            _ => false,
        })
        .map(|(cell, _)| cell)
        .collect()
}
