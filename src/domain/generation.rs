//! Immutable generation snapshots and the bounded, append-only history.

use super::Cell;

/// Maximum number of generations a history will hold
pub const MAX_GENERATIONS: usize = 1000;

/// One snapshot of live cells.
/// Cells are sorted and unique, so equal generations compare bit-identical.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generation {
    index: usize,
    cells: Vec<Cell>,
}

impl Generation {
    /// Build a generation, canonicalizing the live-cell list
    pub fn new(index: usize, mut cells: Vec<Cell>) -> Self {
        cells.sort_unstable();
        cells.dedup();
        Self { index, cells }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    /// Live cells in canonical order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }
}

/// Ordered generations 0..len on an N×N board.
/// Only grows, until it is dropped by a reset.
///
/// The edge policy is not recorded here: it belongs to the engine and may
/// change between generations.
#[derive(Clone, Debug)]
pub struct GenerationHistory {
    grid_size: u32,
    generations: Vec<Generation>,
}

impl GenerationHistory {
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            generations: Vec::new(),
        }
    }

    /// Side length N of the board the cells live on
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Half the side length, used to center world positions on the origin
    pub fn half_extent(&self) -> f32 {
        self.grid_size as f32 / 2.0
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.generations.len() >= MAX_GENERATIONS
    }

    pub fn get(&self, index: usize) -> Option<&Generation> {
        self.generations.get(index)
    }

    pub fn latest(&self) -> Option<&Generation> {
        self.generations.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Generation> {
        self.generations.iter()
    }

    /// Total live cells across an inclusive index range
    pub fn population_in(&self, start: usize, end: usize) -> usize {
        self.generations
            .iter()
            .skip(start)
            .take(end.saturating_sub(start) + 1)
            .map(Generation::population)
            .sum()
    }

    /// Append the next generation built from `cells`.
    /// Returns false without appending once the history is full.
    pub(crate) fn push(&mut self, cells: Vec<Cell>) -> bool {
        if self.is_full() {
            return false;
        }
        let index = self.generations.len();
        self.generations.push(Generation::new(index, cells));
        true
    }

    /// Append a generation produced by stepping the latest one
    pub(crate) fn append(&mut self, generation: Generation) -> bool {
        debug_assert_eq!(generation.index(), self.generations.len());
        if self.is_full() {
            return false;
        }
        self.generations.push(generation);
        true
    }
}
