//! Sparse candidate-set stepping.
//!
//! Only live cells and their neighbors can change state, so each step
//! tallies neighbor counts into a map keyed by `y * N + x` instead of
//! scanning all N² cells. Cost is proportional to live population.

use std::collections::HashMap;

use rayon::prelude::*;

use super::{Cell, Generation, Grid, Rule};

/// Per-candidate accumulator
#[derive(Clone, Copy, Default, Debug)]
struct Tally {
    neighbors: u8,
    alive: bool,
}

impl Tally {
    fn merge(&mut self, other: Tally) {
        self.neighbors += other.neighbors;
        self.alive |= other.alive;
    }
}

type Tallies = HashMap<u64, Tally>;

/// Record one live cell: mark it alive and bump each neighbor's count
#[inline]
fn tally_cell(tallies: &mut Tallies, grid: &Grid, cell: Cell) {
    tallies.entry(grid.key(cell)).or_default().alive = true;
    for neighbor in grid.neighbors(cell) {
        tallies.entry(grid.key(neighbor)).or_default().neighbors += 1;
    }
}

/// Apply the rule to every candidate and collect the survivors and births
fn resolve(tallies: Tallies, grid: &Grid, rule: &Rule) -> Vec<Cell> {
    tallies
        .into_iter()
        .filter(|(_, tally)| rule.evolve(tally.alive, tally.neighbors))
        .map(|(key, _)| grid.cell_at(key))
        .collect()
}

/// Pure functional step - returns the next generation (serial)
pub fn step(current: &Generation, rule: &Rule, grid: &Grid) -> Generation {
    let mut tallies = Tallies::with_capacity(current.population() * 9);
    for &cell in current.cells() {
        tally_cell(&mut tallies, grid, cell);
    }
    Generation::new(current.index() + 1, resolve(tallies, grid, rule))
}

/// Parallel step using rayon fold/reduce over the live cells.
/// Produces exactly the same generation as [`step`].
pub fn step_parallel(current: &Generation, rule: &Rule, grid: &Grid) -> Generation {
    let tallies = current
        .cells()
        .par_iter()
        .fold(Tallies::new, |mut tallies, &cell| {
            tally_cell(&mut tallies, grid, cell);
            tallies
        })
        .reduce(Tallies::new, |mut left, right| {
            for (key, tally) in right {
                left.entry(key).or_default().merge(tally);
            }
            left
        });

    Generation::new(current.index() + 1, resolve(tallies, grid, rule))
}
