use std::sync::Arc;

use super::{
    Algorithm, Cell, Generation, GenerationHistory, Grid, LifeError, Rule, step, step_parallel,
};

/// LifeEngine owns the rule, grid metadata and the generation history.
/// Cloning is cheap: the history is shared until the clone appends to it.
#[derive(Clone, Debug)]
pub struct LifeEngine {
    grid: Grid,
    rule: Rule,
    algorithm: Algorithm,
    history: Arc<GenerationHistory>,
}

impl LifeEngine {
    /// Create an engine for an N×N bounded grid with Conway's rule
    pub fn new(grid_size: u32) -> Self {
        let grid = Grid::new(grid_size, false);
        Self {
            grid,
            rule: Rule::default(),
            algorithm: Algorithm::default(),
            history: Arc::new(GenerationHistory::new(grid.size())),
        }
    }

    /// Builder-style toroidal toggle
    pub fn with_toroidal(mut self, toroidal: bool) -> Self {
        self.set_toroidal(toroidal);
        self
    }

    /// Builder-style rule selection
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub const fn grid(&self) -> Grid {
        self.grid
    }

    pub const fn rule(&self) -> Rule {
        self.rule
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Shared handle to the current history for read-only consumers
    pub fn snapshot(&self) -> Arc<GenerationHistory> {
        Arc::clone(&self.history)
    }

    pub fn latest(&self) -> Option<&Generation> {
        self.history.latest()
    }

    /// Build generation 0 from pattern coordinates in any local frame.
    ///
    /// The pattern's bounding box is centered on the grid. A pattern wider
    /// or taller than the grid is rejected with [`LifeError::InvalidPattern`]
    /// and the engine is left untouched. Any previous history is discarded.
    pub fn initialize_from_pattern(&mut self, cells: &[(i32, i32)]) -> Result<(), LifeError> {
        let placed = place_centered(cells, self.grid.size())?;

        let mut history = GenerationHistory::new(self.grid.size());
        history.push(placed);
        log::debug!(
            "seeded generation 0 with {} cells on {}x{} grid",
            history.latest().map_or(0, Generation::population),
            self.grid.size(),
            self.grid.size()
        );
        self.history = Arc::new(history);
        Ok(())
    }

    /// Append up to `count` generations after the latest one.
    /// Stops at the history cap; returns how many were appended.
    pub fn compute_generations(&mut self, count: usize) -> usize {
        let (rule, grid, algorithm) = (self.rule, self.grid, self.algorithm);
        let history = Arc::make_mut(&mut self.history);

        let mut appended = 0;
        while appended < count && !history.is_full() {
            let Some(current) = history.latest() else {
                break;
            };
            let next = match algorithm {
                Algorithm::Sparse => step(current, &rule, &grid),
                Algorithm::SparseParallel => step_parallel(current, &rule, &grid),
            };
            history.append(next);
            appended += 1;
        }

        if appended > 0 {
            log::debug!(
                "computed {} generations with {} ({}), history now {}",
                appended,
                rule,
                algorithm.name(),
                history.len()
            );
        }
        appended
    }

    /// Step one generation without touching the history
    pub fn step(&self, current: &Generation) -> Generation {
        match self.algorithm {
            Algorithm::Sparse => step(current, &self.rule, &self.grid),
            Algorithm::SparseParallel => step_parallel(current, &self.rule, &self.grid),
        }
    }

    /// Replace the rule. Existing generations are kept as computed.
    pub fn set_rule(&mut self, birth: &[u8], survival: &[u8]) -> Result<(), LifeError> {
        self.rule = Rule::new(birth, survival)?;
        Ok(())
    }

    /// Change edge policy; applies to generations computed afterwards
    pub fn set_toroidal(&mut self, toroidal: bool) {
        self.grid.set_toroidal(toroidal);
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Discard all history and resize the grid
    pub fn reset(&mut self, grid_size: u32) {
        self.grid = Grid::new(grid_size, self.grid.is_toroidal());
        self.history = Arc::new(GenerationHistory::new(self.grid.size()));
    }
}

/// Translate pattern coordinates so their bounding box sits at the grid center
fn place_centered(cells: &[(i32, i32)], grid_size: u32) -> Result<Vec<Cell>, LifeError> {
    let Some(&(first_x, first_y)) = cells.first() else {
        return Ok(Vec::new());
    };

    let (min_x, max_x, min_y, max_y) = cells.iter().fold(
        (first_x, first_x, first_y, first_y),
        |(min_x, max_x, min_y, max_y), &(x, y)| {
            (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
        },
    );
    let width = (max_x as i64 - min_x as i64 + 1) as u64;
    let height = (max_y as i64 - min_y as i64 + 1) as u64;

    let n = grid_size as u64;
    if width > n || height > n {
        return Err(LifeError::InvalidPattern { width, height, grid_size });
    }

    // Both offsets land the box inside [0, N)
    let left = ((n - width) / 2) as i64 - min_x as i64;
    let top = ((n - height) / 2) as i64 - min_y as i64;

    Ok(cells
        .iter()
        .map(|&(x, y)| Cell::new((x as i64 + left) as u32, (y as i64 + top) as u32))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MAX_GENERATIONS, presets};

    #[test]
    fn test_glider_is_centered() {
        let mut engine = LifeEngine::new(50);
        engine.initialize_from_pattern(&presets::glider().cells).unwrap();

        let generation = engine.latest().unwrap();
        assert_eq!(generation.index(), 0);
        assert_eq!(
            generation.cells(),
            Generation::new(
                0,
                vec![
                    Cell::new(24, 23),
                    Cell::new(25, 24),
                    Cell::new(23, 25),
                    Cell::new(24, 25),
                    Cell::new(25, 25),
                ]
            )
            .cells()
        );
    }

    #[test]
    fn test_negative_local_coordinates_are_normalized() {
        let mut engine = LifeEngine::new(11);
        engine.initialize_from_pattern(&[(-1, -5), (0, -5), (1, -5)]).unwrap();
        assert_eq!(
            engine.latest().unwrap().cells(),
            &[Cell::new(4, 5), Cell::new(5, 5), Cell::new(6, 5)]
        );
    }

    #[test]
    fn test_duplicate_pattern_cells_collapse() {
        let mut engine = LifeEngine::new(10);
        engine.initialize_from_pattern(&[(0, 0), (0, 0), (1, 0)]).unwrap();
        assert_eq!(engine.latest().unwrap().population(), 2);
    }

    #[test]
    fn test_pattern_exactly_grid_sized_fits() {
        let mut engine = LifeEngine::new(3);
        engine.initialize_from_pattern(&[(10, 10), (12, 12)]).unwrap();
        assert_eq!(
            engine.latest().unwrap().cells(),
            &[Cell::new(0, 0), Cell::new(2, 2)]
        );
    }

    #[test]
    fn test_oversized_pattern_rejected() {
        let mut engine = LifeEngine::new(20);
        engine.initialize_from_pattern(&presets::glider().cells).unwrap();

        let gun = presets::glider_gun();
        let result = engine.initialize_from_pattern(&gun.cells);
        assert_eq!(
            result,
            Err(LifeError::InvalidPattern { width: 36, height: 9, grid_size: 20 })
        );

        // Previous history is untouched on rejection
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.latest().unwrap().population(), 5);
    }

    #[test]
    fn test_empty_pattern_gives_empty_generation() {
        let mut engine = LifeEngine::new(10);
        engine.initialize_from_pattern(&[]).unwrap();
        assert_eq!(engine.history().len(), 1);
        assert!(engine.latest().unwrap().is_empty());

        engine.compute_generations(3);
        assert_eq!(engine.history().len(), 4);
        assert!(engine.history().iter().all(Generation::is_empty));
    }

    #[test]
    fn test_compute_without_seed_appends_nothing() {
        let mut engine = LifeEngine::new(10);
        assert_eq!(engine.compute_generations(10), 0);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_compute_extends_and_caps() {
        let mut engine = LifeEngine::new(20);
        engine.initialize_from_pattern(&presets::blinker().cells).unwrap();

        assert_eq!(engine.compute_generations(10), 10);
        assert_eq!(engine.history().len(), 11);
        let tenth = engine.history().get(10).unwrap().clone();

        // Extending keeps what was already computed
        assert_eq!(engine.compute_generations(5), 5);
        assert_eq!(engine.history().get(10), Some(&tenth));

        assert_eq!(engine.compute_generations(5000), MAX_GENERATIONS - 16);
        assert_eq!(engine.history().len(), MAX_GENERATIONS);
        assert_eq!(engine.compute_generations(1), 0);

        // Blinker has period 2
        let history = engine.history();
        assert_eq!(history.get(998).unwrap().cells(), history.get(0).unwrap().cells());
    }

    #[test]
    fn test_set_rule_is_prospective() {
        let mut engine = LifeEngine::new(20);
        engine.initialize_from_pattern(&presets::blinker().cells).unwrap();
        engine.compute_generations(2);
        let before: Vec<_> = engine.history().iter().cloned().collect();

        engine.set_rule(&[2], &[]).unwrap();
        assert_eq!(engine.rule(), Rule::seeds());
        let kept: Vec<_> = engine.history().iter().cloned().collect();
        assert_eq!(before, kept);

        engine.compute_generations(1);
        // Seeds kills every live cell of the blinker
        let latest = engine.latest().unwrap();
        assert!(before[2].cells().iter().all(|&c| !latest.contains(c)));
    }

    #[test]
    fn test_set_rule_rejects_bad_counts() {
        let mut engine = LifeEngine::new(20);
        assert_eq!(
            engine.set_rule(&[3], &[2, 3, 9]),
            Err(LifeError::InvalidRule { set: "survival", value: 9 })
        );
        assert_eq!(engine.rule(), Rule::conway());
    }

    #[test]
    fn test_reset_clears_history_and_resizes() {
        let mut engine = LifeEngine::new(20).with_toroidal(true);
        engine.initialize_from_pattern(&presets::glider().cells).unwrap();
        engine.compute_generations(4);

        engine.reset(80);
        assert!(engine.history().is_empty());
        assert_eq!(engine.grid().size(), 80);
        assert!(engine.grid().is_toroidal());
        assert_eq!(engine.history().grid_size(), 80);
    }

    #[test]
    fn test_engine_step_leaves_history_alone() {
        let mut engine = LifeEngine::new(10);
        engine.initialize_from_pattern(&presets::blinker().cells).unwrap();
        let seed = engine.latest().unwrap().clone();

        let next = engine.step(&seed);
        assert_eq!(next.index(), 1);
        assert_eq!(next.population(), 3);
        assert_ne!(next.cells(), seed.cells());
        assert_eq!(engine.step(&next).cells(), seed.cells());
        assert_eq!(engine.history().len(), 1);

        engine.set_algorithm(Algorithm::SparseParallel);
        assert_eq!(engine.algorithm(), Algorithm::SparseParallel);
        assert_eq!(engine.step(&seed), next);
    }

    #[test]
    fn test_edge_change_applies_to_later_generations() {
        // Blinker filling the middle row of a 3x3 board
        let mut engine = LifeEngine::new(3);
        engine.initialize_from_pattern(&presets::blinker().cells).unwrap();
        engine.compute_generations(1);
        assert_eq!(engine.latest().unwrap().population(), 3);

        engine.set_toroidal(true);
        assert!(engine.grid().is_toroidal());
        assert_eq!(engine.history().grid_size(), 3);

        // On a 3x3 torus every dead cell sees the whole column
        engine.compute_generations(1);
        assert_eq!(engine.history().get(1).unwrap().population(), 3);
        assert_eq!(engine.latest().unwrap().population(), 9);
    }

    #[test]
    fn test_snapshot_is_not_mutated_by_later_compute() {
        let mut engine = LifeEngine::new(30);
        engine.initialize_from_pattern(&presets::r_pentomino().cells).unwrap();
        engine.compute_generations(5);

        let snapshot = engine.snapshot();
        engine.compute_generations(5);

        assert_eq!(snapshot.len(), 6);
        assert_eq!(engine.history().len(), 11);
    }

    #[test]
    fn test_parallel_engine_matches_serial() {
        let mut serial = LifeEngine::new(120);
        let mut parallel = LifeEngine::new(120).with_algorithm(Algorithm::SparseParallel);
        for engine in [&mut serial, &mut parallel] {
            engine.initialize_from_pattern(&presets::acorn().cells).unwrap();
            engine.compute_generations(60);
        }
        for (a, b) in serial.history().iter().zip(parallel.history().iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_toroidal_glider_returns_shifted() {
        let mut engine = LifeEngine::new(50).with_toroidal(true);
        engine.initialize_from_pattern(&presets::glider().cells).unwrap();
        engine.compute_generations(4);

        let grid = engine.grid();
        let start = engine.history().get(0).unwrap();
        let shifted: Vec<Cell> = start
            .cells()
            .iter()
            .filter_map(|c| grid.resolve(c.x as i64 + 1, c.y as i64 + 1))
            .collect();
        assert_eq!(
            engine.history().get(4).unwrap().cells(),
            Generation::new(4, shifted).cells()
        );
    }
}
