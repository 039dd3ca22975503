use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::SessionError;
use crate::domain::{Algorithm, MAX_GENERATIONS, Rule, presets, random_soup};

/// Where generation 0 comes from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PatternSource {
    /// Entry from the preset table, matched by name
    Preset(String),
    /// Explicit live-cell coordinates in any local frame
    Cells(Vec<(i32, i32)>),
    /// Seeded random fill, reproducible from the seed
    RandomSoup {
        width: u32,
        height: u32,
        density: f64,
        seed: u64,
    },
}

impl PatternSource {
    /// Expand to the coordinate list the engine ingests
    pub fn cells(&self) -> Result<Vec<(i32, i32)>, SessionError> {
        match self {
            PatternSource::Preset(name) => presets::by_name(name)
                .map(|pattern| pattern.cells)
                .ok_or_else(|| SessionError::UnknownPreset(name.clone())),
            PatternSource::Cells(cells) => Ok(cells.clone()),
            PatternSource::RandomSoup {
                width,
                height,
                density,
                seed,
            } => Ok(random_soup(
                *width,
                *height,
                *density,
                &mut StdRng::seed_from_u64(*seed),
            )),
        }
    }
}

/// Everything needed to reproduce a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid_size: u32,
    pub toroidal: bool,
    pub rule: Rule,
    pub pattern: PatternSource,
    /// Generations to compute after generation 0
    pub generations: usize,
    pub algorithm: Algorithm,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: 200,
            toroidal: false,
            rule: Rule::conway(),
            pattern: PatternSource::Preset("R-pentomino".to_string()),
            generations: MAX_GENERATIONS - 1,
            algorithm: Algorithm::Sparse,
        }
    }
}
