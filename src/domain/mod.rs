mod cell;
mod grid;
mod rules;
mod error;
mod generation;
mod step;
mod engine;
mod algorithm;
pub mod patterns;

pub use cell::Cell;
pub use grid::Grid;
pub use rules::{Rule, all_rules};
pub use error::LifeError;
pub use generation::{Generation, GenerationHistory, MAX_GENERATIONS};
pub use step::{step, step_parallel};
pub use engine::LifeEngine;
pub use algorithm::Algorithm;
pub use patterns::{Pattern, presets, random_soup};
