//! Algorithm enum for selecting the stepping implementation.

use serde::{Deserialize, Serialize};

/// Available stepping strategies.
/// Both produce identical generations; they differ only in how the
/// neighbor tallies are accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Single hash map filled on the calling thread
    #[default]
    Sparse,
    /// Per-worker maps folded with rayon, then merged
    SparseParallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Sparse, Algorithm::SparseParallel]
    }

    /// Display name for logs and the benchmark table
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sparse => "Sparse",
            Algorithm::SparseParallel => "Sparse+Par",
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Sparse => "Candidate-set tally, serial",
            Algorithm::SparseParallel => "Candidate-set tally, rayon fold/reduce",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sparse() {
        assert_eq!(Algorithm::default(), Algorithm::Sparse);
    }

    #[test]
    fn test_every_algorithm_is_described() {
        for algorithm in Algorithm::all() {
            assert!(!algorithm.description().is_empty());
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = Algorithm::all().iter().map(|a| a.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }
}
