//! Cutoff Search: choosing where to cut a dendrogram.

mod cophenetic;
mod hill_climb;
mod mcclain_rao;
mod naive;
mod silhouette;

pub use cophenetic::CopheneticCutoff;
pub use hill_climb::HillClimbCutoff;
pub use mcclain_rao::McClainRao;
pub use naive::NaiveCutoff;
pub use silhouette::Silhouette;

use crate::{Clustering, Direction, HierarchicalResult, ProximityMatrix, Result};

/// A procedure that picks a cutoff for a hierarchical result.
pub trait CutoffStrategy: Send + Sync {
    /// The name of the strategy.
    fn name(&self) -> &str;

    /// Finds a cutoff, sets it on the result and returns it.
    ///
    /// # Errors
    ///
    /// Depends on the strategy.
    fn find_cutoff(&self, result: &mut HierarchicalResult) -> Result<f64>;
}

/// A score of the quality of a flat clustering that needs no ground truth.
pub trait InternalEvaluator: Send + Sync {
    /// The name of the evaluator. Scores are cached under this name.
    fn name(&self) -> &str;

    /// Scores a clustering of the items of the proximity matrix.
    ///
    /// Returns `NaN` where the score is undefined.
    fn score(&self, clustering: &Clustering, proximity: &ProximityMatrix) -> f64;

    /// Whether larger scores are better.
    fn is_maximized(&self) -> bool;

    /// The direction in which scores improve.
    fn direction(&self) -> Direction {
        if self.is_maximized() {
            Direction::Maximize
        } else {
            Direction::Minimize
        }
    }

    /// Whether score `a` is strictly better than score `b`.
    fn is_better(&self, a: f64, b: f64) -> bool {
        self.direction().is_better(a, b)
    }
}

/// Proximities between items as distances.
fn as_distance(proximity: &ProximityMatrix, i: usize, j: usize) -> f64 {
    if i == j {
        0.0
    } else {
        proximity.direction().to_height(proximity.get(i, j))
    }
}
