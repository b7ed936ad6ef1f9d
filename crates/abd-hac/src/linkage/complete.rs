//! Complete linkage: the farthest cross pair.

use crate::ProximityMatrix;

use super::{cross_pairs, Linkage};

/// Complete linkage, `D(X, Y) = max d(x, y)` over `x ∈ X, y ∈ Y`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Complete;

impl Complete {
    /// The registry name.
    pub const NAME: &'static str = "complete";
}

impl Linkage for Complete {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn alpha_a(&self, _: usize, _: usize, _: usize) -> f64 {
        0.5
    }

    fn alpha_b(&self, _: usize, _: usize, _: usize) -> f64 {
        0.5
    }

    fn beta(&self, _: usize, _: usize, _: usize) -> f64 {
        0.0
    }

    fn gamma(&self) -> f64 {
        0.5
    }

    fn cluster_distance(&self, proximity: &ProximityMatrix, a: &[usize], b: &[usize]) -> Option<f64> {
        let direction = proximity.direction();
        cross_pairs(proximity, a, b).reduce(|worst, d| if direction.is_better(worst, d) { d } else { worst })
    }
}
