//! Single linkage: the closest cross pair.

use crate::ProximityMatrix;

use super::{cross_pairs, Linkage};

/// Single linkage, `D(X, Y) = min d(x, y)` over `x ∈ X, y ∈ Y`.
///
/// Tends to chain and produce elongated clusters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Single;

impl Single {
    /// The registry name.
    pub const NAME: &'static str = "single";
}

impl Linkage for Single {
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
        -0.5
    }

    fn cluster_distance(&self, proximity: &ProximityMatrix, a: &[usize], b: &[usize]) -> Option<f64> {
        let direction = proximity.direction();
        cross_pairs(proximity, a, b).reduce(|best, d| if direction.is_better(d, best) { d } else { best })
    }
}
