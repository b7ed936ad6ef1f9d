//! Average linkage (UPGMA).

use distances::Number;

use crate::ProximityMatrix;

use super::{cross_pairs, ratio, Linkage};

/// Average linkage: the mean proximity over all cross pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Average;

impl Average {
    /// The registry name.
    pub const NAME: &'static str = "average";
}

impl Linkage for Average {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn alpha_a(&self, ma: usize, mb: usize, _: usize) -> f64 {
        ratio(ma, mb)
    }

    fn alpha_b(&self, ma: usize, mb: usize, _: usize) -> f64 {
        ratio(mb, ma)
    }

    fn beta(&self, _: usize, _: usize, _: usize) -> f64 {
        0.0
    }

    fn gamma(&self) -> f64 {
        0.0
    }

    fn cluster_distance(&self, proximity: &ProximityMatrix, a: &[usize], b: &[usize]) -> Option<f64> {
        if a.is_empty() || b.is_empty() {
            return None;
        }
        let sum = cross_pairs(proximity, a, b).sum::<f64>();
        Some(sum / (a.len() * b.len()).as_f64())
    }
}
