//! Median linkage (WPGMC).

use crate::ProximityMatrix;

use super::{cross_pairs, Linkage};

/// Median linkage: centroid linkage where both merged clusters weigh the
/// same. Direct evaluation uses the median of the cross-pair proximities,
/// which makes it less sensitive to outliers than average linkage.
///
/// May produce inversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Median;

impl Median {
    /// The registry name.
    pub const NAME: &'static str = "median";
}

impl Linkage for Median {
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
        -0.25
    }

    fn gamma(&self) -> f64 {
        0.0
    }

    fn is_monotone(&self) -> bool {
        false
    }

    fn cluster_distance(&self, proximity: &ProximityMatrix, a: &[usize], b: &[usize]) -> Option<f64> {
        let mut values = cross_pairs(proximity, a, b).collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(values[values.len() / 2])
    }
}
