//! Centroid linkage (UPGMC).

use distances::Number;

use super::{ratio, Linkage};

/// Centroid linkage: the proximity between cluster centroids.
///
/// May produce inversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Centroid;

impl Centroid {
    /// The registry name.
    pub const NAME: &'static str = "centroid";
}

impl Linkage for Centroid {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn alpha_a(&self, ma: usize, mb: usize, _: usize) -> f64 {
        ratio(ma, mb)
    }

    fn alpha_b(&self, ma: usize, mb: usize, _: usize) -> f64 {
        ratio(mb, ma)
    }

    fn beta(&self, ma: usize, mb: usize, _: usize) -> f64 {
        let s = (ma + mb).as_f64();
        -(ma * mb).as_f64() / (s * s)
    }

    fn gamma(&self) -> f64 {
        0.0
    }

    fn is_monotone(&self) -> bool {
        false
    }
}
