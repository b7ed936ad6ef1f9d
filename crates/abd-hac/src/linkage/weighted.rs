//! Weighted average linkage (WPGMA, McQuitty).

use super::Linkage;

/// Weighted average linkage: both merged clusters contribute equally,
/// regardless of their sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Weighted;

impl Weighted {
    /// The registry name.
    pub const NAME: &'static str = "weighted";
}

impl Linkage for Weighted {
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
        0.0
    }
}
