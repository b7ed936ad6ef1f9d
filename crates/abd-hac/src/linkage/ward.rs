//! Ward's minimum variance linkage.

use distances::Number;

use super::Linkage;

/// Ward linkage: merges the pair whose union least increases the total
/// within-cluster variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ward;

impl Ward {
    /// The registry name.
    pub const NAME: &'static str = "ward";
}

impl Linkage for Ward {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn alpha_a(&self, ma: usize, mb: usize, mq: usize) -> f64 {
        (ma + mq).as_f64() / (ma + mb + mq).as_f64()
    }

    fn alpha_b(&self, ma: usize, mb: usize, mq: usize) -> f64 {
        (mb + mq).as_f64() / (ma + mb + mq).as_f64()
    }

    fn beta(&self, ma: usize, mb: usize, mq: usize) -> f64 {
        -mq.as_f64() / (ma + mb + mq).as_f64()
    }

    fn gamma(&self) -> f64 {
        0.0
    }
}
