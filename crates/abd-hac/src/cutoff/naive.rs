//! Cutting at the largest gap between merge heights.

use crate::{utils, HacError, HierarchicalResult, Result};

use super::CutoffStrategy;

/// Cuts midway through the largest gap between two consecutive merge
/// heights. Needs neither an evaluator nor the proximity matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveCutoff;

impl NaiveCutoff {
    /// The registry name.
    pub const NAME: &'static str = "naive";
}

impl CutoffStrategy for NaiveCutoff {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// # Errors
    ///
    /// - `EmptyInput` if the tree has no merges.
    fn find_cutoff(&self, result: &mut HierarchicalResult) -> Result<f64> {
        let tree = result.tree();
        let levels = tree.tree_levels();
        if levels == 0 {
            return Err(HacError::EmptyInput(tree.num_leaves()));
        }

        let heights = tree.order().iter().map(|&i| tree.height(i)).collect::<Vec<_>>();
        let gaps = heights.windows(2).map(|w| w[1] - w[0]).collect::<Vec<_>>();
        let level = utils::arg_max(&gaps).map_or(0, |(i, _)| i + 1);
        let cutoff = tree.cut_tree_by_level(level);

        let k = result.set_cutoff(cutoff).len();
        ftlog::debug!("Largest gap below level {level}, cutoff {cutoff} gives {k} clusters");
        Ok(cutoff)
    }
}
