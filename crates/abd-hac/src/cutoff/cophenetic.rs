//! Cutting where the flat clustering best explains the cophenetic distances.

use crate::{utils, HacError, HierarchicalResult, Result};

use super::CutoffStrategy;

/// Scores every level of the tree by Pearson's correlation between the
/// cophenetic distances of the leaves and an indicator that is `1` for pairs
/// of leaves in different clusters and `0` otherwise. Cuts at the level with
/// the highest correlation.
///
/// Only the tree is used, so the proximity matrix need not be kept. Each
/// level costs a pass over all pairs of leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopheneticCutoff;

impl CopheneticCutoff {
    /// The registry name.
    pub const NAME: &'static str = "cophenetic";
}

impl CutoffStrategy for CopheneticCutoff {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// # Errors
    ///
    /// - `EmptyInput` if the tree has no merges.
    /// - `NonFiniteScore` if no level has a defined correlation, e.g. for a
    ///   tree over two leaves.
    fn find_cutoff(&self, result: &mut HierarchicalResult) -> Result<f64> {
        let tree = result.tree();
        let levels = tree.tree_levels();
        if levels == 0 {
            return Err(HacError::EmptyInput(tree.num_leaves()));
        }

        let cophenetic = tree.cophenetic_matrix();
        let mut best: Option<(f64, f64)> = None;
        for level in 0..levels {
            let cutoff = tree.cut_tree_by_level(level);
            let assignment = tree.cluster_assignment(cutoff);
            let between = cophenetic
                .pairs()
                .map(|(i, j, _)| if assignment[i] == assignment[j] { 0.0 } else { 1.0 })
                .collect::<Vec<_>>();
            let Some(score) = utils::pearson(cophenetic.condensed(), &between) else {
                continue;
            };
            ftlog::trace!("Level {level}, cutoff {cutoff}: correlation {score}");
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, cutoff));
            }
        }

        let (score, cutoff) = best.ok_or_else(|| HacError::NonFiniteScore {
            evaluator: Self::NAME.to_string(),
            clusters: tree.num_leaves(),
            score: f64::NAN,
        })?;

        let k = result.set_cutoff(cutoff).len();
        ftlog::debug!("Cophenetic cutoff {cutoff} gives {k} clusters with correlation {score}");
        Ok(cutoff)
    }
}
