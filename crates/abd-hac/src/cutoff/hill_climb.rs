//! Greedy descent from the root towards the leaves.

use crate::{HacError, HierarchicalResult, Result};

use super::{CutoffStrategy, InternalEvaluator};

/// Walks the tree from just below the root towards the leaves, one merge
/// level at a time, and stops at the first level whose score does not improve
/// on the previous one. The previous level's cutoff is returned.
///
/// This is a local search. A better cutoff deeper in the tree is not found
/// once the score has stopped improving.
///
/// Scores are cached on the result by evaluator name and cluster count, so
/// repeated searches only evaluate new cluster counts.
#[derive(Default)]
pub struct HillClimbCutoff {
    /// The score to climb.
    evaluator: Option<Box<dyn InternalEvaluator>>,
}

impl HillClimbCutoff {
    /// The registry name.
    pub const NAME: &'static str = "hill-climb";

    /// Creates a search that climbs the given evaluator.
    #[must_use]
    pub fn new(evaluator: Box<dyn InternalEvaluator>) -> Self {
        Self {
            evaluator: Some(evaluator),
        }
    }

    /// Replaces the evaluator.
    pub fn set_evaluator(&mut self, evaluator: Box<dyn InternalEvaluator>) {
        self.evaluator = Some(evaluator);
    }

    /// The evaluator, if one is set.
    #[must_use]
    pub fn evaluator(&self) -> Option<&dyn InternalEvaluator> {
        self.evaluator.as_deref()
    }

    /// Scores the clustering induced by `cutoff`, using the cache when the
    /// cluster count was scored before.
    fn score_at(evaluator: &dyn InternalEvaluator, result: &mut HierarchicalResult, cutoff: f64) -> Result<(usize, f64)> {
        let clustering = result.clustering_at(cutoff);
        let k = clustering.len();
        if let Some(score) = result.score(evaluator.name(), k) {
            return Ok((k, score));
        }

        let proximity = result.proximity().ok_or(HacError::MissingProximity)?;
        let score = evaluator.score(&clustering, proximity);
        result.set_score(evaluator.name(), k, score);
        Ok((k, score))
    }
}

impl CutoffStrategy for HillClimbCutoff {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// # Errors
    ///
    /// - `MissingEvaluator` if no evaluator is set.
    /// - `MissingProximity` if the result did not keep its proximity matrix.
    /// - `EmptyInput` if the tree has no merges.
    /// - `NonFiniteScore` if not a single level received a finite score.
    fn find_cutoff(&self, result: &mut HierarchicalResult) -> Result<f64> {
        let evaluator = self.evaluator.as_deref().ok_or(HacError::MissingEvaluator)?;
        if result.proximity().is_none() {
            return Err(HacError::MissingProximity);
        }
        let levels = result.tree().tree_levels();
        if levels == 0 {
            return Err(HacError::EmptyInput(result.tree().num_leaves()));
        }

        let mut best: Option<(f64, f64)> = None;
        let mut first_failure = None;
        for level in (0..levels).rev() {
            let cutoff = result.tree().cut_tree_by_level(level);
            let (k, score) = Self::score_at(evaluator, result, cutoff)?;
            ftlog::debug!("Level {level}: cutoff {cutoff}, {k} clusters, {} = {score}", evaluator.name());

            if !score.is_finite() {
                ftlog::warn!("{} is undefined for {k} clusters, stopping", evaluator.name());
                first_failure = Some((k, score));
                break;
            }
            match best {
                Some((_, previous)) if !evaluator.is_better(score, previous) => break,
                _ => best = Some((cutoff, score)),
            }
        }

        match best {
            Some((cutoff, score)) => {
                let k = result.set_cutoff(cutoff).len();
                ftlog::info!("Hill-climb cutoff {cutoff} gives {k} clusters, {} = {score}", evaluator.name());
                Ok(cutoff)
            }
            None => {
                let (clusters, score) = first_failure.unwrap_or((0, f64::NAN));
                Err(HacError::NonFiniteScore {
                    evaluator: evaluator.name().to_string(),
                    clusters,
                    score,
                })
            }
        }
    }
}
