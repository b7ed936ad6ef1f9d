//! The silhouette coefficient.

use distances::Number;

use crate::{Clustering, ProximityMatrix};

use super::{as_distance, InternalEvaluator};

/// The mean silhouette of all items.
///
/// For an item in a cluster of at least two items, with `a` its mean distance
/// to the rest of its cluster and `b` its smallest mean distance to another
/// cluster, the silhouette is `(b - a) / max(a, b)`. Items alone in their
/// cluster score `0`. The score is undefined for fewer than two clusters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silhouette;

impl Silhouette {
    /// The registry name.
    pub const NAME: &'static str = "silhouette";
}

impl InternalEvaluator for Silhouette {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, clustering: &Clustering, proximity: &ProximityMatrix) -> f64 {
        if clustering.len() < 2 || clustering.num_items() == 0 {
            return f64::NAN;
        }

        let clusters = clustering.clusters();
        let labels = clustering.labels();
        let total = clustering
            .items()
            .iter()
            .zip(labels)
            .filter(|&(_, &label)| clusters[label].len() > 1)
            .map(|(&i, &label)| {
                let mean_to = |members: &[usize]| members.iter().map(|&j| as_distance(proximity, i, j)).sum::<f64>();
                let a = mean_to(&clusters[label]) / (clusters[label].len() - 1).as_f64();
                let b = clusters
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != label)
                    .map(|(_, members)| mean_to(members) / members.len().as_f64())
                    .fold(f64::INFINITY, f64::min);
                let m = a.max(b);
                if m > 0.0 {
                    (b - a) / m
                } else {
                    0.0
                }
            })
            .sum::<f64>();

        total / labels.len().as_f64()
    }

    fn is_maximized(&self) -> bool {
        true
    }
}
