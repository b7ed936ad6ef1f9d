//! Scores for merging two graph clusters.

use distances::Number;

use crate::Direction;

use super::{ExternalProperties, GraphCluster};

/// A score for merging two graph clusters.
pub trait MergeEvaluation: Send + Sync {
    /// The name of the score.
    fn name(&self) -> &str;

    /// Scores the merge of `a` and `b`, given the edges between them.
    fn score(&self, a: &GraphCluster, b: &GraphCluster, external: &ExternalProperties) -> f64;

    /// Whether larger scores are better.
    fn is_maximized(&self) -> bool {
        true
    }

    /// The direction in which scores improve.
    fn direction(&self) -> Direction {
        if self.is_maximized() {
            Direction::Maximize
        } else {
            Direction::Minimize
        }
    }
}

/// Relative interconnectivity: the weight of the edges between two clusters
/// over the mean internal interconnectivity of the clusters.
///
/// When both clusters have no internal interconnectivity the external weight
/// itself is the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interconnectivity;

impl Interconnectivity {
    /// The registry name.
    pub const NAME: &'static str = "interconnectivity";
}

impl MergeEvaluation for Interconnectivity {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, a: &GraphCluster, b: &GraphCluster, external: &ExternalProperties) -> f64 {
        let internal = (a.interconnectivity() + b.interconnectivity()) / 2.0;
        if internal > 0.0 {
            external.weight / internal
        } else {
            external.weight
        }
    }
}

/// Relative closeness: the mean weight of the edges between two clusters over
/// the size-weighted mean of their internal closeness.
///
/// When both clusters have no internal closeness the mean external weight
/// itself is the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct Closeness;

impl Closeness {
    /// The registry name.
    pub const NAME: &'static str = "closeness";
}

impl MergeEvaluation for Closeness {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, a: &GraphCluster, b: &GraphCluster, external: &ExternalProperties) -> f64 {
        let (ma, mb) = (a.cardinality().as_f64(), b.cardinality().as_f64());
        let internal = (ma / (ma + mb)).mul_add(a.closeness(), (mb / (ma + mb)) * b.closeness());
        if internal > 0.0 {
            external.mean_weight() / internal
        } else {
            external.mean_weight()
        }
    }
}

/// The product of relative interconnectivity and relative closeness, with
/// closeness raised to a priority.
#[derive(Debug, Clone, Copy)]
pub struct RiRcSimilarity {
    /// The exponent of the relative closeness.
    closeness_priority: f64,
}

impl RiRcSimilarity {
    /// The registry name.
    pub const NAME: &'static str = "ri-rc";

    /// Creates the score with the given closeness priority.
    #[must_use]
    pub const fn new(closeness_priority: f64) -> Self {
        Self { closeness_priority }
    }
}

impl Default for RiRcSimilarity {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl MergeEvaluation for RiRcSimilarity {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, a: &GraphCluster, b: &GraphCluster, external: &ExternalProperties) -> f64 {
        let ri = Interconnectivity.score(a, b, external);
        let rc = Closeness.score(a, b, external);
        ri * rc.powf(self.closeness_priority)
    }
}

/// The product of several maximized objectives, each raised to its own
/// priority.
pub struct WeightedObjectives {
    /// The objectives and their exponents.
    objectives: Vec<(Box<dyn MergeEvaluation>, f64)>,
}

impl WeightedObjectives {
    /// The registry name.
    pub const NAME: &'static str = "weighted-objectives";

    /// Creates the score from `(objective, priority)` pairs.
    #[must_use]
    pub fn new(objectives: Vec<(Box<dyn MergeEvaluation>, f64)>) -> Self {
        Self { objectives }
    }

    /// Relative interconnectivity and relative closeness with the given
    /// priorities.
    #[must_use]
    pub fn chameleon(interconnectivity_priority: f64, closeness_priority: f64) -> Self {
        Self::new(vec![
            (Box::new(Interconnectivity), interconnectivity_priority),
            (Box::new(Closeness), closeness_priority),
        ])
    }
}

impl MergeEvaluation for WeightedObjectives {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, a: &GraphCluster, b: &GraphCluster, external: &ExternalProperties) -> f64 {
        self.objectives
            .iter()
            .map(|(objective, priority)| objective.score(a, b, external).powf(*priority))
            .product()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::{chameleon::Bisection, Graph, WeightedGraph};

    struct Halves;

    impl Bisection for Halves {
        fn bisect<G: Graph + ?Sized>(&self, nodes: &[usize], _: &G) -> (Vec<usize>, Vec<usize>) {
            let (a, b) = nodes.split_at(nodes.len() / 2);
            (a.to_vec(), b.to_vec())
        }
    }

    #[test]
    fn relative_scores() {
        // Two triangles joined by a single edge of weight 1.
        let graph = WeightedGraph::from_edges(
            6,
            &[
                (0, 1, 4.0),
                (1, 2, 4.0),
                (0, 2, 2.0),
                (3, 4, 2.0),
                (4, 5, 2.0),
                (3, 5, 2.0),
                (2, 3, 1.0),
            ],
        );
        let a = GraphCluster::new(0, vec![0, 1, 2], &graph, &Halves);
        let b = GraphCluster::new(1, vec![3, 4, 5], &graph, &Halves);
        // {0} | {1, 2} cuts (0, 1) and (0, 2); {3} | {4, 5} cuts (3, 4) and (3, 5).
        assert!(approx_eq!(f64, a.interconnectivity(), 6.0));
        assert!(approx_eq!(f64, a.closeness(), 3.0));
        assert!(approx_eq!(f64, b.interconnectivity(), 4.0));
        assert!(approx_eq!(f64, b.closeness(), 2.0));

        let external = ExternalProperties { weight: 1.0, edges: 1 };
        let ri = Interconnectivity.score(&a, &b, &external);
        let rc = Closeness.score(&a, &b, &external);
        assert!(approx_eq!(f64, ri, 0.2, epsilon = 1e-12));
        assert!(approx_eq!(f64, rc, 0.4, epsilon = 1e-12));
        assert!(approx_eq!(f64, RiRcSimilarity::new(2.0).score(&a, &b, &external), 0.2 * 0.16, epsilon = 1e-12));
        let weighted = WeightedObjectives::chameleon(1.0, 2.0).score(&a, &b, &external);
        assert!(approx_eq!(f64, weighted, 0.2 * 0.16, epsilon = 1e-12));
    }

    #[test]
    fn singletons_fall_back_to_raw_weights() {
        let graph = WeightedGraph::from_edges(2, &[(0, 1, 0.5)]);
        let a = GraphCluster::new(0, vec![0], &graph, &Halves);
        let b = GraphCluster::new(1, vec![1], &graph, &Halves);
        let external = ExternalProperties { weight: 0.5, edges: 1 };
        assert!(approx_eq!(f64, Interconnectivity.score(&a, &b, &external), 0.5));
        assert!(approx_eq!(f64, Closeness.score(&a, &b, &external), 0.5));
    }
}
