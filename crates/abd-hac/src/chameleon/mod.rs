//! Graph-based agglomerative merging in the manner of Chameleon.
//!
//! The items are the nodes of a weighted graph, pre-partitioned into small
//! initial clusters. Each pair of clusters is scored from the edges between
//! them relative to the edges inside each cluster, and the best pair is merged
//! with the same queue and blacklist discipline as [`MergeScheduler`].
//!
//! Merge heights are cumulative (`h_k = h_{k-1} + |score_k|`), so the tree is
//! monotone whatever the scores.
//!
//! [`MergeScheduler`]: crate::MergeScheduler

use std::collections::HashMap;

mod cluster;
mod evaluation;

pub use cluster::{ExternalProperties, GraphCluster};
pub use evaluation::{Closeness, Interconnectivity, MergeEvaluation, RiRcSimilarity, WeightedObjectives};

use crate::{
    merge::CandidateQueue, registry::ParamKind, CancelFlag, DendroTree, Graph, HacError, HierarchicalResult, MergeEvent,
    ParamSpec, Parameterized, Registry, Result,
};

/// Splits a set of graph nodes in two.
///
/// Partitioning is left to the caller, e.g. a min-cut or spectral bisection.
pub trait Bisection {
    /// Splits `nodes` into two parts.
    fn bisect<G: Graph + ?Sized>(&self, nodes: &[usize], graph: &G) -> (Vec<usize>, Vec<usize>);
}

/// Configuration of the graph-based merger.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChameleonConfig {
    /// The name of the merge evaluation.
    pub similarity: String,
    /// The exponent of the relative closeness.
    pub closeness_priority: f64,
    /// The exponent of the relative interconnectivity.
    pub interconnectivity_priority: f64,
}

impl Default for ChameleonConfig {
    fn default() -> Self {
        Self {
            similarity: RiRcSimilarity::NAME.to_string(),
            closeness_priority: 2.0,
            interconnectivity_priority: 1.0,
        }
    }
}

/// Parameters of [`ChameleonConfig`].
const CHAMELEON_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "similarity",
        kind: ParamKind::Choice(&[
            Interconnectivity::NAME,
            Closeness::NAME,
            RiRcSimilarity::NAME,
            WeightedObjectives::NAME,
        ]),
        min: None,
        max: None,
        description: "score used to pick the next pair of clusters",
    },
    ParamSpec {
        name: "closeness_priority",
        kind: ParamKind::Real,
        min: Some(0.0),
        max: Some(10.0),
        description: "exponent of the relative closeness",
    },
    ParamSpec {
        name: "interconnectivity_priority",
        kind: ParamKind::Real,
        min: Some(0.0),
        max: Some(10.0),
        description: "exponent of the relative interconnectivity",
    },
];

impl Parameterized for ChameleonConfig {
    fn params(&self) -> &'static [ParamSpec] {
        CHAMELEON_PARAMS
    }

    fn validate(&self) -> Result<()> {
        let [similarity, closeness, interconnectivity] = CHAMELEON_PARAMS else {
            return Ok(());
        };
        similarity.check_choice(&self.similarity)?;
        closeness.check_range(self.closeness_priority)?;
        interconnectivity.check_range(self.interconnectivity_priority)
    }
}

/// The unordered key of a pair of cluster ids.
const fn pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Merges graph clusters by a [`MergeEvaluation`].
pub struct GraphMerger<'a, G: Graph + ?Sized, B: Bisection> {
    /// The item graph.
    graph: &'a G,
    /// Measures the internal properties of clusters.
    bisection: &'a B,
    /// Scores candidate pairs.
    evaluation: Box<dyn MergeEvaluation>,
}

impl<'a, G: Graph + ?Sized, B: Bisection> GraphMerger<'a, G, B> {
    /// Creates a merger.
    pub fn new(graph: &'a G, bisection: &'a B, evaluation: Box<dyn MergeEvaluation>) -> Self {
        Self {
            graph,
            bisection,
            evaluation,
        }
    }

    /// Creates a merger with the evaluation named in the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if a priority is out of range.
    /// - `UnknownComponent` if the evaluation is not registered.
    pub fn from_config(graph: &'a G, bisection: &'a B, config: &ChameleonConfig) -> Result<Self> {
        config.validate()?;
        let evaluation = Registry::with_defaults().merge_evaluation(config)?;
        Ok(Self::new(graph, bisection, evaluation))
    }

    /// The merge evaluation.
    #[must_use]
    pub fn evaluation(&self) -> &dyn MergeEvaluation {
        self.evaluation.as_ref()
    }

    /// Merges the partitions until one remains.
    ///
    /// # Errors
    ///
    /// See [`GraphMerger::run_with_cancel`].
    pub fn run(&self, partitions: Vec<Vec<usize>>) -> Result<Vec<MergeEvent>> {
        self.run_with_cancel(partitions, &CancelFlag::new())
    }

    /// Merges the partitions until one remains, checking `cancel` once per
    /// merge.
    ///
    /// Partition `i` becomes cluster `i`; merged clusters get the ids
    /// `n, n + 1, ...`.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if there are fewer than 2 partitions.
    /// - `InvalidParameter` if a node is unknown or in two partitions.
    /// - `Aborted` wrapping `Cancelled`, `SameClusterMerge` or
    ///   `NonFiniteScore`, together with the merges completed before it.
    pub fn run_with_cancel(&self, partitions: Vec<Vec<usize>>, cancel: &CancelFlag) -> Result<Vec<MergeEvent>> {
        let n = partitions.len();
        if n < 2 {
            return Err(HacError::EmptyInput(n));
        }

        let mut owner = vec![None; self.graph.node_count()];
        for (id, part) in partitions.iter().enumerate() {
            for &u in part {
                match owner.get_mut(u) {
                    Some(slot) if slot.is_none() => *slot = Some(id),
                    _ => {
                        return Err(HacError::InvalidParameter {
                            name: "partitions",
                            message: format!("node {u} is unknown or in more than one partition"),
                        })
                    }
                }
            }
        }

        ftlog::info!("Merging {n} graph partitions by {} ...", self.evaluation.name());

        let mut external = HashMap::<(usize, usize), ExternalProperties>::new();
        for (u, &cu) in owner.iter().enumerate() {
            let Some(cu) = cu else {
                continue;
            };
            for &(v, w) in self.graph.neighbors(u) {
                match owner.get(v).copied().flatten() {
                    Some(cv) if v > u && cv != cu => {
                        let e = external.entry(pair(cu, cv)).or_default();
                        e.weight += w;
                        e.edges += 1;
                    }
                    _ => (),
                }
            }
        }

        let mut clusters = partitions
            .into_iter()
            .enumerate()
            .map(|(id, members)| Some(GraphCluster::new(id, members, self.graph, self.bisection)))
            .collect::<Vec<_>>();

        let mut queue = CandidateQueue::with_capacity(n * (n - 1) / 2, self.evaluation.direction());
        for (i, ci) in clusters.iter().enumerate().filter_map(|(i, c)| c.as_ref().map(|c| (i, c))) {
            for (j, cj) in clusters[..i].iter().enumerate().filter_map(|(j, c)| c.as_ref().map(|c| (j, c))) {
                let e = external.get(&pair(i, j)).copied().unwrap_or_default();
                queue.push(j, i, self.evaluation.score(cj, ci, &e));
            }
        }

        let mut merges = Vec::with_capacity(n - 1);
        let mut height = 0.0;
        while merges.len() < n - 1 {
            if cancel.is_cancelled() {
                ftlog::warn!("Graph merging cancelled after {} of {} merges", merges.len(), n - 1);
                return Err(HacError::Cancelled.aborted(merges));
            }

            let (a, b, score) = match queue.pop_valid() {
                Ok(Some(candidate)) => candidate,
                Ok(None) => {
                    let err = HacError::IncompleteTree {
                        leaves: n,
                        merges: merges.len(),
                    };
                    return Err(err.aborted(merges));
                }
                Err(e) => return Err(e.aborted(merges)),
            };
            if !score.is_finite() {
                let err = HacError::NonFiniteScore {
                    evaluator: self.evaluation.name().to_string(),
                    clusters: n - merges.len(),
                    score,
                };
                return Err(err.aborted(merges));
            }

            let new_id = n + merges.len();
            let (Some(ca), Some(cb)) = (clusters[a].take(), clusters[b].take()) else {
                return Err(HacError::SameClusterMerge(a).aborted(merges));
            };
            let (mut members, smaller) = if ca.cardinality() >= cb.cardinality() {
                (ca.into_members(), cb.into_members())
            } else {
                (cb.into_members(), ca.into_members())
            };
            members.extend(smaller);
            let q = GraphCluster::new(new_id, members, self.graph, self.bisection);

            queue.blacklist(a);
            queue.blacklist(b);
            external.remove(&pair(a, b));
            for (x, other) in clusters.iter().enumerate() {
                let Some(other) = other else {
                    continue;
                };
                let ea = external.remove(&pair(a, x)).unwrap_or_default();
                let eb = external.remove(&pair(b, x)).unwrap_or_default();
                let e = ea.combine(eb);
                queue.push(x, new_id, self.evaluation.score(&q, other, &e));
                if e.edges > 0 {
                    external.insert(pair(x, new_id), e);
                }
            }
            clusters.push(Some(q));

            height += score.abs();
            ftlog::trace!("Merged {a} and {b} into {new_id}, score {score}");
            merges.push(MergeEvent::new(a, b, height, new_id));
        }

        Ok(merges)
    }

    /// Merges the partitions and builds the tree.
    ///
    /// Leaf `i` of the tree stands for the nodes of partition `i`. No
    /// proximity matrix is attached to the result.
    ///
    /// # Errors
    ///
    /// See [`GraphMerger::run_with_cancel`].
    pub fn hierarchy(&self, partitions: Vec<Vec<usize>>) -> Result<HierarchicalResult> {
        let leaf_members = partitions.clone();
        let n = partitions.len();
        let merges = self.run(partitions)?;
        let tree = DendroTree::from_merges(n, &merges)?;
        Ok(HierarchicalResult::new(tree, merges, leaf_members, None))
    }
}
