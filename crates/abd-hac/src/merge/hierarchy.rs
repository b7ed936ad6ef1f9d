//! End-to-end hierarchical clustering: proximities, merges and the tree.

use std::collections::HashMap;

use distances::Number;

use crate::{
    registry::ParamKind, Cluster, Clustering, Dataset, DendroTree, HacError, Linkage, Metric, ParamSpec,
    Parameterized, ProximityMatrix, Registry, Result,
};

use super::{CancelFlag, MergeEvent, MergeScheduler};

/// Configuration of [`HierarchicalClustering`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HacConfig {
    /// The name of the linkage.
    pub linkage: String,
    /// Whether the item proximities are kept on the result. Cutoff searches
    /// that score clusterings need them.
    pub keep_proximity: bool,
    /// Whether the proximity matrix is computed in parallel.
    pub parallel: bool,
}

impl Default for HacConfig {
    fn default() -> Self {
        Self {
            linkage: "single".to_string(),
            keep_proximity: false,
            parallel: true,
        }
    }
}

/// Parameters of [`HacConfig`].
const HAC_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "linkage",
        kind: ParamKind::Choice(&["single", "complete", "average", "weighted", "centroid", "median", "ward"]),
        min: None,
        max: None,
        description: "rule for the proximity between clusters",
    },
    ParamSpec {
        name: "keep_proximity",
        kind: ParamKind::Bool,
        min: None,
        max: None,
        description: "keep the proximity matrix for cutoff searches",
    },
    ParamSpec {
        name: "parallel",
        kind: ParamKind::Bool,
        min: None,
        max: None,
        description: "compute the proximity matrix in parallel",
    },
];

impl Parameterized for HacConfig {
    fn params(&self) -> &'static [ParamSpec] {
        HAC_PARAMS
    }

    fn validate(&self) -> Result<()> {
        HAC_PARAMS
            .iter()
            .find(|p| p.name == "linkage")
            .map_or(Ok(()), |p| p.check_choice(&self.linkage))
    }
}

/// Agglomerative clustering of a dataset under a Lance–Williams linkage.
pub struct HierarchicalClustering {
    /// The configuration.
    config: HacConfig,
    /// The linkage named in the configuration.
    linkage: Box<dyn Linkage>,
}

impl HierarchicalClustering {
    /// Creates the algorithm from a configuration.
    ///
    /// # Errors
    ///
    /// - `UnknownComponent` if the linkage is not registered.
    pub fn new(config: HacConfig) -> Result<Self> {
        let linkage = Registry::with_defaults().linkage(&config.linkage)?;
        Ok(Self { config, linkage })
    }

    /// Creates the algorithm around a linkage that need not be registered.
    #[must_use]
    pub fn with_linkage(linkage: Box<dyn Linkage>, keep_proximity: bool) -> Self {
        let config = HacConfig {
            linkage: linkage.name().to_string(),
            keep_proximity,
            ..HacConfig::default()
        };
        Self { config, linkage }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &HacConfig {
        &self.config
    }

    /// The linkage.
    #[must_use]
    pub fn linkage(&self) -> &dyn Linkage {
        self.linkage.as_ref()
    }

    /// Clusters the items of a dataset.
    ///
    /// # Errors
    ///
    /// See [`HierarchicalClustering::from_proximity`].
    pub fn hierarchy<I, T, D, M>(&self, data: &D, metric: &M) -> Result<HierarchicalResult>
    where
        I: Send + Sync,
        T: Number,
        D: Dataset<I> + Sync + ?Sized,
        M: Metric<I, T> + Sync,
    {
        ftlog::info!(
            "Computing proximities between {} items of {} with {} ...",
            data.cardinality(),
            data.name(),
            metric.name()
        );
        let proximity = if self.config.parallel {
            ProximityMatrix::par_from_items(data, metric)
        } else {
            ProximityMatrix::from_items(data, metric)
        };
        self.from_proximity(proximity)
    }

    /// Clusters items given their proximity matrix.
    ///
    /// # Errors
    ///
    /// See [`HierarchicalClustering::from_proximity_with_cancel`].
    pub fn from_proximity(&self, proximity: ProximityMatrix) -> Result<HierarchicalResult> {
        self.from_proximity_with_cancel(proximity, &CancelFlag::new())
    }

    /// Clusters items given their proximity matrix, checking `cancel` once
    /// per merge.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if there are fewer than 2 items.
    /// - `Aborted` if the merge loop fails or is cancelled.
    pub fn from_proximity_with_cancel(&self, proximity: ProximityMatrix, cancel: &CancelFlag) -> Result<HierarchicalResult> {
        let n = proximity.cardinality();
        let clusters = (0..n).map(Cluster::singleton).collect();
        let merges = MergeScheduler::new(self.linkage.as_ref()).run_with_cancel(clusters, &proximity, cancel)?;
        let tree = DendroTree::from_merges(n, &merges)?;
        let leaf_members = (0..n).map(|i| vec![i]).collect();
        let proximity = self.config.keep_proximity.then_some(proximity);
        Ok(HierarchicalResult::new(tree, merges, leaf_members, proximity))
    }

    /// Clusters pre-built groups of items given the proximities between the
    /// groups.
    ///
    /// Leaf `i` of the tree stands for the members of `clusters[i]`. No item
    /// proximities are attached to the result.
    ///
    /// # Errors
    ///
    /// See [`MergeScheduler::run`].
    pub fn from_clusters(&self, clusters: Vec<Cluster>, proximity: &ProximityMatrix) -> Result<HierarchicalResult> {
        let leaf_members = clusters.iter().map(|c| c.members().to_vec()).collect();
        let n = clusters.len();
        let merges = MergeScheduler::new(self.linkage.as_ref()).run(clusters, proximity)?;
        let tree = DendroTree::from_merges(n, &merges)?;
        Ok(HierarchicalResult::new(tree, merges, leaf_members, None))
    }
}

/// The outcome of a hierarchical clustering run.
///
/// Holds the tree, the merge sequence and what is needed to turn a cutoff into
/// a clustering of the items. Owned by one caller; nothing is shared between
/// results.
#[derive(Debug, Clone)]
pub struct HierarchicalResult {
    /// The dendrogram.
    tree: DendroTree,
    /// The merges, in emission order.
    merges: Vec<MergeEvent>,
    /// The items each leaf stands for.
    leaf_members: Vec<Vec<usize>>,
    /// The item proximities, if kept.
    proximity: Option<ProximityMatrix>,
    /// The clustering under the current cutoff.
    clustering: Option<Clustering>,
    /// Scores by evaluator name and cluster count.
    scores: HashMap<(String, usize), f64>,
}

impl HierarchicalResult {
    /// Bundles a tree with its merges and leaf membership.
    #[must_use]
    pub fn new(
        tree: DendroTree,
        merges: Vec<MergeEvent>,
        leaf_members: Vec<Vec<usize>>,
        proximity: Option<ProximityMatrix>,
    ) -> Self {
        if tree.has_inversions() {
            ftlog::warn!("The tree over {} leaves has inversions", tree.num_leaves());
        }
        Self {
            tree,
            merges,
            leaf_members,
            proximity,
            clustering: None,
            scores: HashMap::new(),
        }
    }

    /// The dendrogram.
    #[must_use]
    pub const fn tree(&self) -> &DendroTree {
        &self.tree
    }

    /// The merges, in emission order.
    #[must_use]
    pub fn merges(&self) -> &[MergeEvent] {
        &self.merges
    }

    /// The items each leaf stands for.
    #[must_use]
    pub fn leaf_members(&self) -> &[Vec<usize>] {
        &self.leaf_members
    }

    /// The number of clustered items.
    #[must_use]
    pub fn num_items(&self) -> usize {
        self.leaf_members.iter().map(Vec::len).sum()
    }

    /// The item proximities, if kept.
    #[must_use]
    pub const fn proximity(&self) -> Option<&ProximityMatrix> {
        self.proximity.as_ref()
    }

    /// Attaches item proximities, e.g. to a result of graph-based merging.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the matrix has no row for some clustered item.
    pub fn set_proximity(&mut self, proximity: ProximityMatrix) -> Result<()> {
        let needed = self.leaf_members.iter().flatten().max().map_or(0, |&m| m + 1);
        if proximity.cardinality() < needed {
            return Err(HacError::InvalidParameter {
                name: "proximity",
                message: format!("expected at least {needed} rows, got {}", proximity.cardinality()),
            });
        }
        self.proximity = Some(proximity);
        Ok(())
    }

    /// Whether some merge sits lower than one of its children.
    #[must_use]
    pub fn has_inversions(&self) -> bool {
        self.tree.has_inversions()
    }

    /// The current cutoff, if any.
    #[must_use]
    pub const fn cutoff(&self) -> Option<f64> {
        self.tree.cutoff()
    }

    /// Sets the cutoff and returns the clustering it induces.
    pub fn set_cutoff(&mut self, cutoff: f64) -> &Clustering {
        let assignment = self.tree.set_cutoff(cutoff);
        let clustering = Clustering::from_assignment(assignment, Some(&self.leaf_members));
        self.clustering.insert(clustering)
    }

    /// The clustering under the current cutoff, if any.
    #[must_use]
    pub const fn clustering(&self) -> Option<&Clustering> {
        self.clustering.as_ref()
    }

    /// The clustering induced by `cutoff`, without changing the current one.
    #[must_use]
    pub fn clustering_at(&self, cutoff: f64) -> Clustering {
        let assignment = self.tree.cluster_assignment(cutoff);
        Clustering::from_assignment(&assignment, Some(&self.leaf_members))
    }

    /// Whether a score is cached for the evaluator and cluster count.
    #[must_use]
    pub fn is_score_cached(&self, evaluator: &str, clusters: usize) -> bool {
        self.score(evaluator, clusters).is_some()
    }

    /// The cached score for the evaluator and cluster count.
    #[must_use]
    pub fn score(&self, evaluator: &str, clusters: usize) -> Option<f64> {
        self.scores.get(&(evaluator.to_string(), clusters)).copied()
    }

    /// Caches a score. Existing scores are kept.
    pub fn set_score(&mut self, evaluator: &str, clusters: usize, score: f64) {
        self.scores.entry((evaluator.to_string(), clusters)).or_insert(score);
    }

    /// The number of cached scores.
    #[must_use]
    pub fn num_cached_scores(&self) -> usize {
        self.scores.len()
    }
}
