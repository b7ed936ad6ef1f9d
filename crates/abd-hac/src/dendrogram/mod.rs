//! The Dendrogram Tree: a compact array-based binary merge tree.
//!
//! For `N` leaves the tree has `2N - 1` nodes. Ids `0..N` are the leaves and
//! the `k`-th merge creates the internal node `N + k`, so the root is always
//! node `2N - 2` and every child id is smaller than its parent's. `order`
//! lists the internal nodes by ascending height, ties in merge order.

mod builder;
mod cophenetic;
mod io;

pub use builder::DendroTreeBuilder;
pub use cophenetic::cophenetic_correlation;
pub use io::{DiskIO, TreeArrays};

use distances::Number;

use crate::{MergeEvent, Result};

/// A dendrogram built from a complete merge sequence.
///
/// Queries on an empty tree (e.g. [`DendroTree::default`]) return empty
/// results instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DendroTree {
    /// The number of leaves.
    num_leaves: usize,
    /// The left child of every node, `None` for leaves.
    left: Vec<Option<usize>>,
    /// The right child of every node, `None` for leaves.
    right: Vec<Option<usize>>,
    /// The merge height of every node, `0` for leaves.
    height: Vec<f64>,
    /// Internal node ids sorted by height.
    order: Vec<usize>,
    /// The current cutoff, if one was set.
    cutoff: Option<f64>,
    /// Cluster labels of the leaves under the current cutoff.
    assignment: Option<Vec<usize>>,
}

impl DendroTree {
    /// Starts building a tree over `num_leaves` leaves.
    #[must_use]
    pub fn builder(num_leaves: usize) -> DendroTreeBuilder {
        DendroTreeBuilder::new(num_leaves)
    }

    /// Builds a tree from a complete merge sequence.
    ///
    /// # Errors
    ///
    /// See [`DendroTreeBuilder::push`] and [`DendroTreeBuilder::build`].
    pub fn from_merges(num_leaves: usize, merges: &[MergeEvent]) -> Result<Self> {
        let mut builder = Self::builder(num_leaves);
        for &event in merges {
            builder.push(event)?;
        }
        builder.build()
    }

    /// Assembles a tree from validated arrays and computes its level order.
    pub(crate) fn from_parts(
        num_leaves: usize,
        left: Vec<Option<usize>>,
        right: Vec<Option<usize>>,
        height: Vec<f64>,
    ) -> Self {
        let mut order = (num_leaves..height.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| height[a].total_cmp(&height[b]));
        Self {
            num_leaves,
            left,
            right,
            height,
            order,
            cutoff: None,
            assignment: None,
        }
    }

    /// The number of leaves.
    #[must_use]
    pub const fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// The number of nodes, leaves included.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.height.len()
    }

    /// The number of merge levels, i.e. the number of internal nodes.
    #[must_use]
    pub fn tree_levels(&self) -> usize {
        self.order.len()
    }

    /// Whether the tree has no leaves.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.num_leaves == 0
    }

    /// The root node, `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<usize> {
        self.num_nodes().checked_sub(1)
    }

    /// The left child of a node.
    #[must_use]
    pub fn left(&self, node: usize) -> Option<usize> {
        self.left.get(node).copied().flatten()
    }

    /// The right child of a node.
    #[must_use]
    pub fn right(&self, node: usize) -> Option<usize> {
        self.right.get(node).copied().flatten()
    }

    /// The height of a node. Leaves and unknown nodes have height `0`.
    #[must_use]
    pub fn height(&self, node: usize) -> f64 {
        self.height.get(node).copied().unwrap_or_default()
    }

    /// The heights of all nodes.
    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.height
    }

    /// The internal node ids by ascending height.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Whether `node` is a leaf.
    #[must_use]
    pub const fn is_leaf(&self, node: usize) -> bool {
        node < self.num_leaves
    }

    /// The lowest merge height, `0` if there are no merges.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.order.first().map_or(0.0, |&i| self.height[i])
    }

    /// The highest merge height, `0` if there are no merges.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.order.last().map_or(0.0, |&i| self.height[i])
    }

    /// Whether all merges happened at the same height.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        (self.max_height() - self.min_height()).abs() <= f64::EPSILON
    }

    /// Whether some node sits lower than one of its children.
    #[must_use]
    pub fn has_inversions(&self) -> bool {
        (self.num_leaves..self.num_nodes()).any(|i| {
            [self.left(i), self.right(i)]
                .into_iter()
                .flatten()
                .any(|c| self.height[c] > self.height[i])
        })
    }

    /// A cutoff halfway between the merge at `level` and the one below it.
    ///
    /// Level `0` is the lowest merge and `tree_levels() - 1` the root. Cutting
    /// at level `l` leaves `tree_levels() - l + 1` clusters in a monotone
    /// tree. Levels outside the tree give `0`.
    #[must_use]
    pub fn cut_tree_by_level(&self, level: usize) -> f64 {
        if level >= self.tree_levels() {
            return 0.0;
        }
        let upper = self.height[self.order[level]];
        let lower = if level == 0 {
            0.0
        } else {
            self.height[self.order[level - 1]]
        };
        lower + (upper - lower) / 2.0
    }

    /// Labels every leaf with the cluster it falls in under `cutoff`.
    ///
    /// Walking down from the root, the first node lower than `cutoff` heads a
    /// cluster holding all the leaves beneath it. A leaf reached without such
    /// a node forms a cluster of its own. Labels are numbered from `0`, left to
    /// right.
    #[must_use]
    pub fn cluster_assignment(&self, cutoff: f64) -> Vec<usize> {
        let mut assignment = vec![0; self.num_leaves];
        let Some(root) = self.root() else {
            return assignment;
        };

        let mut label = 0;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.is_leaf(node) || self.height[node] < cutoff {
                for leaf in self.subtree_leaves(node) {
                    assignment[leaf] = label;
                }
                label += 1;
            } else {
                stack.extend(self.right(node));
                stack.extend(self.left(node));
            }
        }
        assignment
    }

    /// The number of clusters under `cutoff`.
    #[must_use]
    pub fn num_clusters(&self, cutoff: f64) -> usize {
        self.cluster_assignment(cutoff).into_iter().max().map_or(0, |m| m + 1)
    }

    /// Sets the cutoff and recomputes the cached assignment.
    pub fn set_cutoff(&mut self, cutoff: f64) -> &[usize] {
        self.cutoff = Some(cutoff);
        self.assignment.insert(self.cluster_assignment(cutoff))
    }

    /// The current cutoff, if any.
    #[must_use]
    pub const fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    /// The assignment under the current cutoff, if any.
    #[must_use]
    pub fn assignment(&self) -> Option<&[usize]> {
        self.assignment.as_deref()
    }

    /// The leaves in left-to-right drawing order.
    #[must_use]
    pub fn leaf_order(&self) -> Vec<usize> {
        self.root().map_or_else(Vec::new, |root| self.subtree_leaves(root))
    }

    /// The horizontal position of every node when drawn.
    ///
    /// Leaves sit at their rank in [`DendroTree::leaf_order`] and every
    /// internal node sits midway between its children.
    #[must_use]
    pub fn node_positions(&self) -> Vec<f64> {
        let mut positions = vec![0.0; self.num_nodes()];
        for (rank, leaf) in self.leaf_order().into_iter().enumerate() {
            positions[leaf] = rank.as_f64();
        }
        for node in self.num_leaves..self.num_nodes() {
            if let (Some(l), Some(r)) = (self.left(node), self.right(node)) {
                positions[node] = (positions[l] + positions[r]) / 2.0;
            }
        }
        positions
    }

    /// The leaves under `node`, left to right.
    #[must_use]
    pub fn subtree_leaves(&self, node: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if self.is_leaf(n) {
                leaves.push(n);
            } else {
                stack.extend(self.right(n));
                stack.extend(self.left(n));
            }
        }
        leaves
    }

    /// The parent of every node, `None` for the root.
    fn parents(&self) -> Vec<Option<usize>> {
        let mut parents = vec![None; self.num_nodes()];
        for node in self.num_leaves..self.num_nodes() {
            for child in [self.left(node), self.right(node)].into_iter().flatten() {
                parents[child] = Some(node);
            }
        }
        parents
    }
}
