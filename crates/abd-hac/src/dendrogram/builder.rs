//! Incremental construction of a `DendroTree` from merge events.

use crate::{HacError, MergeEvent, Result};

use super::DendroTree;

/// Consumes merge events in emission order and produces a [`DendroTree`].
#[derive(Debug, Clone)]
pub struct DendroTreeBuilder {
    /// The number of leaves.
    num_leaves: usize,
    /// Left children, one entry per node seen so far.
    left: Vec<Option<usize>>,
    /// Right children, one entry per node seen so far.
    right: Vec<Option<usize>>,
    /// Heights, one entry per node seen so far.
    height: Vec<f64>,
    /// Whether each node already has a parent.
    has_parent: Vec<bool>,
}

impl DendroTreeBuilder {
    /// Creates a builder over `num_leaves` leaves.
    #[must_use]
    pub fn new(num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        let mut left = Vec::with_capacity(capacity);
        left.resize(num_leaves, None);
        let right = left.clone();
        let mut height = Vec::with_capacity(capacity);
        height.resize(num_leaves, 0.0);
        let mut has_parent = Vec::with_capacity(capacity);
        has_parent.resize(num_leaves, false);
        Self {
            num_leaves,
            left,
            right,
            height,
            has_parent,
        }
    }

    /// The number of merges pushed so far.
    #[must_use]
    pub fn num_merges(&self) -> usize {
        self.height.len() - self.num_leaves
    }

    /// Whether every merge has been pushed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.num_leaves > 0 && self.num_merges() == self.num_leaves - 1
    }

    /// Records the next merge.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the new id is not the next node id, if a child
    ///   is unknown or already merged, or if the tree is already complete.
    pub fn push(&mut self, event: MergeEvent) -> Result<()> {
        let node = self.height.len();
        let invalid = |message: String| HacError::InvalidParameter { name: "merge", message };

        if self.is_complete() || self.num_leaves == 0 {
            return Err(invalid(format!("no merge expected after {} merges", self.num_merges())));
        }
        if event.new_id != node {
            return Err(invalid(format!("expected new id {node}, got {}", event.new_id)));
        }
        for child in [event.a, event.b] {
            if child >= node || self.has_parent[child] {
                return Err(invalid(format!("cluster {child} is not active before merge {node}")));
            }
        }
        if event.a == event.b {
            return Err(HacError::SameClusterMerge(event.a));
        }

        self.has_parent[event.a] = true;
        self.has_parent[event.b] = true;
        self.left.push(Some(event.a));
        self.right.push(Some(event.b));
        self.height.push(event.height);
        self.has_parent.push(false);
        Ok(())
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if there are no leaves.
    /// - `IncompleteTree` if fewer than `num_leaves - 1` merges were pushed.
    pub fn build(self) -> Result<DendroTree> {
        if self.num_leaves == 0 {
            return Err(HacError::EmptyInput(0));
        }
        if !self.is_complete() {
            return Err(HacError::IncompleteTree {
                leaves: self.num_leaves,
                merges: self.num_merges(),
            });
        }
        Ok(DendroTree::from_parts(self.num_leaves, self.left, self.right, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_trees_are_rejected() {
        let mut builder = DendroTree::builder(3);
        assert!(builder.push(MergeEvent::new(0, 2, 1.0, 3)).is_ok());
        assert!(!builder.is_complete());
        assert!(matches!(
            builder.build(),
            Err(HacError::IncompleteTree { leaves: 3, merges: 1 })
        ));
    }

    #[test]
    fn bad_events_are_rejected() {
        let mut builder = DendroTree::builder(3);
        assert!(builder.push(MergeEvent::new(0, 1, 1.0, 4)).is_err());
        assert!(builder.push(MergeEvent::new(0, 3, 1.0, 3)).is_err());
        assert!(builder.push(MergeEvent::new(1, 1, 1.0, 3)).is_err());
        assert!(builder.push(MergeEvent::new(0, 1, 1.0, 3)).is_ok());
        assert!(builder.push(MergeEvent::new(0, 2, 1.0, 4)).is_err());
        assert!(builder.push(MergeEvent::new(2, 3, 2.0, 4)).is_ok());
        assert!(builder.push(MergeEvent::new(4, 4, 3.0, 5)).is_err());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn single_leaf() {
        let tree = DendroTree::from_merges(1, &[]).unwrap_or_else(|_| unreachable!());
        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.tree_levels(), 0);
        assert_eq!(tree.cluster_assignment(1.0), vec![0]);
        assert!(matches!(DendroTree::from_merges(0, &[]), Err(HacError::EmptyInput(0))));
    }
}
