//! Clusters of items and flat clusterings.

/// A set of item indices with a unique id assigned in creation order.
///
/// Singleton (initial) clusters have no children; composite clusters own the
/// ids of exactly the two clusters they were merged from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// The id of the cluster. Ids are never reused.
    id: usize,
    /// The indices of the items in the cluster.
    members: Vec<usize>,
    /// The ids of the two merged clusters, if this is a composite cluster.
    children: Option<[usize; 2]>,
}

impl Cluster {
    /// Creates an initial cluster.
    #[must_use]
    pub const fn new(id: usize, members: Vec<usize>) -> Self {
        Self {
            id,
            members,
            children: None,
        }
    }

    /// Creates a singleton cluster holding one item whose index equals `id`.
    #[must_use]
    pub fn singleton(id: usize) -> Self {
        Self::new(id, vec![id])
    }

    /// Merges two clusters into a new one with the given id.
    ///
    /// The member list of the larger cluster is reused and the members of the
    /// smaller one are appended. The member sets of active clusters are
    /// disjoint, so no duplicate check is needed.
    #[must_use]
    pub fn merge(id: usize, a: Self, b: Self) -> Self {
        let children = Some([a.id, b.id]);
        let (mut large, small) = if a.members.len() >= b.members.len() {
            (a.members, b.members)
        } else {
            (b.members, a.members)
        };
        large.extend(small);
        Self {
            id,
            members: large,
            children,
        }
    }

    /// The id of the cluster.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The indices of the items in the cluster.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The number of items in the cluster.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    /// The ids of the merged children, if any.
    #[must_use]
    pub const fn children(&self) -> Option<[usize; 2]> {
        self.children
    }

    /// Whether this is an initial cluster.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.children.is_none()
    }
}

/// A flat partition of items into clusters.
///
/// Item ids need not be contiguous: a clustering of graph partitions only
/// holds the nodes that belong to some partition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clustering {
    /// The item indices of every cluster.
    clusters: Vec<Vec<usize>>,
    /// The clustered items in ascending order.
    items: Vec<usize>,
    /// `labels[p]` is the cluster of `items[p]`.
    labels: Vec<usize>,
}

impl Clustering {
    /// Builds a clustering from per-leaf labels.
    ///
    /// When `leaf_members` is given, leaf `i` stands for all the items in
    /// `leaf_members[i]`; otherwise leaf `i` is item `i`. Labels must be
    /// 0-based and contiguous.
    #[must_use]
    pub fn from_assignment(assignment: &[usize], leaf_members: Option<&[Vec<usize>]>) -> Self {
        let k = assignment.iter().max().map_or(0, |&m| m + 1);
        let mut clusters = vec![Vec::new(); k];
        match leaf_members {
            Some(members) => {
                for (leaf, &label) in assignment.iter().enumerate() {
                    clusters[label].extend_from_slice(&members[leaf]);
                }
            }
            None => {
                for (item, &label) in assignment.iter().enumerate() {
                    clusters[label].push(item);
                }
            }
        }

        let mut pairs = clusters
            .iter()
            .enumerate()
            .flat_map(|(label, items)| items.iter().map(move |&i| (i, label)))
            .collect::<Vec<_>>();
        pairs.sort_unstable();
        let (items, labels) = pairs.into_iter().unzip();

        Self { clusters, items, labels }
    }

    /// The number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether there are no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The number of clustered items.
    #[must_use]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// The item indices of every cluster.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// The clustered items in ascending order.
    #[must_use]
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// The cluster label of every item, in the order of [`Clustering::items`].
    ///
    /// When the items are exactly `0..n`, `labels()[i]` is the label of item `i`.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// The cluster label of an item, if it was clustered.
    #[must_use]
    pub fn label_of(&self, item: usize) -> Option<usize> {
        self.items.binary_search(&item).ok().map(|p| self.labels[p])
    }

    /// The largest clustered item, if any.
    #[must_use]
    pub fn max_item(&self) -> Option<usize> {
        self.items.last().copied()
    }

    /// The sizes of the clusters.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }
}
