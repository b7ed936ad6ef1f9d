//! The Merge Scheduler: repeatedly merges the two most similar active
//! clusters until one cluster remains.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{core::proximity::condensed_len, Cluster, HacError, Linkage, ProximityMatrix, Result};

mod hierarchy;
mod queue;

pub use hierarchy::{HacConfig, HierarchicalClustering, HierarchicalResult};
pub use queue::CandidateQueue;

/// A single merge, in the order in which it was performed.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MergeEvent {
    /// The id of the first merged cluster (the smaller id).
    pub a: usize,
    /// The id of the second merged cluster.
    pub b: usize,
    /// The height at which the merge occurred.
    pub height: f64,
    /// The id of the new cluster.
    pub new_id: usize,
}

impl MergeEvent {
    /// Creates a new merge event.
    #[must_use]
    pub const fn new(a: usize, b: usize, height: f64, new_id: usize) -> Self {
        Self { a, b, height, new_id }
    }
}

/// A cooperative cancellation flag shared between a merge run and its caller.
///
/// Cloning the flag shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. Runs observing it stop before their next merge.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Lowers the flag.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Whether the flag is raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs the agglomerative merge loop under a Lance–Williams linkage.
///
/// The scheduler owns no state between runs. Every run gets its own working
/// copy of the proximity matrix, candidate queue and blacklist, so several
/// runs may proceed on separate threads.
pub struct MergeScheduler<'a, L: Linkage + ?Sized> {
    /// The linkage used to update proximities after each merge.
    linkage: &'a L,
}

impl<'a, L: Linkage + ?Sized> MergeScheduler<'a, L> {
    /// Creates a scheduler for the given linkage.
    pub const fn new(linkage: &'a L) -> Self {
        Self { linkage }
    }

    /// Merges the initial clusters until one remains.
    ///
    /// See [`MergeScheduler::run_with_cancel`].
    ///
    /// # Errors
    ///
    /// See [`MergeScheduler::run_with_cancel`].
    pub fn run(&self, clusters: Vec<Cluster>, proximity: &ProximityMatrix) -> Result<Vec<MergeEvent>> {
        self.run_with_cancel(clusters, proximity, &CancelFlag::new())
    }

    /// Merges the initial clusters until one remains, checking `cancel` once
    /// per merge.
    ///
    /// # Arguments
    ///
    /// * `clusters`: the initial clusters. The cluster at position `i` must
    ///   have id `i`.
    /// * `proximity`: the proximities between the initial clusters.
    /// * `cancel`: a flag the caller may raise to stop the run.
    ///
    /// # Returns
    ///
    /// Exactly `n - 1` merge events for `n` initial clusters. New clusters
    /// receive the ids `n, n + 1, ...` in merge order.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if there are fewer than 2 clusters.
    /// - `InvalidParameter` if the ids or the matrix do not match the clusters.
    /// - `Aborted` wrapping `Cancelled`, `SameClusterMerge` or
    ///   `DegenerateCluster`, together with the merges completed before it.
    pub fn run_with_cancel(
        &self,
        clusters: Vec<Cluster>,
        proximity: &ProximityMatrix,
        cancel: &CancelFlag,
    ) -> Result<Vec<MergeEvent>> {
        let n = clusters.len();
        if n < 2 {
            return Err(HacError::EmptyInput(n));
        }
        if proximity.cardinality() != n {
            return Err(HacError::InvalidParameter {
                name: "proximity",
                message: format!("expected a {n} x {n} matrix, got {}", proximity.cardinality()),
            });
        }
        if let Some((i, c)) = clusters.iter().enumerate().find(|(i, c)| c.id() != *i) {
            return Err(HacError::InvalidParameter {
                name: "clusters",
                message: format!("cluster at position {i} has id {}", c.id()),
            });
        }

        ftlog::info!("Merging {n} clusters with {} linkage ...", self.linkage.name());

        let direction = proximity.direction();
        let mut queue = CandidateQueue::with_capacity(condensed_len(n), direction);
        for (i, j, v) in proximity.pairs() {
            queue.push(i, j, v);
        }
        let mut work = Workspace::new(clusters, proximity.clone());

        let mut merges = Vec::with_capacity(n - 1);
        let mut previous = f64::NEG_INFINITY;
        while merges.len() < n - 1 {
            if cancel.is_cancelled() {
                ftlog::warn!("Merging cancelled after {} of {} merges", merges.len(), n - 1);
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

            let new_id = n + merges.len();
            let updated = match work.merge(a, b, new_id, self.linkage) {
                Ok(updated) => updated,
                Err(e) => return Err(e.aborted(merges)),
            };

            queue.blacklist(a);
            queue.blacklist(b);
            for (x, v) in updated {
                queue.push(new_id, x, v);
            }

            let height = direction.to_height(score);
            if height < previous {
                ftlog::warn!("Inversion at merge {new_id}: height {height} after {previous}");
            }
            previous = height;

            ftlog::trace!("Merged {a} and {b} into {new_id} at {height}");
            merges.push(MergeEvent::new(a, b, height, new_id));
        }

        ftlog::info!(
            "Finished {} merges, discarded {} stale pairs.",
            merges.len(),
            queue.discarded()
        );

        Ok(merges)
    }
}

/// The mutable state of one merge run.
///
/// The working matrix has one slot per initial cluster. A merged cluster
/// takes over the slot of its first child and the slot of the second child
/// is retired.
struct Workspace {
    /// The cluster held in each slot, `None` once the slot is retired.
    clusters: Vec<Option<Cluster>>,
    /// `slot_of[id]` is the slot of the cluster with that id.
    slot_of: Vec<usize>,
    /// The current proximities between the clusters in the slots.
    matrix: ProximityMatrix,
}

impl Workspace {
    /// Creates the workspace for the initial clusters.
    fn new(clusters: Vec<Cluster>, matrix: ProximityMatrix) -> Self {
        let n = clusters.len();
        let mut slot_of = Vec::with_capacity(2 * n - 1);
        slot_of.extend(0..n);
        Self {
            clusters: clusters.into_iter().map(Some).collect(),
            slot_of,
            matrix,
        }
    }

    /// Merges the clusters `a` and `b` into `new_id`.
    ///
    /// Returns the ids of all other active clusters together with their
    /// updated proximity to the new cluster.
    fn merge<L: Linkage + ?Sized>(&mut self, a: usize, b: usize, new_id: usize, linkage: &L) -> Result<Vec<(usize, f64)>> {
        let (sa, sb) = (self.slot_of[a], self.slot_of[b]);
        let ca = self.clusters[sa].take().ok_or(HacError::SameClusterMerge(a))?;
        let cb = self.clusters[sb].take().ok_or(HacError::SameClusterMerge(b))?;
        let (ma, mb) = (ca.cardinality(), cb.cardinality());
        let d_ab = self.matrix.get(sa, sb);
        let direction = self.matrix.direction();

        let mut updated = Vec::new();
        for (x, other) in self.clusters.iter().enumerate() {
            let Some(other) = other else {
                continue;
            };
            let v = linkage.update(
                self.matrix.get(sa, x),
                self.matrix.get(sb, x),
                d_ab,
                (ma, mb, other.cardinality()),
                direction,
            )?;
            updated.push((x, other.id(), v));
        }

        for &(x, _, v) in &updated {
            self.matrix.set(sa, x, v);
        }
        self.clusters[sa] = Some(Cluster::merge(new_id, ca, cb));
        self.slot_of.push(sa);

        Ok(updated.into_iter().map(|(_, id, v)| (id, v)).collect())
    }
}
