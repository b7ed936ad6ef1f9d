//! The priority structure over candidate pairs.

use core::cmp::Ordering;
use std::collections::HashSet;

use priority_queue::PriorityQueue;

use crate::{Direction, HacError, Result};

/// The priority of a candidate pair.
///
/// Better scores compare as greater. Equal scores are broken by the pair
/// itself, lexically smaller pairs first, so runs are reproducible.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// The cached score at the time of insertion.
    score: f64,
    /// The pair, with `pair.0 < pair.1`.
    pair: (usize, usize),
    /// Whether the score is minimized or maximized.
    direction: Direction,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.direction
            .rank(self.score, other.score)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

/// Candidate pairs of clusters, ordered by score, with lazy invalidation.
///
/// Merged clusters are blacklisted instead of having their pairs removed. The
/// stale pairs stay in the queue and are discarded when they surface.
#[derive(Debug, Clone)]
pub struct CandidateQueue {
    /// The pairs and their priorities.
    queue: PriorityQueue<(usize, usize), Candidate>,
    /// Ids of clusters that were merged away.
    blacklist: HashSet<usize>,
    /// Whether scores are minimized or maximized.
    direction: Direction,
    /// The number of stale pairs discarded so far.
    discarded: usize,
}

impl CandidateQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            queue: PriorityQueue::new(),
            blacklist: HashSet::new(),
            direction,
            discarded: 0,
        }
    }

    /// Creates an empty queue with room for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize, direction: Direction) -> Self {
        Self {
            queue: PriorityQueue::with_capacity(capacity),
            ..Self::new(direction)
        }
    }

    /// Inserts a candidate pair. The order of `a` and `b` does not matter.
    ///
    /// Re-inserting a pair replaces its score.
    pub fn push(&mut self, a: usize, b: usize, score: f64) {
        let pair = if a <= b { (a, b) } else { (b, a) };
        let candidate = Candidate {
            score,
            pair,
            direction: self.direction,
        };
        self.queue.push(pair, candidate);
    }

    /// Marks a cluster as merged away.
    pub fn blacklist(&mut self, id: usize) {
        self.blacklist.insert(id);
    }

    /// Whether a cluster was merged away.
    #[must_use]
    pub fn is_blacklisted(&self, id: usize) -> bool {
        self.blacklist.contains(&id)
    }

    /// Pops the best pair whose clusters are both still active.
    ///
    /// Returns `(a, b, score)` with `a < b`, or `None` once the queue holds no
    /// live pairs.
    ///
    /// # Errors
    ///
    /// - `SameClusterMerge` if the best live pair joins a cluster with itself.
    pub fn pop_valid(&mut self) -> Result<Option<(usize, usize, f64)>> {
        while let Some(((a, b), candidate)) = self.queue.pop() {
            if self.is_blacklisted(a) || self.is_blacklisted(b) {
                self.discarded += 1;
                continue;
            }
            if a == b {
                return Err(HacError::SameClusterMerge(a));
            }
            return Ok(Some((a, b, candidate.score)));
        }
        Ok(None)
    }

    /// Drops every stale pair from the queue.
    pub fn purge(&mut self) {
        let before = self.queue.len();
        let queue = core::mem::take(&mut self.queue);
        let blacklist = &self.blacklist;
        self.queue = queue
            .into_iter()
            .filter(|((a, b), _)| !(blacklist.contains(a) || blacklist.contains(b)))
            .collect();
        self.discarded += before - self.queue.len();
    }

    /// The number of pairs whose clusters are both still active.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.queue
            .iter()
            .filter(|((a, b), _)| !(self.is_blacklisted(*a) || self.is_blacklisted(*b)))
            .count()
    }

    /// The number of pairs in the queue, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue holds no pairs at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The number of stale pairs discarded so far.
    #[must_use]
    pub const fn discarded(&self) -> usize {
        self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_best_first() {
        let mut q = CandidateQueue::new(Direction::Minimize);
        q.push(0, 1, 3.0);
        q.push(2, 1, 1.0);
        q.push(0, 2, 2.0);
        assert_eq!(q.pop_valid().ok().flatten(), Some((1, 2, 1.0)));
        assert_eq!(q.pop_valid().ok().flatten(), Some((0, 2, 2.0)));

        let mut q = CandidateQueue::new(Direction::Maximize);
        q.push(0, 1, 3.0);
        q.push(1, 2, 1.0);
        assert_eq!(q.pop_valid().ok().flatten(), Some((0, 1, 3.0)));
    }

    #[test]
    fn ties_break_lexically() {
        let mut q = CandidateQueue::new(Direction::Minimize);
        q.push(3, 4, 1.0);
        q.push(1, 5, 1.0);
        q.push(1, 2, 1.0);
        let order = core::iter::from_fn(|| q.pop_valid().ok().flatten())
            .map(|(a, b, _)| (a, b))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![(1, 2), (1, 5), (3, 4)]);
    }

    #[test]
    fn stale_pairs_are_skipped() {
        let mut q = CandidateQueue::new(Direction::Minimize);
        q.push(0, 1, 0.5);
        q.push(0, 2, 0.7);
        q.push(1, 2, 0.9);
        q.push(2, 3, 1.5);
        q.blacklist(0);
        q.blacklist(1);
        assert_eq!(q.live_len(), 1);
        assert_eq!(q.pop_valid().ok().flatten(), Some((2, 3, 1.5)));
        assert_eq!(q.discarded(), 3);
        assert!(q.pop_valid().ok().flatten().is_none());
    }

    #[test]
    fn purge_drops_stale_pairs() {
        let mut q = CandidateQueue::new(Direction::Minimize);
        q.push(0, 1, 0.5);
        q.push(0, 2, 0.7);
        q.push(1, 2, 0.9);
        q.blacklist(0);
        assert_eq!(q.len(), 3);
        q.purge();
        assert_eq!(q.len(), 1);
        assert_eq!(q.discarded(), 2);
        q.blacklist(2);
        assert_eq!(q.live_len(), 0);
    }

    #[test]
    fn self_pairs_are_fatal() {
        let mut q = CandidateQueue::new(Direction::Minimize);
        q.push(4, 4, 0.1);
        assert!(matches!(q.pop_valid(), Err(HacError::SameClusterMerge(4))));
    }
}
