//! Cophenetic distances and the cophenetic correlation coefficient.

use crate::{utils, Direction, HacError, ProximityMatrix, Result};

use super::DendroTree;

impl DendroTree {
    /// The height of the lowest common ancestor of two nodes.
    ///
    /// The cophenetic distance of a node to itself is `0`.
    ///
    /// # Panics
    ///
    /// - If either node is not in the tree.
    #[must_use]
    pub fn cophenetic(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }

        let parents = self.parents();
        let mut is_ancestor = vec![false; self.num_nodes()];
        let mut node = Some(i);
        while let Some(n) = node {
            is_ancestor[n] = true;
            node = parents[n];
        }

        let mut node = Some(j);
        while let Some(n) = node {
            if is_ancestor[n] {
                return self.height[n];
            }
            node = parents[n];
        }
        0.0
    }

    /// The cophenetic distances between all pairs of leaves.
    #[must_use]
    pub fn cophenetic_matrix(&self) -> ProximityMatrix {
        let mut matrix = ProximityMatrix::zeros(self.num_leaves, Direction::Minimize);
        let mut members = (0..self.num_leaves).map(|i| vec![i]).collect::<Vec<_>>();
        for node in self.num_leaves..self.num_nodes() {
            let (Some(l), Some(r)) = (self.left(node), self.right(node)) else {
                members.push(Vec::new());
                continue;
            };
            let (mut a, b) = (core::mem::take(&mut members[l]), core::mem::take(&mut members[r]));
            for &i in &a {
                for &j in &b {
                    matrix.set(i, j, self.height[node]);
                }
            }
            a.extend(b);
            members.push(a);
        }
        matrix
    }
}

/// The cophenetic correlation coefficient (CPCC) of a tree.
///
/// This is Pearson's correlation between the proximities the tree was built
/// from and the cophenetic distances of the tree. Similarities are converted
/// to heights first.
///
/// # Errors
///
/// - `InvalidParameter` if the matrix does not have one row per leaf.
/// - `NonFiniteScore` if either series has zero variance.
pub fn cophenetic_correlation(tree: &DendroTree, proximity: &ProximityMatrix) -> Result<f64> {
    let n = tree.num_leaves();
    if proximity.cardinality() != n {
        return Err(HacError::InvalidParameter {
            name: "proximity",
            message: format!("expected {n} rows, got {}", proximity.cardinality()),
        });
    }

    let direction = proximity.direction();
    let raw = proximity
        .condensed()
        .iter()
        .map(|&v| direction.to_height(v))
        .collect::<Vec<_>>();
    let cophenetic = tree.cophenetic_matrix();

    utils::pearson(&raw, cophenetic.condensed()).ok_or_else(|| HacError::NonFiniteScore {
        evaluator: "cophenetic-correlation".to_string(),
        clusters: n,
        score: f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use crate::MergeEvent;

    use super::*;

    #[test]
    fn lowest_common_ancestor() {
        let merges = [
            MergeEvent::new(0, 1, 1.0, 4),
            MergeEvent::new(2, 3, 2.0, 5),
            MergeEvent::new(4, 5, 3.0, 6),
        ];
        let tree = DendroTree::from_merges(4, &merges).unwrap_or_else(|_| unreachable!());
        assert!((tree.cophenetic(0, 1) - 1.0).abs() < f64::EPSILON);
        assert!((tree.cophenetic(3, 2) - 2.0).abs() < f64::EPSILON);
        assert!((tree.cophenetic(1, 3) - 3.0).abs() < f64::EPSILON);
        assert!((tree.cophenetic(4, 2) - 3.0).abs() < f64::EPSILON);
        assert!(tree.cophenetic(2, 2).abs() < f64::EPSILON);

        let m = tree.cophenetic_matrix();
        assert_eq!(m.condensed(), &[1.0, 3.0, 3.0, 3.0, 3.0, 2.0]);
    }
}
