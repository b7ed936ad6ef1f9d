//! The McClain–Rao index.

use distances::Number;

use crate::{Clustering, ProximityMatrix};

use super::{as_distance, InternalEvaluator};

/// Mean within-cluster distance over mean between-cluster distance. Smaller
/// is better.
///
/// The index is undefined when no pair of items shares a cluster or when all
/// between-cluster distances are zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct McClainRao;

impl McClainRao {
    /// The registry name.
    pub const NAME: &'static str = "mcclain-rao";
}

impl InternalEvaluator for McClainRao {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, clustering: &Clustering, proximity: &ProximityMatrix) -> f64 {
        let (items, labels) = (clustering.items(), clustering.labels());
        let (mut within, mut between) = (0.0, 0.0);
        let (mut nw, mut nb) = (0_usize, 0_usize);
        for p in 1..items.len() {
            for q in 0..p {
                let d = as_distance(proximity, items[p], items[q]);
                if labels[p] == labels[q] {
                    within += d;
                    nw += 1;
                } else {
                    between += d;
                    nb += 1;
                }
            }
        }

        if nw == 0 || nb == 0 || between == 0.0 {
            f64::NAN
        } else {
            (within / nw.as_f64()) / (between / nb.as_f64())
        }
    }

    fn is_maximized(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::metric::Euclidean;

    #[test]
    fn line_of_four() {
        let data = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
        let proximity = ProximityMatrix::from_items(&data, &Euclidean);
        let clustering = Clustering::from_assignment(&[0, 0, 1, 1], None);
        // within: 1, 1; between: 10, 11, 9, 10
        let score = McClainRao.score(&clustering, &proximity);
        assert!(approx_eq!(f64, score, 1.0 / 10.0, epsilon = 1e-12));
        assert!(McClainRao.is_better(0.1, 0.2));

        let singletons = Clustering::from_assignment(&[0, 1, 2, 3], None);
        assert!(McClainRao.score(&singletons, &proximity).is_nan());
    }
}
