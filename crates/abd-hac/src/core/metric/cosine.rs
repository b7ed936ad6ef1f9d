//! The cosine similarity, a maximized proximity.

use distances::number::Float;

use super::{Direction, Metric};

/// The cosine of the angle between two vectors.
///
/// Unlike the distances, larger values mean closer items.
pub struct CosineSimilarity;

impl<I: AsRef<[T]>, T: Float> Metric<I, T> for CosineSimilarity {
    fn distance(&self, a: &I, b: &I) -> T {
        let d: T = distances::vectors::cosine(a.as_ref(), b.as_ref());
        T::one() - d
    }

    fn name(&self) -> &str {
        "cosine-similarity"
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_vectors_are_most_similar() {
        let metric = CosineSimilarity;
        let a = vec![1.0_f64, 0.0];
        let b = vec![2.0_f64, 0.0];
        let c = vec![0.0_f64, 3.0];
        let ab: f64 = metric.distance(&a, &b);
        let ac: f64 = metric.distance(&a, &c);
        assert!((ab - 1.0).abs() < 1e-9);
        assert!(ac.abs() < 1e-9);
        assert!(Metric::<Vec<f64>, f64>::is_better(&metric, ab, ac));
    }
}
