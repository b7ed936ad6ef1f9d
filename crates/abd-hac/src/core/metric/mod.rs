//! The `Metric` trait is the proximity provider for the engine.

use distances::Number;

use super::Direction;

mod cosine;
mod euclidean;
mod manhattan;

pub use cosine::CosineSimilarity;
pub use euclidean::Euclidean;
pub use manhattan::Manhattan;

/// The `Metric` trait is used for all item-to-item proximity computations.
///
/// A metric may measure a distance (smaller is closer) or a similarity (larger
/// is closer). The [`direction`](Metric::direction) tells the linkages and the
/// merge scheduler which one it is.
///
/// # Type Parameters
///
/// - `I`: The type of the items.
/// - `T`: The type of the proximity values.
///
/// # Example
///
/// ```rust
/// use abd_hac::{metric::Metric, Direction};
///
/// struct Hamming;
///
/// impl<I: AsRef<[u8]>> Metric<I, usize> for Hamming {
///     fn distance(&self, a: &I, b: &I) -> usize {
///         a.as_ref().iter().zip(b.as_ref()).filter(|(x, y)| x != y).count()
///     }
///
///     fn name(&self) -> &str {
///         "hamming"
///     }
/// }
///
/// let metric = Hamming;
/// assert_eq!(metric.distance(&b"hello", &b"world"), 4);
/// assert_eq!(Metric::<&[u8; 5], usize>::direction(&metric), Direction::Minimize);
/// ```
pub trait Metric<I, T: Number> {
    /// Call the metric on two items.
    fn distance(&self, a: &I, b: &I) -> T;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether smaller or larger values mean "closer".
    ///
    /// Distances are minimized, which is the default.
    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    /// Returns `true` if proximity `a` is strictly closer than proximity `b`.
    fn is_better(&self, a: f64, b: f64) -> bool {
        self.direction().is_better(a, b)
    }
}

impl<I, T: Number> Metric<I, T> for Box<dyn Metric<I, T>> {
    fn distance(&self, a: &I, b: &I) -> T {
        (**self).distance(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn direction(&self) -> Direction {
        (**self).direction()
    }
}

impl<I, T: Number> Metric<I, T> for Box<dyn Metric<I, T> + Send + Sync> {
    fn distance(&self, a: &I, b: &I) -> T {
        (**self).distance(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn direction(&self) -> Direction {
        (**self).direction()
    }
}
