//! The `Manhattan` distance metric.

use distances::Number;

use super::Metric;

/// The `Manhattan` distance metric.
pub struct Manhattan;

impl<I: AsRef<[T]>, T: Number> Metric<I, T> for Manhattan {
    fn distance(&self, a: &I, b: &I) -> T {
        distances::vectors::manhattan(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "manhattan"
    }
}
