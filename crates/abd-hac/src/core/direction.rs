//! Whether smaller or larger scores are preferred.

use core::cmp::Ordering;

/// The direction in which a score is optimized.
///
/// Distances are minimized and similarities are maximized. A single
/// `Direction` parameterizes every comparator in the crate instead of keeping
/// two mirrored implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Smaller values are better.
    #[default]
    Minimize,
    /// Larger values are better.
    Maximize,
}

impl Direction {
    /// Returns `true` if `a` is strictly better than `b`.
    ///
    /// A `NaN` is never better than anything.
    #[must_use]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Minimize => a < b,
            Self::Maximize => a > b,
        }
    }

    /// Orders two scores so that the better one compares as `Greater`.
    ///
    /// `NaN`s compare as worse than every number.
    #[must_use]
    pub fn rank(self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => match self {
                Self::Minimize => b.total_cmp(&a),
                Self::Maximize => a.total_cmp(&b),
            },
        }
    }

    /// Converts a merge score into a dendrogram height.
    ///
    /// Distances are used as they are. Similarities are mapped to `1 - s`, so
    /// that less similar merges sit higher in the tree.
    #[must_use]
    pub fn to_height(self, score: f64) -> f64 {
        match self {
            Self::Minimize => score,
            Self::Maximize => 1.0 - score,
        }
    }

    /// Returns `true` for `Maximize`.
    #[must_use]
    pub const fn is_maximized(self) -> bool {
        matches!(self, Self::Maximize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_puts_better_first() {
        assert_eq!(Direction::Minimize.rank(1.0, 2.0), Ordering::Greater);
        assert_eq!(Direction::Maximize.rank(1.0, 2.0), Ordering::Less);
        assert_eq!(Direction::Minimize.rank(f64::NAN, 2.0), Ordering::Less);
        assert_eq!(Direction::Maximize.rank(f64::NAN, 2.0), Ordering::Less);
    }

    #[test]
    fn nan_is_never_better() {
        assert!(!Direction::Minimize.is_better(f64::NAN, 1.0));
        assert!(!Direction::Maximize.is_better(f64::NAN, 1.0));
        assert!(Direction::Maximize.is_better(2.0, 1.0));
        assert!(Direction::Maximize.is_maximized());
    }

    #[test]
    fn similarities_become_heights() {
        assert!((Direction::Maximize.to_height(0.75) - 0.25).abs() < f64::EPSILON);
        assert!((Direction::Minimize.to_height(0.75) - 0.75).abs() < f64::EPSILON);
    }
}
