//! The Linkage Engine: how the proximity between two clusters is derived.
//!
//! Every linkage is a member of the Lance–Williams family. After clusters `A`
//! and `B` (of sizes `ma` and `mb`) are merged into `Q`, the proximity of `Q`
//! to any other active cluster `X` (of size `mq`) is
//!
//! ```text
//! d(Q, X) = αA·d(A, X) + αB·d(B, X) + β·d(A, B) + γ·|d(A, X) − d(B, X)|
//! ```
//!
//! so the merge scheduler updates one row of the proximity matrix per merge
//! instead of recomputing it from the raw items.
//!
//! | Linkage | αA | αB | β | γ |
//! |---------|----|----|---|---|
//! | Single | ½ | ½ | 0 | −½ |
//! | Complete | ½ | ½ | 0 | ½ |
//! | Average | ma/(ma+mb) | mb/(ma+mb) | 0 | 0 |
//! | Weighted | ½ | ½ | 0 | 0 |
//! | Centroid | ma/(ma+mb) | mb/(ma+mb) | −ma·mb/(ma+mb)² | 0 |
//! | Median | ½ | ½ | −¼ | 0 |
//! | Ward | (ma+mq)/t | (mb+mq)/t | −mq/t | 0 |
//!
//! where `t = ma + mb + mq`. For similarities (maximized proximities) the sign
//! of γ is flipped, so that single linkage keeps the most similar pair and
//! complete linkage the least similar one.

use distances::Number;

use crate::{Direction, HacError, ProximityMatrix, Result};

mod average;
mod centroid;
mod complete;
mod median;
mod single;
mod ward;
mod weighted;

pub use average::Average;
pub use centroid::Centroid;
pub use complete::Complete;
pub use median::Median;
pub use single::Single;
pub use ward::Ward;
pub use weighted::Weighted;

/// A Lance–Williams linkage.
pub trait Linkage: Send + Sync {
    /// The name of the linkage.
    fn name(&self) -> &str;

    /// Coefficient of `d(A, X)`.
    fn alpha_a(&self, ma: usize, mb: usize, mq: usize) -> f64;

    /// Coefficient of `d(B, X)`.
    fn alpha_b(&self, ma: usize, mb: usize, mq: usize) -> f64;

    /// Coefficient of `d(A, B)`.
    fn beta(&self, ma: usize, mb: usize, mq: usize) -> f64;

    /// Coefficient of `|d(A, X) − d(B, X)|` for distances.
    fn gamma(&self) -> f64;

    /// Whether merge heights are guaranteed to be non-decreasing.
    ///
    /// Centroid and median linkages may produce inversions.
    fn is_monotone(&self) -> bool {
        true
    }

    /// Computes the proximity between two clusters directly from the
    /// item-to-item proximities of their members.
    ///
    /// Returns `None` for linkages that are only defined through the
    /// recurrence.
    fn cluster_distance(&self, proximity: &ProximityMatrix, a: &[usize], b: &[usize]) -> Option<f64> {
        let _ = (proximity, a, b);
        None
    }

    /// Applies the Lance–Williams recurrence.
    ///
    /// # Arguments
    ///
    /// * `d_ax`, `d_bx`: proximities of the two merged clusters to `X`.
    /// * `d_ab`: proximity between the two merged clusters.
    /// * `sizes`: `(ma, mb, mq)`, the cardinalities of `A`, `B` and `X`.
    /// * `direction`: whether the proximities are distances or similarities.
    ///
    /// # Errors
    ///
    /// - `DegenerateCluster` if `ma + mb == 0` or the update is `NaN`.
    fn update(
        &self,
        d_ax: f64,
        d_bx: f64,
        d_ab: f64,
        (ma, mb, mq): (usize, usize, usize),
        direction: Direction,
    ) -> Result<f64> {
        if ma + mb == 0 {
            return Err(HacError::DegenerateCluster { ma, mb });
        }
        let gamma = match direction {
            Direction::Minimize => self.gamma(),
            Direction::Maximize => -self.gamma(),
        };
        let value = self.alpha_a(ma, mb, mq) * d_ax
            + self.alpha_b(ma, mb, mq) * d_bx
            + self.beta(ma, mb, mq) * d_ab
            + gamma * (d_ax - d_bx).abs();
        if value.is_nan() {
            Err(HacError::DegenerateCluster { ma, mb })
        } else {
            Ok(value)
        }
    }
}

impl Linkage for Box<dyn Linkage> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn alpha_a(&self, ma: usize, mb: usize, mq: usize) -> f64 {
        (**self).alpha_a(ma, mb, mq)
    }

    fn alpha_b(&self, ma: usize, mb: usize, mq: usize) -> f64 {
        (**self).alpha_b(ma, mb, mq)
    }

    fn beta(&self, ma: usize, mb: usize, mq: usize) -> f64 {
        (**self).beta(ma, mb, mq)
    }

    fn gamma(&self) -> f64 {
        (**self).gamma()
    }

    fn is_monotone(&self) -> bool {
        (**self).is_monotone()
    }

    fn cluster_distance(&self, proximity: &ProximityMatrix, a: &[usize], b: &[usize]) -> Option<f64> {
        (**self).cluster_distance(proximity, a, b)
    }
}

/// The proximities of all cross pairs between two member lists.
fn cross_pairs<'a>(proximity: &'a ProximityMatrix, a: &'a [usize], b: &'a [usize]) -> impl Iterator<Item = f64> + 'a {
    a.iter().flat_map(move |&i| b.iter().map(move |&j| proximity.get(i, j)))
}

/// `x / (x + y)` for cluster sizes.
fn ratio(x: usize, y: usize) -> f64 {
    x.as_f64() / (x + y).as_f64()
}
