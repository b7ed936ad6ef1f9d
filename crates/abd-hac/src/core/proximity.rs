//! A dense, symmetric matrix of pairwise proximities.

use distances::Number;
use rayon::prelude::*;

use crate::{HacError, Result};

use super::{Dataset, Direction, Metric};

/// A symmetric proximity matrix stored as its strict lower triangle.
///
/// Entry `(i, j)` with `i > j` lives at `i * (i - 1) / 2 + j`. The diagonal is
/// not stored and reads as zero.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProximityMatrix {
    /// The number of rows (and columns).
    cardinality: usize,
    /// The condensed strict lower triangle.
    values: Vec<f64>,
    /// Whether the values are distances or similarities.
    direction: Direction,
}

impl ProximityMatrix {
    /// Creates an all-zero matrix for `cardinality` items.
    #[must_use]
    pub fn zeros(cardinality: usize, direction: Direction) -> Self {
        Self {
            cardinality,
            values: vec![0.0; condensed_len(cardinality)],
            direction,
        }
    }

    /// Computes the proximities between all pairs of items in the dataset.
    pub fn from_items<I, T: Number, D: Dataset<I> + ?Sized, M: Metric<I, T>>(data: &D, metric: &M) -> Self {
        let n = data.cardinality();
        let values = (1..n)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .map(|(i, j)| metric.distance(data.get(i), data.get(j)).as_f64())
            .collect();
        Self {
            cardinality: n,
            values,
            direction: metric.direction(),
        }
    }

    /// Parallel version of [`ProximityMatrix::from_items`].
    pub fn par_from_items<I, T, D, M>(data: &D, metric: &M) -> Self
    where
        I: Send + Sync,
        T: Number,
        D: Dataset<I> + Sync + ?Sized,
        M: Metric<I, T> + Sync,
    {
        let n = data.cardinality();
        let values = (1..n)
            .into_par_iter()
            .flat_map_iter(|i| (0..i).map(move |j| (i, j)))
            .map(|(i, j)| metric.distance(data.get(i), data.get(j)).as_f64())
            .collect();
        Self {
            cardinality: n,
            values,
            direction: metric.direction(),
        }
    }

    /// Builds a matrix from pre-computed square rows.
    ///
    /// Only the strict lower triangle is read.
    ///
    /// # Errors
    ///
    /// - If any row does not have as many columns as there are rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], direction: Direction) -> Result<Self> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|r| r.as_ref().len() != n) {
            return Err(HacError::InvalidParameter {
                name: "rows",
                message: format!("expected {n} columns, found {}", row.as_ref().len()),
            });
        }
        let values = rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.as_ref()[..i].iter().copied())
            .collect();
        Ok(Self {
            cardinality: n,
            values,
            direction,
        })
    }

    /// The number of rows in the matrix.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Whether the stored values are minimized or maximized.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the proximity between `i` and `j`.
    ///
    /// # Panics
    ///
    /// - If either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.values[condensed_index(i, j)]
        }
    }

    /// Sets the proximity between `i` and `j`. Writes to the diagonal are
    /// ignored.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        if i != j {
            self.values[condensed_index(i, j)] = value;
        }
    }

    /// The condensed strict lower triangle, row by row.
    #[must_use]
    pub fn condensed(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(i, j, value)` for all `i > j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (1..self.cardinality)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .zip(self.values.iter().copied())
            .map(|((i, j), v)| (i, j, v))
    }
}

/// The number of entries in the strict lower triangle of an `n x n` matrix.
pub(crate) const fn condensed_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Index of `(i, j)` in the condensed strict lower triangle.
pub(crate) const fn condensed_index(i: usize, j: usize) -> usize {
    let (hi, lo) = if i > j { (i, j) } else { (j, i) };
    hi * (hi - 1) / 2 + lo
}
