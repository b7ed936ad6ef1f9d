//! Data generation utilities for testing.

use rand::prelude::*;

/// The points A(1, 1), B(1.5, 1.5), C(5, 5), D(3, 4), E(4, 4) and F(3, 3.5).
pub fn six_points() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 1.0],
        vec![1.5, 1.5],
        vec![5.0, 5.0],
        vec![3.0, 4.0],
        vec![4.0, 4.0],
        vec![3.0, 3.5],
    ]
}

/// Six well separated blobs of five points each, blob by blob.
pub fn six_blobs() -> Vec<Vec<f64>> {
    let centers = [(0.0, 0.0), (12.0, 0.0), (0.0, 15.0), (14.0, 17.0), (31.0, 4.0), (5.0, 36.0)];
    let offsets = [(0.0, 0.0), (0.9, 0.1), (0.2, 1.1), (1.3, 0.8), (0.6, 0.5)];
    centers
        .iter()
        .flat_map(|&(cx, cy)| offsets.iter().map(move |&(dx, dy)| vec![cx + dx, cy + dy]))
        .collect()
}

/// Uniformly random points in `[0, max)^dim`.
pub fn gen_random_data(car: usize, dim: usize, max: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..car)
        .map(|_| (0..dim).map(|_| rng.gen_range(0.0..max)).collect())
        .collect()
}

/// The names of the linkages that never produce inversions.
pub const MONOTONE_LINKAGES: [&str; 5] = ["single", "complete", "average", "weighted", "ward"];
