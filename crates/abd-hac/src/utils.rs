//! Utility functions for the crate.

use core::cmp::Ordering;

use distances::Number;

/// Return the index and value of the maximum value in the given slice of values.
///
/// NAN values are ordered as smaller than all other values.
///
/// This will return `None` if the given slice is empty.
pub fn arg_max<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    values
        .iter()
        .enumerate()
        .max_by(|&(_, l), &(_, r)| l.partial_cmp(r).unwrap_or(Ordering::Less))
        .map(|(i, v)| (i, *v))
}

/// Return the mean value of the given slice of values, or `0` if it is empty.
pub fn mean<T: Number>(values: &[T]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().map(|v| v.as_f64()).sum::<f64>() / values.len().as_f64()
    }
}

/// Pearson's correlation coefficient between two equally long series.
///
/// Returns `None` if the series differ in length, have fewer than two values,
/// or if either series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let (mx, my) = (mean(x), mean(y));
    let (sxy, sxx, syy) = x
        .iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - mx, b - my))
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (dx, dy)| {
            (dx.mul_add(dy, sxy), dx.mul_add(dx, sxx), dy.mul_add(dy, syy))
        });

    let denominator = (sxx * syy).sqrt();
    if denominator > 0.0 {
        Some(sxy / denominator)
    } else {
        None
    }
}
