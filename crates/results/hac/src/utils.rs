//! Some utilities

use std::path::PathBuf;

use distances::Number;
use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};
use rand::prelude::*;

pub fn configure_logger(file_name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(format!("{file_name}.log"));

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_path = log_path.with_extension("err.log");

    let guard = ftlog::Builder::new()
        // global max log level
        .max_log_level(LevelFilter::Trace)
        // define root appender, pass None would write to stderr
        .root(writer)
        // write `Warn` and `Error` logs in ftlog::appender to `err_path` instead of `log_path`
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Warn)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

/// Generates `num_blobs` blobs of `blob_size` points each, blob by blob.
///
/// Centers are uniform in `[-100, 100)^dim` and points are uniform in a unit
/// cube around their center. Returns the points and their blob labels.
pub fn gen_blobs(num_blobs: usize, blob_size: usize, dim: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = (0..num_blobs)
        .map(|_| (0..dim).map(|_| rng.gen_range(-100.0..100.0)).collect::<Vec<f64>>())
        .collect::<Vec<_>>();

    let mut points = Vec::with_capacity(num_blobs * blob_size);
    let mut labels = Vec::with_capacity(num_blobs * blob_size);
    for (label, center) in centers.iter().enumerate() {
        for _ in 0..blob_size {
            points.push(center.iter().map(|&c| c + rng.gen_range(-1.0..1.0)).collect());
            labels.push(label);
        }
    }
    (points, labels)
}

/// The fraction of pairs of items on which two labelings agree about being
/// in the same cluster.
pub fn rand_index(a: &[usize], b: &[usize]) -> f64 {
    let n = a.len().min(b.len());
    let (mut agree, mut total) = (0_u64, 0_u64);
    for i in 1..n {
        for j in 0..i {
            if (a[i] == a[j]) == (b[i] == b[j]) {
                agree += 1;
            }
            total += 1;
        }
    }
    if total == 0 {
        1.0
    } else {
        agree.as_f64() / total.as_f64()
    }
}
