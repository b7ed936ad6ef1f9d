#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

pub mod chameleon;
mod core;
pub mod cutoff;
pub mod dendrogram;
pub mod error;
pub mod linkage;
pub mod merge;
pub mod registry;
pub mod utils;

pub use crate::core::{
    cluster, dataset, metric, proximity, Cluster, Clustering, Dataset, Direction, Graph, Metric, ProximityMatrix,
    VecDataset, WeightedGraph,
};
pub use chameleon::{Bisection, ChameleonConfig, GraphCluster, GraphMerger, MergeEvaluation};
pub use cutoff::{CopheneticCutoff, CutoffStrategy, HillClimbCutoff, InternalEvaluator, NaiveCutoff};
pub use dendrogram::{cophenetic_correlation, DendroTree, DendroTreeBuilder, DiskIO, TreeArrays};
pub use error::{HacError, Result};
pub use linkage::Linkage;
pub use merge::{
    CancelFlag, CandidateQueue, HacConfig, HierarchicalClustering, HierarchicalResult, MergeEvent, MergeScheduler,
};
pub use registry::{ParamKind, ParamSpec, Parameterized, Registry};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
