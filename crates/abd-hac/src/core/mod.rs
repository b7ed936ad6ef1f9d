//! The core traits and structs: items, graphs, metrics, proximity matrices and
//! flat clusterings.

pub mod cluster;
pub mod dataset;
mod direction;
pub mod metric;
pub mod proximity;

pub use cluster::{Cluster, Clustering};
pub use dataset::{Dataset, Graph, VecDataset, WeightedGraph};
pub use direction::Direction;
pub use metric::Metric;
pub use proximity::ProximityMatrix;
