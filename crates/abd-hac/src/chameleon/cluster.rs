//! Clusters of graph nodes with cached internal and external properties.

use std::collections::HashSet;

use distances::Number;

use crate::Graph;

use super::Bisection;

/// A cluster of graph nodes.
///
/// The internal properties are measured on the edges cut by a bisection of
/// the cluster: their total weight is the internal interconnectivity and their
/// mean weight the internal closeness.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphCluster {
    /// The id of the cluster.
    id: usize,
    /// The nodes in the cluster.
    members: Vec<usize>,
    /// The sum of the weights of the edges cut by the bisection.
    interconnectivity: f64,
    /// The mean weight of the edges cut by the bisection.
    closeness: f64,
}

impl GraphCluster {
    /// Creates a cluster and measures its internal properties.
    ///
    /// Clusters with fewer than two nodes are not bisected and have zero
    /// internal interconnectivity and closeness.
    pub fn new<G: Graph + ?Sized, B: Bisection + ?Sized>(
        id: usize,
        members: Vec<usize>,
        graph: &G,
        bisection: &B,
    ) -> Self {
        let (interconnectivity, closeness) = if members.len() < 2 {
            (0.0, 0.0)
        } else {
            let (first, second) = bisection.bisect(&members, graph);
            let second = second.into_iter().collect::<HashSet<_>>();
            let (sum, count) = first
                .iter()
                .flat_map(|&u| graph.neighbors(u).iter())
                .filter(|(v, _)| second.contains(v))
                .fold((0.0, 0_usize), |(sum, count), &(_, w)| (sum + w, count + 1));
            let closeness = if count == 0 { 0.0 } else { sum / count.as_f64() };
            (sum, closeness)
        };

        Self {
            id,
            members,
            interconnectivity,
            closeness,
        }
    }

    /// The id of the cluster.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The nodes in the cluster.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The number of nodes in the cluster.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    /// Consumes the cluster and returns its nodes.
    #[must_use]
    pub fn into_members(self) -> Vec<usize> {
        self.members
    }

    /// The internal interconnectivity.
    #[must_use]
    pub const fn interconnectivity(&self) -> f64 {
        self.interconnectivity
    }

    /// The internal closeness.
    #[must_use]
    pub const fn closeness(&self) -> f64 {
        self.closeness
    }
}

/// The edges connecting two clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExternalProperties {
    /// The sum of the weights of the connecting edges.
    pub weight: f64,
    /// The number of connecting edges.
    pub edges: usize,
}

impl ExternalProperties {
    /// The mean weight of the connecting edges, `0` if there are none.
    #[must_use]
    pub fn mean_weight(&self) -> f64 {
        if self.edges == 0 {
            0.0
        } else {
            self.weight / self.edges.as_f64()
        }
    }

    /// The properties of the union of two disjoint edge sets.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            weight: self.weight + other.weight,
            edges: self.edges + other.edges,
        }
    }
}
