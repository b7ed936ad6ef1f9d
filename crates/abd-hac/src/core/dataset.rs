//! Items and graphs consumed by the clustering engine.
//!
//! Items are owned by the caller and referenced by index only. The graph-based
//! merger additionally needs the weighted neighbor adjacency of the items,
//! which is supplied through the [`Graph`] trait. Building that graph (e.g. a
//! k-NN graph) is left to the caller.

/// An indexed collection of items.
pub trait Dataset<I> {
    /// Returns a reference to an indexed item.
    ///
    /// Implementors may panic if the index is out of bounds.
    fn get(&self, index: usize) -> &I;

    /// Returns the number of items.
    fn cardinality(&self) -> usize;

    /// Returns the name of the dataset.
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }
}

impl<I> Dataset<I> for Vec<I> {
    fn get(&self, index: usize) -> &I {
        &self[index]
    }

    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<I> Dataset<I> for [I] {
    fn get(&self, index: usize) -> &I {
        &self[index]
    }

    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// A named `Vec` of items.
#[derive(Debug, Clone, PartialEq)]
pub struct VecDataset<I> {
    /// The name of the dataset.
    name: String,
    /// The items.
    items: Vec<I>,
}

impl<I> VecDataset<I> {
    /// Creates a new dataset.
    pub fn new(name: &str, items: Vec<I>) -> Self {
        Self {
            name: name.to_string(),
            items,
        }
    }

    /// Returns the items.
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Consumes the dataset and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<I> {
        self.items
    }
}

impl<I> Dataset<I> for VecDataset<I> {
    fn get(&self, index: usize) -> &I {
        &self.items[index]
    }

    fn cardinality(&self) -> usize {
        self.items.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An undirected graph over item indices with weighted edges.
pub trait Graph {
    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the neighbors of a node together with the edge weights.
    fn neighbors(&self, node: usize) -> &[(usize, f64)];

    /// Returns the weight of the edge between `a` and `b`, if any.
    fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        self.neighbors(a).iter().find(|&&(n, _)| n == b).map(|&(_, w)| w)
    }

    /// Returns the number of undirected edges.
    fn edge_count(&self) -> usize {
        (0..self.node_count()).map(|n| self.neighbors(n).len()).sum::<usize>() / 2
    }
}

/// An adjacency-list graph built from an edge list.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    /// `adjacency[n]` holds the `(neighbor, weight)` pairs of node `n`.
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl WeightedGraph {
    /// Creates a graph with `n` isolated nodes.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
        }
    }

    /// Creates a graph with `n` nodes from an undirected edge list.
    ///
    /// Self-loops are ignored. A repeated edge keeps the last weight.
    #[must_use]
    pub fn from_edges(n: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut graph = Self::new(n);
        for &(a, b, w) in edges {
            graph.add_edge(a, b, w);
        }
        graph
    }

    /// Adds or re-weights the undirected edge between `a` and `b`.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) {
        if a == b {
            return;
        }
        for (from, to) in [(a, b), (b, a)] {
            let list = &mut self.adjacency[from];
            match list.iter_mut().find(|(n, _)| *n == to) {
                Some(entry) => entry.1 = weight,
                None => list.push((to, weight)),
            }
        }
    }
}

impl Graph for WeightedGraph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }
}
