//! Graph utilities for testing.

use abd_hac::{Bisection, Graph, WeightedGraph};

/// Splits the nodes in two halves, in the order given.
pub struct Halves;

impl Bisection for Halves {
    fn bisect<G: Graph + ?Sized>(&self, nodes: &[usize], _: &G) -> (Vec<usize>, Vec<usize>) {
        let (a, b) = nodes.split_at(nodes.len() / 2);
        (a.to_vec(), b.to_vec())
    }
}

/// Two cliques over nodes `0..4` and `4..8` with unit weights, joined by a
/// single edge `(3, 4)` of weight `0.1`.
pub fn two_cliques() -> WeightedGraph {
    let mut graph = WeightedGraph::new(8);
    for group in [0..4, 4..8] {
        for a in group.clone() {
            for b in (a + 1)..group.end {
                graph.add_edge(a, b, 1.0);
            }
        }
    }
    graph.add_edge(3, 4, 0.1);
    graph
}
