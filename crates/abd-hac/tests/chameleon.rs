//! Tests for graph-based merging.

use abd_hac::{
    chameleon::{Interconnectivity, RiRcSimilarity, WeightedObjectives},
    cutoff::{InternalEvaluator, Silhouette},
    metric::Euclidean,
    CancelFlag, ChameleonConfig, CutoffStrategy, GraphMerger, HacError, MergeEvaluation, MergeEvent, NaiveCutoff,
    ProximityMatrix,
};
use float_cmp::approx_eq;

mod common;

use common::graph::{two_cliques, Halves};

fn partitions() -> Vec<Vec<usize>> {
    vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]]
}

fn assert_merges(actual: &[MergeEvent], expected: &[(usize, usize, f64, usize)]) {
    assert_eq!(actual.len(), expected.len());
    for (m, &(a, b, height, new_id)) in actual.iter().zip(expected) {
        assert_eq!((m.a, m.b, m.new_id), (a, b, new_id), "{m:?}");
        assert!(approx_eq!(f64, m.height, height, epsilon = 1e-9), "{m:?}");
    }
}

#[test]
fn cliques_merge_before_the_bridge() {
    let graph = two_cliques();
    let merger = GraphMerger::from_config(&graph, &Halves, &ChameleonConfig::default()).unwrap();
    assert_eq!(merger.evaluation().name(), RiRcSimilarity::NAME);

    // Within a clique the halves score 4 * 1^2; across the bridge 0.1 * 0.1^2,
    // and 0.04 * 0.1^2 once a side has grown.
    let merges = merger.run(partitions()).unwrap();
    assert_merges(&merges, &[(0, 1, 4.0, 4), (2, 3, 8.0, 5), (4, 5, 8.0004, 6)]);
}

#[test]
fn hierarchy_maps_leaves_to_partitions() {
    let graph = two_cliques();
    let merger = GraphMerger::from_config(&graph, &Halves, &ChameleonConfig::default()).unwrap();
    let mut result = merger.hierarchy(partitions()).unwrap();
    assert_eq!(result.num_items(), 8);
    assert!(result.proximity().is_none());
    assert!(!result.has_inversions());

    let cutoff = result.tree().cut_tree_by_level(2);
    let clustering = result.set_cutoff(cutoff);
    assert_eq!(clustering.clusters(), &[vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);

    let clustering = result.clustering_at(result.tree().cut_tree_by_level(1));
    assert_eq!(clustering.clusters(), &[vec![0, 1, 2, 3], vec![4, 5], vec![6, 7]]);

    // The gap between 4 and 8 is the largest.
    NaiveCutoff.find_cutoff(&mut result).unwrap();
    assert_eq!(result.clustering().map(|c| c.len()), Some(3));
}

#[test]
fn weighted_objectives_match_ri_rc() {
    let graph = two_cliques();
    let config = ChameleonConfig {
        similarity: WeightedObjectives::NAME.to_string(),
        ..ChameleonConfig::default()
    };
    let weighted = GraphMerger::from_config(&graph, &Halves, &config).unwrap().run(partitions()).unwrap();
    let ri_rc = GraphMerger::new(&graph, &Halves, Box::new(RiRcSimilarity::default()))
        .run(partitions())
        .unwrap();
    assert_merges(&weighted, &[(0, 1, 4.0, 4), (2, 3, 8.0, 5), (4, 5, 8.0004, 6)]);
    for (w, r) in weighted.iter().zip(&ri_rc) {
        assert_eq!((w.a, w.b, w.new_id), (r.a, r.b, r.new_id));
        assert!(approx_eq!(f64, w.height, r.height, epsilon = 1e-12));
    }
}

#[test]
fn interconnectivity_alone() {
    let graph = two_cliques();
    let merger = GraphMerger::new(&graph, &Halves, Box::new(Interconnectivity));
    let merges = merger.run(partitions()).unwrap();
    // The bridge weighs 0.1 against a mean internal cut of 4.
    assert_merges(&merges, &[(0, 1, 4.0, 4), (2, 3, 8.0, 5), (4, 5, 8.025, 6)]);
}

#[test]
fn partitions_are_validated() {
    let graph = two_cliques();
    let merger = GraphMerger::from_config(&graph, &Halves, &ChameleonConfig::default()).unwrap();

    assert!(matches!(merger.run(vec![vec![0, 1, 2]]), Err(HacError::EmptyInput(1))));
    assert!(matches!(merger.run(Vec::new()), Err(HacError::EmptyInput(0))));
    assert!(matches!(
        merger.run(vec![vec![0, 1], vec![1, 2]]),
        Err(HacError::InvalidParameter { name: "partitions", .. })
    ));
    assert!(matches!(
        merger.run(vec![vec![0, 1], vec![99]]),
        Err(HacError::InvalidParameter { name: "partitions", .. })
    ));

    let config = ChameleonConfig {
        interconnectivity_priority: 11.0,
        ..ChameleonConfig::default()
    };
    assert!(GraphMerger::from_config(&graph, &Halves, &config).is_err());
}

#[test]
fn partitions_need_not_cover_the_graph() {
    let graph = two_cliques();
    let merger = GraphMerger::from_config(&graph, &Halves, &ChameleonConfig::default()).unwrap();
    let merges = merger.run(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap();
    assert_eq!(merges.len(), 2);
    assert_eq!((merges[0].a, merges[0].b), (0, 1));
    assert_eq!((merges[1].a, merges[1].b), (2, 3));
}

#[test]
fn hierarchy_of_a_partial_cover() {
    let graph = two_cliques();
    let merger = GraphMerger::from_config(&graph, &Halves, &ChameleonConfig::default()).unwrap();
    let mut result = merger.hierarchy(vec![vec![2, 3], vec![4, 5], vec![6, 7]]).unwrap();
    assert_eq!(result.num_items(), 6);

    let clustering = result.set_cutoff(0.0);
    assert_eq!(clustering.len(), 3);
    assert_eq!(clustering.items(), &[2, 3, 4, 5, 6, 7]);
    assert_eq!(clustering.label_of(6), clustering.label_of(7));
    assert_ne!(clustering.label_of(2), clustering.label_of(4));
    assert_eq!(clustering.label_of(0), None);
    assert_eq!(clustering.max_item(), Some(7));

    let clustering = result.clustering_at(result.tree().cut_tree_by_level(1));
    let mut clusters = clustering.clusters().to_vec();
    clusters.iter_mut().for_each(|c| c.sort_unstable());
    clusters.sort();
    assert_eq!(clusters, vec![vec![2, 3], vec![4, 5, 6, 7]]);

    // Proximities are indexed by node, so six rows cannot hold node 7.
    let positions = [0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 13.0].map(|x| vec![x]).to_vec();
    let short = ProximityMatrix::from_items(&positions[..6].to_vec(), &Euclidean);
    assert!(matches!(
        result.set_proximity(short),
        Err(HacError::InvalidParameter { name: "proximity", .. })
    ));

    let proximity = ProximityMatrix::from_items(&positions, &Euclidean);
    let score = Silhouette.score(&clustering, &proximity);
    assert!(score.is_finite() && score > 0.5, "{score}");
    result.set_proximity(proximity).unwrap();
    assert!(result.proximity().is_some());
}

#[test]
fn cancelled_merging_reports_progress() {
    let graph = two_cliques();
    let merger = GraphMerger::from_config(&graph, &Halves, &ChameleonConfig::default()).unwrap();
    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = merger.run_with_cancel(partitions(), &cancel).unwrap_err();
    assert!(matches!(err.root_cause(), HacError::Cancelled));
    assert_eq!(err.partial_merges().map(<[_]>::len), Some(0));

    cancel.reset();
    assert!(merger.run_with_cancel(partitions(), &cancel).is_ok());
}
