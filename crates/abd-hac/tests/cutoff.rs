//! Tests for the cutoff searches.

use abd_hac::{
    cutoff::{McClainRao, Silhouette},
    metric::{Euclidean, Manhattan},
    Clustering, CopheneticCutoff, CutoffStrategy, HacConfig, HacError, HierarchicalClustering, HierarchicalResult,
    HillClimbCutoff, InternalEvaluator, Metric, NaiveCutoff, ProximityMatrix,
};

mod common;

fn six_blob_result(keep_proximity: bool) -> HierarchicalResult {
    six_blob_result_with(&Euclidean, keep_proximity)
}

fn six_blob_result_with<M: Metric<Vec<f64>, f64> + Sync>(metric: &M, keep_proximity: bool) -> HierarchicalResult {
    let data = common::data_gen::six_blobs();
    let config = HacConfig {
        linkage: "single".to_string(),
        keep_proximity,
        ..HacConfig::default()
    };
    HierarchicalClustering::new(config).unwrap().hierarchy(&data, metric).unwrap()
}

fn blobs() -> Vec<Vec<usize>> {
    (0..6).map(|b| (5 * b..5 * (b + 1)).collect()).collect()
}

fn sorted_clusters(clustering: &Clustering) -> Vec<Vec<usize>> {
    let mut clusters = clustering
        .clusters()
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.sort_unstable();
            c
        })
        .collect::<Vec<_>>();
    clusters.sort();
    clusters
}

/// Always undefined.
struct Undefined;

impl InternalEvaluator for Undefined {
    fn name(&self) -> &str {
        "undefined"
    }

    fn score(&self, _: &Clustering, _: &ProximityMatrix) -> f64 {
        f64::NAN
    }

    fn is_maximized(&self) -> bool {
        true
    }
}

#[test]
fn silhouette_finds_the_blobs() {
    let mut result = six_blob_result(true);
    let search = HillClimbCutoff::new(Box::new(Silhouette));

    let cutoff = search.find_cutoff(&mut result).unwrap();
    // Midway between the last within-blob merge and the first between blobs.
    assert!(cutoff > 1.0 && cutoff < 10.0, "cutoff {cutoff}");
    assert_eq!(result.cutoff(), Some(cutoff));

    let clustering = result.clustering().unwrap();
    assert_eq!(clustering.len(), 6);
    assert_eq!(clustering.sizes(), vec![5; 6]);
    assert_eq!(sorted_clusters(clustering), blobs());

    // The search scored 2 to 6 clusters, then one finer level that did worse.
    for k in 2..=6 {
        assert!(result.is_score_cached(Silhouette::NAME, k), "k = {k}");
    }
    assert_eq!(result.num_cached_scores(), 6);
    let six = result.score(Silhouette::NAME, 6).unwrap();
    for k in 2..6 {
        assert!(result.score(Silhouette::NAME, k).unwrap() < six);
    }
    assert!(six > 0.9);
}

#[test]
fn repeated_searches_reuse_scores() {
    let mut result = six_blob_result(true);
    let search = HillClimbCutoff::new(Box::new(Silhouette));

    let first = search.find_cutoff(&mut result).unwrap();
    let cached = result.num_cached_scores();
    assert_eq!(cached, 6);

    let second = search.find_cutoff(&mut result).unwrap();
    assert!((first - second).abs() < f64::EPSILON);
    assert_eq!(result.num_cached_scores(), cached);
}

#[test]
fn hill_climb_requires_an_evaluator() {
    let mut result = six_blob_result(true);
    let mut search = HillClimbCutoff::default();
    assert!(search.evaluator().is_none());
    assert!(matches!(search.find_cutoff(&mut result), Err(HacError::MissingEvaluator)));
    assert!(result.cutoff().is_none());

    search.set_evaluator(Box::new(Silhouette));
    assert_eq!(search.evaluator().map(InternalEvaluator::name), Some(Silhouette::NAME));
    assert!(search.find_cutoff(&mut result).is_ok());
}

#[test]
fn hill_climb_requires_proximities() {
    let mut result = six_blob_result(false);
    let search = HillClimbCutoff::new(Box::new(Silhouette));
    assert!(matches!(search.find_cutoff(&mut result), Err(HacError::MissingProximity)));
    assert_eq!(result.num_cached_scores(), 0);

    let data = common::data_gen::six_blobs();
    result.set_proximity(ProximityMatrix::from_items(&data, &Euclidean)).unwrap();
    assert!(search.find_cutoff(&mut result).is_ok());
    assert!(result
        .set_proximity(ProximityMatrix::from_items(&data[..4], &Euclidean))
        .is_err());
}

#[test]
fn undefined_scores_are_reported() {
    let mut result = six_blob_result(true);
    let search = HillClimbCutoff::new(Box::new(Undefined));
    let err = search.find_cutoff(&mut result).unwrap_err();
    assert!(
        matches!(&err, HacError::NonFiniteScore { evaluator, clusters: 2, score } if evaluator == "undefined" && score.is_nan()),
        "{err}"
    );
    assert!(result.cutoff().is_none());
}

#[test]
fn largest_gap_finds_the_blobs() {
    let mut result = six_blob_result(false);
    let cutoff = NaiveCutoff.find_cutoff(&mut result).unwrap();
    assert!(cutoff > 1.0 && cutoff < 10.0, "cutoff {cutoff}");
    assert_eq!(NaiveCutoff.name(), NaiveCutoff::NAME);

    let clustering = result.clustering().unwrap();
    assert_eq!(sorted_clusters(clustering), blobs());
    assert_eq!(result.num_cached_scores(), 0);

    let mut result = six_blob_result_with(&Manhattan, false);
    let cutoff = NaiveCutoff.find_cutoff(&mut result).unwrap();
    assert!(cutoff > 1.0 && cutoff < 11.0, "cutoff {cutoff}");
    assert_eq!(sorted_clusters(result.clustering().unwrap()), blobs());
}

#[test]
fn cophenetic_cutoff_finds_the_blobs() {
    let mut result = six_blob_result(false);
    let cutoff = CopheneticCutoff.find_cutoff(&mut result).unwrap();
    assert!(cutoff > 1.0 && cutoff < 10.0, "cutoff {cutoff}");
    assert_eq!(result.cutoff(), Some(cutoff));
    assert_eq!(sorted_clusters(result.clustering().unwrap()), blobs());
    assert!(result.proximity().is_none());
}

#[test]
fn mcclain_rao_is_minimized() {
    let mut result = six_blob_result(true);
    let search = HillClimbCutoff::new(Box::new(McClainRao));
    let cutoff = search.find_cutoff(&mut result).unwrap();
    assert!(cutoff > 0.0);

    let k = result.clustering().unwrap().len();
    assert!(k >= 2 && k < 30, "{k} clusters");
    let best = result.score(McClainRao::NAME, k).unwrap();
    assert!(best.is_finite());
    assert!(result.score(McClainRao::NAME, 2).unwrap() >= best);
}

#[test]
fn clustering_at_leaves_the_cutoff_alone() {
    let mut result = six_blob_result(false);
    let root = result.tree().max_height();
    assert_eq!(result.clustering_at(root + 1.0).len(), 1);
    assert_eq!(result.clustering_at(0.0).len(), 30);
    assert!(result.cutoff().is_none());

    let clustering = result.set_cutoff(root).clone();
    assert_eq!(clustering.len(), 2);
    assert_eq!(clustering.num_items(), 30);
    assert_eq!(result.clustering(), Some(&clustering));
}
