//! Tests for the component registry.

use abd_hac::{
    chameleon::WeightedObjectives, cutoff::Silhouette, metric::Euclidean, ChameleonConfig, Clustering,
    CopheneticCutoff, CutoffStrategy, HacConfig, HacError, HierarchicalClustering, HillClimbCutoff, InternalEvaluator,
    Linkage, MergeEvaluation, NaiveCutoff, Parameterized, ProximityMatrix, Registry,
};

mod common;

#[test]
fn defaults_are_registered() {
    let registry = Registry::with_defaults();
    assert_eq!(
        registry.linkage_names(),
        vec!["average", "centroid", "complete", "median", "single", "ward", "weighted"]
    );
    assert_eq!(registry.evaluator_names(), vec!["mcclain-rao", "silhouette"]);
    assert_eq!(registry.cutoff_names(), vec!["cophenetic", "hill-climb", "naive"]);

    for name in registry.linkage_names() {
        assert_eq!(registry.linkage(name).unwrap().name(), name);
    }
    for name in registry.evaluator_names() {
        assert_eq!(registry.evaluator(name).unwrap().name(), name);
    }
    for name in registry.cutoff_names() {
        assert_eq!(registry.cutoff(name, None).unwrap().name(), name);
    }

    assert!(Registry::new().linkage_names().is_empty());
}

#[test]
fn unknown_names_are_errors() {
    let registry = Registry::with_defaults();
    assert!(matches!(
        registry.linkage("nearest"),
        Err(HacError::UnknownComponent { kind: "linkage", name }) if name == "nearest"
    ));
    assert!(matches!(
        registry.evaluator("dunn"),
        Err(HacError::UnknownComponent { kind: "evaluator", .. })
    ));
    assert!(matches!(
        registry.cutoff("bisect", None),
        Err(HacError::UnknownComponent { kind: "cutoff strategy", .. })
    ));
    assert!(matches!(
        registry.cutoff(HillClimbCutoff::NAME, Some("dunn")),
        Err(HacError::UnknownComponent { kind: "evaluator", .. })
    ));

    let config = ChameleonConfig {
        similarity: "jaccard".to_string(),
        ..ChameleonConfig::default()
    };
    assert!(matches!(
        registry.merge_evaluation(&config),
        Err(HacError::UnknownComponent { kind: "merge evaluation", .. })
    ));
}

#[test]
fn cutoffs_are_built_with_their_evaluator() {
    let registry = Registry::with_defaults();
    let data = common::data_gen::six_blobs();
    let config = HacConfig {
        keep_proximity: true,
        ..HacConfig::default()
    };
    let hac = HierarchicalClustering::new(config).unwrap();

    let mut result = hac.hierarchy(&data, &Euclidean).unwrap();
    let strategy = registry.cutoff(HillClimbCutoff::NAME, Some(Silhouette::NAME)).unwrap();
    assert_eq!(strategy.name(), HillClimbCutoff::NAME);
    strategy.find_cutoff(&mut result).unwrap();
    assert_eq!(result.clustering().map(Clustering::len), Some(6));

    let mut result = hac.hierarchy(&data, &Euclidean).unwrap();
    let strategy = registry.cutoff(HillClimbCutoff::NAME, None).unwrap();
    assert!(matches!(strategy.find_cutoff(&mut result), Err(HacError::MissingEvaluator)));

    let strategy = registry.cutoff(NaiveCutoff::NAME, Some(Silhouette::NAME)).unwrap();
    assert_eq!(strategy.name(), NaiveCutoff::NAME);
    strategy.find_cutoff(&mut result).unwrap();
    assert_eq!(result.clustering().map(Clustering::len), Some(6));

    let strategy = registry.cutoff(CopheneticCutoff::NAME, None).unwrap();
    assert_eq!(strategy.name(), CopheneticCutoff::NAME);
    strategy.find_cutoff(&mut result).unwrap();
    assert_eq!(result.clustering().map(Clustering::len), Some(6));
}

#[test]
fn merge_evaluations_follow_the_config() {
    let registry = Registry::with_defaults();
    for (similarity, maximized) in [
        ("interconnectivity", true),
        ("closeness", true),
        ("ri-rc", true),
        (WeightedObjectives::NAME, true),
    ] {
        let config = ChameleonConfig {
            similarity: similarity.to_string(),
            ..ChameleonConfig::default()
        };
        assert!(config.validate().is_ok());
        let evaluation = registry.merge_evaluation(&config).unwrap();
        assert_eq!(evaluation.name(), similarity);
        assert_eq!(evaluation.is_maximized(), maximized);
    }
}

/// Single linkage under another name.
struct Nearest;

impl Linkage for Nearest {
    fn name(&self) -> &str {
        "nearest-neighbor"
    }

    fn alpha_a(&self, _: usize, _: usize, _: usize) -> f64 {
        0.5
    }

    fn alpha_b(&self, _: usize, _: usize, _: usize) -> f64 {
        0.5
    }

    fn beta(&self, _: usize, _: usize, _: usize) -> f64 {
        0.0
    }

    fn gamma(&self) -> f64 {
        -0.5
    }
}

/// Always scores `1`.
struct Constant;

impl InternalEvaluator for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn score(&self, _: &Clustering, _: &ProximityMatrix) -> f64 {
        1.0
    }

    fn is_maximized(&self) -> bool {
        true
    }
}

#[test]
fn custom_components_can_be_registered() {
    let mut registry = Registry::with_defaults();
    registry.register_linkage("nearest-neighbor", || Box::new(Nearest));
    registry.register_evaluator("constant", || Box::new(Constant));
    assert_eq!(registry.linkage_names().len(), 8);
    assert!(registry.evaluator_names().contains(&"constant"));

    let linkage = registry.linkage("nearest-neighbor").unwrap();
    let hac = HierarchicalClustering::with_linkage(linkage, true);
    assert_eq!(hac.config().linkage, "nearest-neighbor");
    assert!(hac.config().validate().is_err());

    let data = common::data_gen::six_points();
    let custom = hac.hierarchy(&data, &Euclidean).unwrap();
    let single = HierarchicalClustering::new(HacConfig::default())
        .unwrap()
        .hierarchy(&data, &Euclidean)
        .unwrap();
    assert_eq!(custom.merges(), single.merges());

    // A constant score never improves, so the search stops at two clusters.
    let mut custom = custom;
    let strategy = registry.cutoff(HillClimbCutoff::NAME, Some("constant")).unwrap();
    strategy.find_cutoff(&mut custom).unwrap();
    assert_eq!(custom.clustering().map(Clustering::len), Some(2));
    assert_eq!(custom.num_cached_scores(), 2);
}
