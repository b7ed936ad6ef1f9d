//! Explicit registration of named components and static parameter
//! descriptors.
//!
//! Hosts look up linkages, evaluators, cutoff strategies and merge
//! evaluations by name. [`Registry::with_defaults`] knows every component in
//! this crate and more can be registered at startup.

use std::collections::BTreeMap;

use crate::{
    chameleon::{ChameleonConfig, Closeness, Interconnectivity, MergeEvaluation, RiRcSimilarity, WeightedObjectives},
    cutoff::{CopheneticCutoff, McClainRao, NaiveCutoff, Silhouette},
    linkage::{Average, Centroid, Complete, Median, Single, Ward, Weighted},
    CutoffStrategy, HacError, HillClimbCutoff, InternalEvaluator, Linkage, Result,
};

/// The type of a configurable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A flag.
    Bool,
    /// An integer.
    Integer,
    /// A real number.
    Real,
    /// One of a fixed set of names.
    Choice(&'static [&'static str]),
}

/// A statically declared parameter of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// The name of the parameter.
    pub name: &'static str,
    /// The type of the parameter.
    pub kind: ParamKind,
    /// The smallest allowed value, for numeric parameters.
    pub min: Option<f64>,
    /// The largest allowed value, for numeric parameters.
    pub max: Option<f64>,
    /// A short description.
    pub description: &'static str,
}

impl ParamSpec {
    /// Checks a numeric value against the declared range.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the value is `NaN` or out of range.
    pub fn check_range(&self, value: f64) -> Result<()> {
        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if value.is_nan() || below || above {
            Err(HacError::InvalidParameter {
                name: self.name,
                message: format!("{value} is outside [{:?}, {:?}]", self.min, self.max),
            })
        } else {
            Ok(())
        }
    }

    /// Checks a name against the declared choices.
    ///
    /// Parameters that are not choices accept any name.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the name is not one of the choices.
    pub fn check_choice(&self, value: &str) -> Result<()> {
        match self.kind {
            ParamKind::Choice(options) if !options.contains(&value) => Err(HacError::InvalidParameter {
                name: self.name,
                message: format!("`{value}` is not one of {options:?}"),
            }),
            _ => Ok(()),
        }
    }
}

/// An algorithm configuration with statically declared parameters.
pub trait Parameterized {
    /// The parameters of the configuration.
    fn params(&self) -> &'static [ParamSpec];

    /// Checks the current values against the declared parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for the first value that does not fit.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Creates a linkage.
pub type LinkageFactory = fn() -> Box<dyn Linkage>;
/// Creates an internal evaluator.
pub type EvaluatorFactory = fn() -> Box<dyn InternalEvaluator>;
/// Creates a cutoff strategy around an optional evaluator.
pub type CutoffFactory = fn(Option<Box<dyn InternalEvaluator>>) -> Box<dyn CutoffStrategy>;
/// Creates a merge evaluation from a configuration.
pub type MergeEvaluationFactory = fn(&ChameleonConfig) -> Box<dyn MergeEvaluation>;

/// A table from names to component factories.
#[derive(Clone, Default)]
pub struct Registry {
    /// Linkages by name.
    linkages: BTreeMap<String, LinkageFactory>,
    /// Internal evaluators by name.
    evaluators: BTreeMap<String, EvaluatorFactory>,
    /// Cutoff strategies by name.
    cutoffs: BTreeMap<String, CutoffFactory>,
    /// Merge evaluations by name.
    merge_evaluations: BTreeMap<String, MergeEvaluationFactory>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every component of this crate.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_linkage(Single::NAME, || Box::new(Single));
        registry.register_linkage(Complete::NAME, || Box::new(Complete));
        registry.register_linkage(Average::NAME, || Box::new(Average));
        registry.register_linkage(Weighted::NAME, || Box::new(Weighted));
        registry.register_linkage(Centroid::NAME, || Box::new(Centroid));
        registry.register_linkage(Median::NAME, || Box::new(Median));
        registry.register_linkage(Ward::NAME, || Box::new(Ward));

        registry.register_evaluator(Silhouette::NAME, || Box::new(Silhouette));
        registry.register_evaluator(McClainRao::NAME, || Box::new(McClainRao));

        registry.register_cutoff(HillClimbCutoff::NAME, |evaluator| {
            let mut strategy = HillClimbCutoff::default();
            if let Some(evaluator) = evaluator {
                strategy.set_evaluator(evaluator);
            }
            Box::new(strategy)
        });
        registry.register_cutoff(NaiveCutoff::NAME, |_| Box::new(NaiveCutoff));
        registry.register_cutoff(CopheneticCutoff::NAME, |_| Box::new(CopheneticCutoff));

        registry.register_merge_evaluation(Interconnectivity::NAME, |_| Box::new(Interconnectivity));
        registry.register_merge_evaluation(Closeness::NAME, |_| Box::new(Closeness));
        registry.register_merge_evaluation(RiRcSimilarity::NAME, |c| {
            Box::new(RiRcSimilarity::new(c.closeness_priority))
        });
        registry.register_merge_evaluation(WeightedObjectives::NAME, |c| {
            Box::new(WeightedObjectives::chameleon(
                c.interconnectivity_priority,
                c.closeness_priority,
            ))
        });

        registry
    }

    /// Registers a linkage, replacing any linkage of the same name.
    pub fn register_linkage(&mut self, name: &str, factory: LinkageFactory) {
        self.linkages.insert(name.to_string(), factory);
    }

    /// Registers an internal evaluator, replacing any of the same name.
    pub fn register_evaluator(&mut self, name: &str, factory: EvaluatorFactory) {
        self.evaluators.insert(name.to_string(), factory);
    }

    /// Registers a cutoff strategy, replacing any of the same name.
    pub fn register_cutoff(&mut self, name: &str, factory: CutoffFactory) {
        self.cutoffs.insert(name.to_string(), factory);
    }

    /// Registers a merge evaluation, replacing any of the same name.
    pub fn register_merge_evaluation(&mut self, name: &str, factory: MergeEvaluationFactory) {
        self.merge_evaluations.insert(name.to_string(), factory);
    }

    /// Creates the named linkage.
    ///
    /// # Errors
    ///
    /// - `UnknownComponent` if no linkage has that name.
    pub fn linkage(&self, name: &str) -> Result<Box<dyn Linkage>> {
        self.linkages
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| unknown("linkage", name))
    }

    /// Creates the named internal evaluator.
    ///
    /// # Errors
    ///
    /// - `UnknownComponent` if no evaluator has that name.
    pub fn evaluator(&self, name: &str) -> Result<Box<dyn InternalEvaluator>> {
        self.evaluators
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| unknown("evaluator", name))
    }

    /// Creates the named cutoff strategy, optionally around the named
    /// evaluator.
    ///
    /// # Errors
    ///
    /// - `UnknownComponent` if either name is unknown.
    pub fn cutoff(&self, name: &str, evaluator: Option<&str>) -> Result<Box<dyn CutoffStrategy>> {
        let factory = self.cutoffs.get(name).ok_or_else(|| unknown("cutoff strategy", name))?;
        let evaluator = evaluator.map(|e| self.evaluator(e)).transpose()?;
        Ok(factory(evaluator))
    }

    /// Creates the merge evaluation named by `config.similarity`.
    ///
    /// # Errors
    ///
    /// - `UnknownComponent` if no merge evaluation has that name.
    pub fn merge_evaluation(&self, config: &ChameleonConfig) -> Result<Box<dyn MergeEvaluation>> {
        self.merge_evaluations
            .get(&config.similarity)
            .map(|factory| factory(config))
            .ok_or_else(|| unknown("merge evaluation", &config.similarity))
    }

    /// The names of the registered linkages, sorted.
    #[must_use]
    pub fn linkage_names(&self) -> Vec<&str> {
        self.linkages.keys().map(String::as_str).collect()
    }

    /// The names of the registered evaluators, sorted.
    #[must_use]
    pub fn evaluator_names(&self) -> Vec<&str> {
        self.evaluators.keys().map(String::as_str).collect()
    }

    /// The names of the registered cutoff strategies, sorted.
    #[must_use]
    pub fn cutoff_names(&self) -> Vec<&str> {
        self.cutoffs.keys().map(String::as_str).collect()
    }
}

/// The error for a failed lookup.
fn unknown(kind: &'static str, name: &str) -> HacError {
    HacError::UnknownComponent {
        kind,
        name: name.to_string(),
    }
}
