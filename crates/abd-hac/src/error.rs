//! Error types used across the crate.

use crate::merge::MergeEvent;

/// Result alias for the crate.
pub type Result<T> = core::result::Result<T, HacError>;

/// Errors returned by the merge scheduler, the dendrogram and the cutoff
/// search.
#[derive(Debug, thiserror::Error)]
pub enum HacError {
    /// A linkage coefficient was evaluated for clusters whose sizes sum to zero.
    #[error("degenerate clusters of sizes {ma} and {mb} in linkage update")]
    DegenerateCluster {
        /// Size of the first merged cluster.
        ma: usize,
        /// Size of the second merged cluster.
        mb: usize,
    },

    /// The candidate queue produced a pair whose two ends are the same cluster.
    #[error("cannot merge cluster {0} with itself")]
    SameClusterMerge(usize),

    /// Fewer than two initial clusters were supplied.
    #[error("at least 2 initial clusters are required, got {0}")]
    EmptyInput(usize),

    /// A cutoff search was started without an evaluator.
    #[error("cutoff search requires an internal evaluator")]
    MissingEvaluator,

    /// An evaluator produced `NaN` or an infinite score.
    #[error("evaluator `{evaluator}` returned non-finite score {score} for {clusters} clusters")]
    NonFiniteScore {
        /// Name of the evaluator.
        evaluator: String,
        /// Number of clusters that were scored.
        clusters: usize,
        /// The offending score.
        score: f64,
    },

    /// The merge loop observed a raised cancellation flag.
    #[error("merging was cancelled")]
    Cancelled,

    /// A dendrogram was requested from an incomplete merge sequence.
    #[error("incomplete tree: {merges} merges recorded for {leaves} leaves")]
    IncompleteTree {
        /// Number of leaves in the tree.
        leaves: usize,
        /// Number of merges that were recorded.
        merges: usize,
    },

    /// An operation needed the proximity matrix, but it was not kept.
    #[error("the proximity matrix was not kept for this result")]
    MissingProximity,

    /// A parameter was out of its declared range.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A registry lookup failed.
    #[error("unknown {kind} `{name}`")]
    UnknownComponent {
        /// The kind of component, e.g. "linkage".
        kind: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a tree failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An unrecoverable failure inside the merge loop, carrying the merges
    /// that completed before it.
    #[error("merging aborted after {} merges: {source}", partial.len())]
    Aborted {
        /// The failure that stopped the run.
        source: Box<HacError>,
        /// Merge events emitted before the failure, for diagnostics only.
        partial: Vec<MergeEvent>,
    },
}

impl HacError {
    /// Wraps `self` together with the merges completed so far.
    #[must_use]
    pub fn aborted(self, partial: Vec<MergeEvent>) -> Self {
        Self::Aborted {
            source: Box::new(self),
            partial,
        }
    }

    /// Returns the failure at the root of an `Aborted` chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Aborted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the partial merge sequence carried by an `Aborted` error.
    #[must_use]
    pub fn partial_merges(&self) -> Option<&[MergeEvent]> {
        match self {
            Self::Aborted { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

impl From<bincode::Error> for HacError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
