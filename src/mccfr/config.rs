//! Configuration options for the MCCFR engine.

use serde::{Deserialize, Serialize};

/// Configuration for the MCCFR engine.
///
/// Fixed at engine construction and overridable per run through
/// [`MonteCarloCFR::run_with_config`](crate::mccfr::MonteCarloCFR::run_with_config).
///
/// # Example
/// ```
/// use mccfr_solver::mccfr::MCCFRConfig;
///
/// let config = MCCFRConfig::default();
/// assert!(config.use_cfr_plus); // CFR+ is enabled by default
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MCCFRConfig {
    /// Use the CFR+ variant: clip cumulative regret to non-negative after
    /// every update. Enabled by default.
    ///
    /// Under external sampling the clip acts on sampled action values, so
    /// at an information set whose equilibrium mixes, zero-mean sampling
    /// noise rectifies into positive drift and the average strategy can
    /// settle away from the equilibrium frequencies. Disable it when the
    /// solution's mixed frequencies matter; the bias does not decay with
    /// more iterations.
    pub use_cfr_plus: bool,

    /// Number of initial iterations excluded from the strategy average.
    ///
    /// Early iterations are dominated by the uniform bootstrap strategy;
    /// skipping them as burn-in gives a cleaner average.
    pub average_delay: u64,

    /// Weight each iteration's contribution to the average by
    /// `iteration - average_delay` (linear averaging, favoring later and
    /// more refined iterations). When false, every contributing iteration
    /// counts equally.
    pub average_weighting: bool,
}

impl Default for MCCFRConfig {
    fn default() -> Self {
        Self {
            use_cfr_plus: true,
            average_delay: 100,
            average_weighting: true,
        }
    }
}

impl MCCFRConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set whether to use CFR+.
    pub fn with_cfr_plus(mut self, enable: bool) -> Self {
        self.use_cfr_plus = enable;
        self
    }

    /// Builder method: set the averaging burn-in.
    pub fn with_average_delay(mut self, delay: u64) -> Self {
        self.average_delay = delay;
        self
    }

    /// Builder method: set linear averaging on or off.
    pub fn with_average_weighting(mut self, enable: bool) -> Self {
        self.average_weighting = enable;
        self
    }
}

/// Errors raised by the MCCFR engine.
///
/// Construction errors surface from [`MonteCarloCFR::new`] before any work
/// begins; argument errors from [`run`]. There is no partial failure: a run
/// either rejects its arguments up front or completes.
///
/// [`MonteCarloCFR::new`]: crate::mccfr::MonteCarloCFR::new
/// [`run`]: crate::mccfr::MonteCarloCFR::run
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An information set has no member nodes.
    EmptyInformationSet(String),
    /// An information set's nodes have no outgoing actions.
    NoActions(String),
    /// Two nodes sharing an information set expose different ordered action
    /// labels.
    InconsistentActions {
        /// The offending information set key.
        key: String,
        /// Action labels of the set's first node.
        expected: Vec<String>,
        /// Conflicting labels found on another member node.
        found: Vec<String>,
    },
    /// `run` was called with zero iterations.
    InvalidIterations,
    /// A decision node referenced an information set the engine has no
    /// state for.
    MissingInfoSet(String),
    /// A decision node carries no information set at all.
    DetachedDecisionNode(crate::tree::NodeId),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::EmptyInformationSet(key) => {
                write!(f, "Information set {} has no nodes", key)
            }
            EngineError::NoActions(key) => {
                write!(f, "Information set {} has no outgoing actions", key)
            }
            EngineError::InconsistentActions {
                key,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Inconsistent actions in information set {}: {:?} vs {:?}",
                    key, found, expected
                )
            }
            EngineError::InvalidIterations => write!(f, "iterations must be positive"),
            EngineError::MissingInfoSet(key) => {
                write!(f, "Player node references unknown information set {}", key)
            }
            EngineError::DetachedDecisionNode(id) => {
                write!(f, "Player node {} is missing an information set", id)
            }
        }
    }
}

impl std::error::Error for EngineError {}
