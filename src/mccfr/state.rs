//! Per-information-set accumulators.
//!
//! The engine keeps one [`InfoSetState`] per information set: cumulative
//! regret and cumulative strategy weight, one entry per action. Regret
//! matching over these accumulators yields the per-iteration strategy;
//! normalizing the strategy weights yields the output equilibrium
//! approximation.

use rustc_hash::FxHashMap;

use crate::mccfr::config::EngineError;
use crate::tree::{GameTree, InformationSet};

/// Totals at or below this are treated as all-zero and fall back to the
/// uniform distribution. An expected transient state, not an error.
const STRATEGY_EPSILON: f64 = 1e-12;

/// Regret and strategy-weight book-keeping for a single information set.
///
/// Created when the engine is constructed, mutated every iteration, never
/// resized: both vectors always match the action list in length.
#[derive(Debug, Clone)]
pub struct InfoSetState {
    actions: Vec<String>,
    cumulative_regrets: Vec<f64>,
    strategy_sum: Vec<f64>,
}

impl InfoSetState {
    /// Build the state for one information set, validating that every
    /// member node exposes the same ordered action labels.
    ///
    /// # Errors
    /// - [`EngineError::EmptyInformationSet`] when the set has no nodes
    /// - [`EngineError::NoActions`] when its nodes have no outgoing edges
    /// - [`EngineError::InconsistentActions`] when member nodes disagree on
    ///   the action list
    pub fn from_info_set(info: &InformationSet, tree: &GameTree) -> Result<Self, EngineError> {
        let first = match info.nodes.first() {
            Some(&id) => id,
            None => return Err(EngineError::EmptyInformationSet(info.key.clone())),
        };

        let actions = tree.node(first).action_labels();
        if actions.is_empty() {
            return Err(EngineError::NoActions(info.key.clone()));
        }

        for &id in &info.nodes[1..] {
            let node_actions = tree.node(id).action_labels();
            if node_actions != actions {
                return Err(EngineError::InconsistentActions {
                    key: info.key.clone(),
                    expected: actions,
                    found: node_actions,
                });
            }
        }

        let size = actions.len();
        Ok(Self {
            actions,
            cumulative_regrets: vec![0.0; size],
            strategy_sum: vec![0.0; size],
        })
    }

    /// Regret matching: strategy proportional to positive cumulative
    /// regrets, uniform when no regret is positive.
    ///
    /// This is the strategy used *during* an iteration, both to branch
    /// exhaustively for the updating player and to sample the opponent.
    pub fn current_strategy(&self) -> Vec<f64> {
        let positive: Vec<f64> = self
            .cumulative_regrets
            .iter()
            .map(|&r| r.max(0.0))
            .collect();
        Self::normalize_or_uniform(&positive)
    }

    /// The output equilibrium approximation: the normalized cumulative
    /// strategy weights, uniform when nothing has accumulated yet.
    pub fn average_strategy(&self) -> Vec<f64> {
        Self::normalize_or_uniform(&self.strategy_sum)
    }

    /// Average strategy keyed by action label.
    pub fn average_strategy_map(&self) -> FxHashMap<String, f64> {
        self.actions
            .iter()
            .cloned()
            .zip(self.average_strategy())
            .collect()
    }

    /// Cumulative regrets keyed by action label.
    pub fn cumulative_regret_map(&self) -> FxHashMap<String, f64> {
        self.actions
            .iter()
            .cloned()
            .zip(self.cumulative_regrets.iter().copied())
            .collect()
    }

    /// Ordered action labels shared by every node of the information set.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Cumulative regret per action.
    pub fn cumulative_regrets(&self) -> &[f64] {
        &self.cumulative_regrets
    }

    /// Cumulative strategy weight per action.
    pub fn strategy_sum(&self) -> &[f64] {
        &self.strategy_sum
    }

    /// Add `weight * strategy` to the strategy-weight accumulator.
    pub(crate) fn add_strategy_weight(&mut self, weight: f64, strategy: &[f64]) {
        for (sum, &prob) in self.strategy_sum.iter_mut().zip(strategy) {
            *sum += weight * prob;
        }
    }

    /// Accumulate counterfactual regret `reach * (value - node_value)` per
    /// action, clipping to non-negative when CFR+ is enabled.
    pub(crate) fn apply_regrets(
        &mut self,
        action_values: &[f64],
        node_value: f64,
        counterfactual_reach: f64,
        use_cfr_plus: bool,
    ) {
        for (regret, &value) in self.cumulative_regrets.iter_mut().zip(action_values) {
            *regret += counterfactual_reach * (value - node_value);
            if use_cfr_plus && *regret < 0.0 {
                *regret = 0.0;
            }
        }
    }

    /// Zero the strategy-weight accumulator. Called at the start of every
    /// run so repeated runs with different averaging configuration start
    /// clean; cumulative regrets persist.
    pub(crate) fn reset_strategy_sum(&mut self) {
        for sum in &mut self.strategy_sum {
            *sum = 0.0;
        }
    }

    fn normalize_or_uniform(weights: &[f64]) -> Vec<f64> {
        let total: f64 = weights.iter().sum();
        if total > STRATEGY_EPSILON {
            weights.iter().map(|&w| w / total).collect()
        } else {
            vec![1.0 / weights.len() as f64; weights.len()]
        }
    }
}
