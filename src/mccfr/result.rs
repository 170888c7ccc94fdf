//! Query API over a trained engine.
//!
//! [`MonteCarloCFRResult`] is a read-only view of the tree plus the
//! accumulators the run mutated. Besides per-key strategy and regret
//! lookups it computes the expected value of the average-strategy profile
//! by full deterministic tree expansion, with no sampling, which is what
//! the analytic comparisons validate against and is far lower-variance
//! than averaging sampled playouts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::mccfr::config::{EngineError, MCCFRConfig};
use crate::mccfr::state::InfoSetState;
use crate::tree::{GameTree, NodeId, Player};

/// Read-only snapshot of a finished MCCFR run.
#[derive(Debug)]
pub struct MonteCarloCFRResult<'a> {
    tree: &'a GameTree,
    info_states: &'a FxHashMap<String, InfoSetState>,
    iterations: u64,
    config: MCCFRConfig,
}

impl<'a> MonteCarloCFRResult<'a> {
    pub(crate) fn new(
        tree: &'a GameTree,
        info_states: &'a FxHashMap<String, InfoSetState>,
        iterations: u64,
        config: MCCFRConfig,
    ) -> Self {
        Self {
            tree,
            info_states,
            iterations,
            config,
        }
    }

    /// Number of iterations of the run that produced this result.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The averaging configuration used for the run.
    pub fn config(&self) -> &MCCFRConfig {
        &self.config
    }

    /// Keys of all trained information sets, in unspecified order.
    pub fn info_set_keys(&self) -> impl Iterator<Item = &str> {
        self.info_states.keys().map(String::as_str)
    }

    /// Full accumulator state for one information set.
    pub fn state(&self, info_key: &str) -> Option<&InfoSetState> {
        self.info_states.get(info_key)
    }

    /// Average strategy for one information set, ordered like its actions.
    pub fn average_strategy(&self, info_key: &str) -> Option<Vec<f64>> {
        self.info_states
            .get(info_key)
            .map(InfoSetState::average_strategy)
    }

    /// Average strategy keyed by action label.
    pub fn average_strategy_map(&self, info_key: &str) -> Option<FxHashMap<String, f64>> {
        self.info_states
            .get(info_key)
            .map(InfoSetState::average_strategy_map)
    }

    /// Cumulative regrets for one information set, ordered like its actions.
    pub fn cumulative_regrets(&self, info_key: &str) -> Option<Vec<f64>> {
        self.info_states
            .get(info_key)
            .map(|state| state.cumulative_regrets().to_vec())
    }

    /// Cumulative regrets keyed by action label.
    pub fn cumulative_regret_map(&self, info_key: &str) -> Option<FxHashMap<String, f64>> {
        self.info_states
            .get(info_key)
            .map(InfoSetState::cumulative_regret_map)
    }

    /// Expected payoff for the first player under the average-strategy
    /// profile, computed by exact recursive expansion of the whole tree.
    ///
    /// # Errors
    /// [`EngineError::MissingInfoSet`] or
    /// [`EngineError::DetachedDecisionNode`] on a decision node the engine
    /// has no strategy for; unreachable for trees that passed engine
    /// construction.
    pub fn expected_value(&self) -> Result<f64, EngineError> {
        let profile: FxHashMap<&str, Vec<f64>> = self
            .info_states
            .iter()
            .map(|(key, state)| (key.as_str(), state.average_strategy()))
            .collect();
        self.node_value(self.tree.root(), &profile)
    }

    fn node_value(
        &self,
        id: NodeId,
        profile: &FxHashMap<&str, Vec<f64>>,
    ) -> Result<f64, EngineError> {
        let node = self.tree.node(id);

        if let Some((first, _)) = node.payoffs {
            return Ok(first);
        }

        if node.player == Player::Chance {
            let mut total = 0.0;
            for edge in &node.edges {
                total += edge.probability * self.node_value(edge.child, profile)?;
            }
            return Ok(total);
        }

        let key = node
            .info_set
            .as_deref()
            .ok_or(EngineError::DetachedDecisionNode(id))?;
        let strategy = profile
            .get(key)
            .ok_or_else(|| EngineError::MissingInfoSet(key.to_string()))?;

        let mut value = 0.0;
        for (index, edge) in node.edges.iter().enumerate() {
            value += strategy[index] * self.node_value(edge.child, profile)?;
        }
        Ok(value)
    }

    /// Serializable snapshot of the run's outcome.
    pub fn export(&self) -> SolutionExport {
        let average_strategies = self
            .info_states
            .iter()
            .map(|(key, state)| (key.clone(), state.average_strategy_map()))
            .collect();
        let cumulative_regrets = self
            .info_states
            .iter()
            .map(|(key, state)| (key.clone(), state.cumulative_regret_map()))
            .collect();
        SolutionExport {
            iterations: self.iterations,
            config: self.config.clone(),
            average_strategies,
            cumulative_regrets,
        }
    }
}

/// Serializable export of a solved run, for persistence and analysis
/// outside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionExport {
    /// Iterations of the producing run.
    pub iterations: u64,
    /// Averaging configuration of the producing run.
    pub config: MCCFRConfig,
    /// Average strategy per information set, keyed by action label.
    pub average_strategies: FxHashMap<String, FxHashMap<String, f64>>,
    /// Cumulative regret per information set, keyed by action label.
    pub cumulative_regrets: FxHashMap<String, FxHashMap<String, f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mccfr::solver::MonteCarloCFR;
    use crate::tree::GameTreeBuilder;

    fn coin_flip_tree() -> GameTree {
        let mut builder = GameTreeBuilder::new();
        let root = builder.chance_node();
        let win = builder.terminal_node((1.0, -1.0));
        let lose = builder.terminal_node((-1.0, 1.0));
        builder.add_chance_edge(root, "win", win, 0.5, None).unwrap();
        builder.add_chance_edge(root, "lose", lose, 0.5, None).unwrap();
        builder.build(root).unwrap()
    }

    #[test]
    fn expected_value_of_even_coin_flip_is_exactly_zero() {
        let tree = coin_flip_tree();
        let mut engine = MonteCarloCFR::new(&tree).unwrap();
        let result = engine.run(1, Some(0)).unwrap();
        assert_eq!(result.expected_value().unwrap(), 0.0);
    }

    #[test]
    fn lookups_return_none_for_unknown_keys() {
        let tree = coin_flip_tree();
        let mut engine = MonteCarloCFR::new(&tree).unwrap();
        let result = engine.run(1, Some(0)).unwrap();
        assert!(result.average_strategy("nope").is_none());
        assert!(result.cumulative_regret_map("nope").is_none());
    }

    #[test]
    fn export_round_trips_through_json() {
        let mut builder = GameTreeBuilder::new();
        builder
            .information_set("X:choice", crate::tree::Player::FirstPlayer, None)
            .unwrap();
        let root = builder.decision_node("X:choice").unwrap();
        let a = builder.terminal_node((1.0, -1.0));
        let b = builder.terminal_node((-1.0, 1.0));
        builder.add_edge(root, "up", a, None).unwrap();
        builder.add_edge(root, "down", b, None).unwrap();
        let tree = builder.build(root).unwrap();

        let mut engine = MonteCarloCFR::new(&tree).unwrap();
        let result = engine.run(200, Some(9)).unwrap();
        let export = result.export();

        let json = serde_json::to_string(&export).unwrap();
        let restored: SolutionExport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.iterations, 200);
        assert_eq!(
            restored.average_strategies["X:choice"],
            export.average_strategies["X:choice"]
        );
        assert_eq!(
            restored.cumulative_regrets["X:choice"],
            export.cumulative_regrets["X:choice"]
        );
    }
}
