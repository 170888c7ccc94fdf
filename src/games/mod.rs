//! Validation games for the MCCFR engine.
//!
//! Tiny games with known closed-form equilibria. These serve as:
//!
//! 1. **Validation**: the convergence tests compare MCCFR output against
//!    each game's analytic solution.
//! 2. **Examples**: they demonstrate how a concrete game drives the
//!    [`GameTreeBuilder`](crate::tree::GameTreeBuilder).
//! 3. **Benchmarks**: standardized trees for performance testing.
//!
//! ## Available Games
//!
//! - [`roshambo`]: rock/paper/scissors as a sequential tree with an
//!   imperfect-information second mover; uniform 1/3 equilibrium, value 0
//! - [`clairvoyance`]: the half-street bluffing game where the bettor
//!   knows both hands; known call and bluff frequencies in terms of pot
//!   and bet size

pub mod clairvoyance;
pub mod roshambo;

use rustc_hash::FxHashMap;
use std::fmt;

use crate::mccfr::{EngineError, MCCFRConfig, MonteCarloCFRResult};
use crate::tree::{GameTree, TreeError};

/// Owned summary of a solved game, decoupled from the tree and engine
/// lifetimes.
#[derive(Debug, Clone)]
pub struct GameSolution {
    /// Expected payoff for the first player under the average strategy.
    pub game_value: f64,
    /// Average strategy per information set, keyed by action label.
    pub info_set_strategies: FxHashMap<String, FxHashMap<String, f64>>,
    /// Cumulative regret per information set, keyed by action label.
    pub info_set_regrets: FxHashMap<String, FxHashMap<String, f64>>,
    /// Iterations of the producing run.
    pub iterations: u64,
    /// Configuration of the producing run.
    pub config: MCCFRConfig,
}

impl GameSolution {
    pub(crate) fn from_result(
        tree: &GameTree,
        result: &MonteCarloCFRResult<'_>,
    ) -> Result<Self, EngineError> {
        let mut info_set_strategies = FxHashMap::default();
        let mut info_set_regrets = FxHashMap::default();
        for info in tree.all_information_sets() {
            if let Some(strategy) = result.average_strategy_map(&info.key) {
                info_set_strategies.insert(info.key.clone(), strategy);
            }
            if let Some(regrets) = result.cumulative_regret_map(&info.key) {
                info_set_regrets.insert(info.key.clone(), regrets);
            }
        }
        Ok(Self {
            game_value: result.expected_value()?,
            info_set_strategies,
            info_set_regrets,
            iterations: result.iterations(),
            config: result.config().clone(),
        })
    }
}

/// Errors surfaced by a game's build-and-solve convenience path.
#[derive(Debug, Clone)]
pub enum GameError {
    /// The game tree failed to build.
    Tree(TreeError),
    /// The engine rejected the tree or the run arguments.
    Engine(EngineError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Tree(err) => write!(f, "{}", err),
            GameError::Engine(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GameError {}

impl From<TreeError> for GameError {
    fn from(err: TreeError) -> Self {
        GameError::Tree(err)
    }
}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        GameError::Engine(err)
    }
}
