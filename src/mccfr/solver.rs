//! External-sampling MCCFR engine.
//!
//! One engine instance owns the per-information-set accumulators for one
//! tree and mutates them in place across iterations. Every iteration makes
//! two full recursive passes, one updating each player's regrets: the
//! updating player explores all of their actions exhaustively while the
//! opponent and chance are sampled once per traversal. Randomness comes
//! from a single seeded generator threaded explicitly through the
//! recursion, so identical `(tree, iterations, seed, config)` inputs
//! produce bit-identical accumulators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::mccfr::config::{EngineError, MCCFRConfig};
use crate::mccfr::result::MonteCarloCFRResult;
use crate::mccfr::state::InfoSetState;
use crate::tree::{GameTree, GameTreeEdge, NodeId, Player};

/// External-sampling MCCFR for two-player zero-sum games.
///
/// # Example
/// ```ignore
/// use mccfr_solver::mccfr::MonteCarloCFR;
///
/// let tree = my_game.build_game_tree()?;
/// let mut engine = MonteCarloCFR::new(&tree)?;
/// let result = engine.run(50_000, Some(42))?;
/// let strategy = result.average_strategy_map("X:choice");
/// ```
pub struct MonteCarloCFR<'a> {
    tree: &'a GameTree,
    config: MCCFRConfig,
    info_states: FxHashMap<String, InfoSetState>,
    iterations_run: u64,
}

impl<'a> MonteCarloCFR<'a> {
    /// Create an engine over `tree` with the default configuration.
    ///
    /// # Errors
    /// Fails fast on malformed information sets: zero member nodes, zero
    /// actions, or member nodes whose ordered action labels disagree.
    pub fn new(tree: &'a GameTree) -> Result<Self, EngineError> {
        Self::with_config(tree, MCCFRConfig::default())
    }

    /// Create an engine with an explicit configuration.
    ///
    /// # Errors
    /// Same validation as [`MonteCarloCFR::new`].
    pub fn with_config(tree: &'a GameTree, config: MCCFRConfig) -> Result<Self, EngineError> {
        let mut info_states = FxHashMap::default();
        for info in tree.all_information_sets() {
            let state = InfoSetState::from_info_set(info, tree)?;
            info_states.insert(info.key.clone(), state);
        }

        // Every decision node must resolve to an engine state before any
        // iteration starts.
        for id in 0..tree.num_nodes() {
            let node = tree.node(id);
            if !node.player.is_acting() {
                continue;
            }
            let key = node
                .info_set
                .as_deref()
                .ok_or(EngineError::DetachedDecisionNode(id))?;
            if !info_states.contains_key(key) {
                return Err(EngineError::MissingInfoSet(key.to_string()));
            }
        }

        Ok(Self {
            tree,
            config,
            info_states,
            iterations_run: 0,
        })
    }

    /// Run `iterations` iterations of external-sampling MCCFR.
    ///
    /// Strategy-weight accumulators are reset at the start of every run so
    /// repeated runs with different averaging configuration start clean;
    /// cumulative regrets persist across runs of the same engine, since
    /// regret accumulation is what drives convergence.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations; each makes two full passes,
    ///   one updating each player
    /// * `seed` - Seed for the traversal's random generator; `None` draws
    ///   one from entropy
    ///
    /// # Errors
    /// [`EngineError::InvalidIterations`] when `iterations` is zero.
    pub fn run(
        &mut self,
        iterations: u64,
        seed: Option<u64>,
    ) -> Result<MonteCarloCFRResult<'_>, EngineError> {
        if iterations == 0 {
            return Err(EngineError::InvalidIterations);
        }

        for state in self.info_states.values_mut() {
            state.reset_strategy_sum();
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let root = self.tree.root();
        for iteration in 1..=iterations {
            self.visit(root, 0, [1.0, 1.0], iteration, &mut rng)?;
            self.visit(root, 1, [1.0, 1.0], iteration, &mut rng)?;
        }

        self.iterations_run = iterations;
        Ok(self.result())
    }

    /// Run with a configuration override for this run only; the engine's
    /// own configuration is restored afterwards. The returned result
    /// reports the override.
    pub fn run_with_config(
        &mut self,
        iterations: u64,
        seed: Option<u64>,
        config: MCCFRConfig,
    ) -> Result<MonteCarloCFRResult<'_>, EngineError> {
        let previous = std::mem::replace(&mut self.config, config);
        let outcome = self.run(iterations, seed).map(|_| ());
        let used = std::mem::replace(&mut self.config, previous);
        outcome?;
        Ok(MonteCarloCFRResult::new(
            self.tree,
            &self.info_states,
            self.iterations_run,
            used,
        ))
    }

    /// Snapshot the trained accumulators without running.
    ///
    /// Useful when the engine outlives the borrow returned by
    /// [`MonteCarloCFR::run`], e.g. after [`solve_seeds`].
    pub fn result(&self) -> MonteCarloCFRResult<'_> {
        MonteCarloCFRResult::new(
            self.tree,
            &self.info_states,
            self.iterations_run,
            self.config.clone(),
        )
    }

    /// The engine's current configuration.
    pub fn config(&self) -> &MCCFRConfig {
        &self.config
    }

    /// Number of information-set states the engine maintains.
    pub fn num_info_sets(&self) -> usize {
        self.info_states.len()
    }

    /// Recursive traversal returning the subtree value for the updating
    /// player.
    ///
    /// `reach` tracks each acting player's own contribution to the
    /// probability of reaching `node`; chance is resolved by sampling once
    /// per traversal and is not tracked separately.
    fn visit(
        &mut self,
        node_id: NodeId,
        updating: usize,
        reach: [f64; 2],
        iteration: u64,
        rng: &mut StdRng,
    ) -> Result<f64, EngineError> {
        let tree = self.tree;
        let node = tree.node(node_id);

        if let Some((first, second)) = node.payoffs {
            return Ok(if updating == 0 { first } else { second });
        }

        if node.player == Player::Chance {
            let edge = sample_chance_edge(&node.edges, rng);
            return self.visit(edge.child, updating, reach, iteration, rng);
        }

        let player = match node.player.index() {
            Some(player) => player,
            None => return Err(EngineError::DetachedDecisionNode(node_id)),
        };
        let key = node
            .info_set
            .as_deref()
            .ok_or(EngineError::DetachedDecisionNode(node_id))?;

        let strategy = self
            .info_states
            .get(key)
            .ok_or_else(|| EngineError::MissingInfoSet(key.to_string()))?
            .current_strategy();
        let opponent = 1 - player;

        // Average-strategy contribution, weighted by the opponent's reach
        // (counterfactual reach); the acting player's own reach along the
        // explored path is handled by the exhaustive branching below.
        if player == updating && iteration > self.config.average_delay {
            let weight = if self.config.average_weighting {
                (iteration - self.config.average_delay) as f64
            } else {
                1.0
            };
            self.state_mut(key)?
                .add_strategy_weight(weight * reach[opponent], &strategy);
        }

        if player == updating {
            // Updating player: explore every action exhaustively.
            let mut action_values = vec![0.0; node.edges.len()];
            let mut node_value = 0.0;
            for (index, edge) in node.edges.iter().enumerate() {
                let mut next_reach = reach;
                next_reach[player] *= strategy[index];
                action_values[index] =
                    self.visit(edge.child, updating, next_reach, iteration, rng)?;
                node_value += strategy[index] * action_values[index];
            }

            let use_cfr_plus = self.config.use_cfr_plus;
            self.state_mut(key)?.apply_regrets(
                &action_values,
                node_value,
                reach[opponent],
                use_cfr_plus,
            );
            Ok(node_value)
        } else {
            // Opponent: sample a single action; never branch on the
            // non-updating player's decisions.
            let index = sample_index(&strategy, rng);
            let mut next_reach = reach;
            next_reach[player] *= strategy[index];
            self.visit(node.edges[index].child, updating, next_reach, iteration, rng)
        }
    }

    fn state_mut(&mut self, key: &str) -> Result<&mut InfoSetState, EngineError> {
        self.info_states
            .get_mut(key)
            .ok_or_else(|| EngineError::MissingInfoSet(key.to_string()))
    }
}

/// Train one independent engine per seed over a shared read-only tree.
///
/// Each engine owns its own accumulators, so the runs are embarrassingly
/// parallel; use this for variance estimation across seeds. The returned
/// engines are in seed order; query them through
/// [`MonteCarloCFR::result`].
///
/// # Errors
/// Propagates the first construction or argument error.
pub fn solve_seeds<'t>(
    tree: &'t GameTree,
    config: &MCCFRConfig,
    iterations: u64,
    seeds: &[u64],
) -> Result<Vec<MonteCarloCFR<'t>>, EngineError> {
    seeds
        .par_iter()
        .map(|&seed| {
            let mut engine = MonteCarloCFR::with_config(tree, config.clone())?;
            engine.run(iterations, Some(seed))?;
            Ok(engine)
        })
        .collect()
}

/// Sample a chance edge by cumulative-probability draw, renormalizing in
/// case the stored probabilities drifted from summing to 1.
fn sample_chance_edge<'e>(edges: &'e [GameTreeEdge], rng: &mut StdRng) -> &'e GameTreeEdge {
    let total: f64 = edges.iter().map(|edge| edge.probability).sum();
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for edge in edges {
        cumulative += edge.probability / total;
        if draw <= cumulative {
            return edge;
        }
    }
    // Floating-point edge case: fall back to the last edge.
    &edges[edges.len() - 1]
}

/// Sample an index from a normalized strategy by cumulative-probability
/// draw.
fn sample_index(strategy: &[f64], rng: &mut StdRng) -> usize {
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (index, &probability) in strategy.iter().enumerate() {
        cumulative += probability;
        if draw <= cumulative {
            return index;
        }
    }
    strategy.len() - 1
}
