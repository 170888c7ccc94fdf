//! Monte Carlo Counterfactual Regret Minimization engine.
//!
//! # Overview
//!
//! CFR converges to a Nash equilibrium of a two-player zero-sum game by
//! repeatedly:
//! 1. Computing counterfactual regret for each action at each information set
//! 2. Deriving the next strategy from accumulated regret (regret matching)
//! 3. Averaging strategies across iterations; the *average* strategy is
//!    the equilibrium approximation, never the per-iteration one
//!
//! This engine is the external-sampling Monte Carlo variant: every
//! iteration makes two passes over the tree, one per player. The player
//! being updated explores all of their actions exhaustively; the opponent
//! and chance are sampled once per traversal. CFR+ (non-negative regret
//! clipping) and linear strategy averaging with a burn-in delay are
//! configurable through [`MCCFRConfig`].
//!
//! # Usage
//!
//! 1. Build a [`GameTree`](crate::tree::GameTree) with your game's payoffs
//! 2. Construct a [`MonteCarloCFR`] over it
//! 3. Call [`run`](MonteCarloCFR::run) with an iteration count and seed
//! 4. Query the returned [`MonteCarloCFRResult`] for strategies, regrets,
//!    and the exact expected value
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Lanctot, M., et al. "Monte Carlo Sampling for Regret Minimization in Extensive Games" (2009)
//! - Tammelin, O. "Solving Large Imperfect Information Games Using CFR+" (2014)

pub mod config;
pub mod result;
pub mod solver;
pub mod state;

pub use config::{EngineError, MCCFRConfig};
pub use result::{MonteCarloCFRResult, SolutionExport};
pub use solver::{solve_seeds, MonteCarloCFR};
pub use state::InfoSetState;
