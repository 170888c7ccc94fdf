//! # MCCFR Solver
//!
//! An external-sampling Monte Carlo CFR solver for two-player zero-sum
//! extensive-form games.
//!
//! ## Features
//!
//! - **Explicit Game Trees**: Build any game as an arena of chance,
//!   decision, and terminal nodes with shared information sets
//! - **External Sampling**: Each iteration updates one player exhaustively
//!   while sampling the opponent and chance, keeping traversals cheap
//! - **CFR+ and Linear Averaging**: Regret clipping and delayed, weighted
//!   strategy averaging, both configurable per run
//! - **Exact Evaluation**: Expected value of the learned average strategy
//!   by full tree expansion, no sampling noise
//! - **Validation Games**: Rock/paper/scissors and the clairvoyance game
//!   with closed-form equilibria to converge against
//!
//! ## Quick Start
//!
//! ```
//! use mccfr_solver::games::roshambo::RoshamboGame;
//! use mccfr_solver::mccfr::MCCFRConfig;
//!
//! let game = RoshamboGame::new();
//! let solution = game
//!     .solve_mccfr(10_000, Some(1), MCCFRConfig::default())
//!     .unwrap();
//! assert!(solution.game_value.abs() < 0.2);
//! ```
//!
//! Or drive the engine directly over a hand-built tree:
//!
//! ```
//! use mccfr_solver::mccfr::MonteCarloCFR;
//! use mccfr_solver::tree::{GameTreeBuilder, Player};
//!
//! let mut builder = GameTreeBuilder::new();
//! builder.information_set("X:choice", Player::FirstPlayer, None).unwrap();
//! let root = builder.decision_node("X:choice").unwrap();
//! let good = builder.terminal_node((1.0, -1.0));
//! let bad = builder.terminal_node((-1.0, 1.0));
//! builder.add_edge(root, "good", good, None).unwrap();
//! builder.add_edge(root, "bad", bad, None).unwrap();
//! let tree = builder.build(root).unwrap();
//!
//! let mut engine = MonteCarloCFR::new(&tree).unwrap();
//! let result = engine.run(1_000, Some(1)).unwrap();
//! let strategy = result.average_strategy("X:choice").unwrap();
//! assert!(strategy[0] > 0.9);
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: Game tree representation and builder
//! - [`mccfr`]: The external-sampling MCCFR engine
//! - [`games`]: Validation games with known equilibria

#![warn(missing_docs)]

pub mod games;
pub mod mccfr;
pub mod tree;

// Re-export commonly used types at crate root for convenience
pub use mccfr::{MCCFRConfig, MonteCarloCFR, MonteCarloCFRResult};
pub use tree::{GameTree, GameTreeBuilder, Player};
