//! Rock/paper/scissors as an extensive-form game.
//!
//! The matrix game becomes a two-level tree: the first player throws, then
//! the second player throws without seeing the choice: all three of the
//! second player's decision nodes share one information set. The unique
//! equilibrium mixes every throw at 1/3 and the game value is 0, which
//! makes this the simplest convergence check that still exercises a shared
//! information set.

use crate::games::{GameError, GameSolution};
use crate::mccfr::{MCCFRConfig, MonteCarloCFR};
use crate::tree::{GameTree, GameTreeBuilder, Player, TreeError};

const THROWS: [&str; 3] = ["rock", "paper", "scissors"];

/// Rock/paper/scissors with a configurable win payoff.
#[derive(Debug, Clone)]
pub struct RoshamboGame {
    /// Payoff to the winner of a non-tied round; the loser pays the same.
    pub win_payoff: f64,
}

impl Default for RoshamboGame {
    fn default() -> Self {
        Self { win_payoff: 1.0 }
    }
}

/// Closed-form equilibrium of the symmetric game.
#[derive(Debug, Clone, Copy)]
pub struct RoshamboEquilibrium {
    /// Probability of each throw for both players.
    pub throw_probability: f64,
    /// Expected payoff for the first player.
    pub game_value: f64,
}

impl RoshamboGame {
    /// Create the game with a unit win payoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mixed equilibrium: uniform throws, value zero.
    pub fn analytic_solution(&self) -> RoshamboEquilibrium {
        RoshamboEquilibrium {
            throw_probability: 1.0 / 3.0,
            game_value: 0.0,
        }
    }

    /// Build the extensive-form tree.
    ///
    /// Information sets: `X:throw` (one node) and `Y:throw` (three nodes,
    /// one per hidden first-player choice).
    pub fn build_game_tree(&self) -> Result<GameTree, TreeError> {
        let mut builder = GameTreeBuilder::new();
        builder.information_set("X:throw", Player::FirstPlayer, Some("First throw"))?;
        builder.information_set(
            "Y:throw",
            Player::SecondPlayer,
            Some("Second throw, first throw hidden"),
        )?;

        let root = builder.decision_node("X:throw")?;
        for x_throw in THROWS {
            let reply = builder.decision_node("Y:throw")?;
            builder.add_edge(root, x_throw, reply, None)?;
            for y_throw in THROWS {
                let payoff = self.payoff_for(x_throw, y_throw);
                let leaf = builder.terminal_node((payoff, -payoff));
                builder.add_edge(reply, y_throw, leaf, None)?;
            }
        }
        builder.build(root)
    }

    /// Build the tree and approximate the equilibrium with MCCFR.
    pub fn solve_mccfr(
        &self,
        iterations: u64,
        seed: Option<u64>,
        config: MCCFRConfig,
    ) -> Result<GameSolution, GameError> {
        let tree = self.build_game_tree()?;
        let mut engine = MonteCarloCFR::with_config(&tree, config)?;
        let result = engine.run(iterations, seed)?;
        Ok(GameSolution::from_result(&tree, &result)?)
    }

    /// First-player payoff for one pair of throws.
    fn payoff_for(&self, x_throw: &str, y_throw: &str) -> f64 {
        let beats = |a: &str, b: &str| {
            matches!(
                (a, b),
                ("rock", "scissors") | ("paper", "rock") | ("scissors", "paper")
            )
        };
        if beats(x_throw, y_throw) {
            self.win_payoff
        } else if beats(y_throw, x_throw) {
            -self.win_payoff
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_shares_one_information_set_across_replies() {
        let tree = RoshamboGame::new().build_game_tree().unwrap();
        let y_info = tree.information_set("Y:throw").unwrap();
        assert_eq!(y_info.nodes.len(), 3);
        assert_eq!(y_info.player, Player::SecondPlayer);
        for &id in &y_info.nodes {
            assert_eq!(tree.node(id).action_labels(), THROWS);
        }
        let x_info = tree.information_set("X:throw").unwrap();
        assert_eq!(x_info.nodes, vec![tree.root()]);
    }

    #[test]
    fn payoffs_are_antisymmetric() {
        let game = RoshamboGame::new();
        for a in THROWS {
            for b in THROWS {
                assert_eq!(game.payoff_for(a, b), -game.payoff_for(b, a));
            }
        }
        assert_eq!(game.payoff_for("rock", "scissors"), 1.0);
        assert_eq!(game.payoff_for("rock", "paper"), -1.0);
        assert_eq!(game.payoff_for("rock", "rock"), 0.0);
    }

    #[test]
    fn mccfr_converges_to_the_uniform_mix() {
        let game = RoshamboGame::new();
        let equilibrium = game.analytic_solution();
        let solution = game
            .solve_mccfr(50_000, Some(42), MCCFRConfig::default())
            .unwrap();

        for key in ["X:throw", "Y:throw"] {
            let strategy = &solution.info_set_strategies[key];
            let total: f64 = strategy.values().sum();
            assert!((total - 1.0).abs() < 1e-6);
            for throw in THROWS {
                assert!(
                    (strategy[throw] - equilibrium.throw_probability).abs() < 0.1,
                    "{} {} = {}",
                    key,
                    throw,
                    strategy[throw]
                );
            }
        }
        assert!((solution.game_value - equilibrium.game_value).abs() < 0.1);
    }
}
