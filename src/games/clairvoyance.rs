//! The clairvoyance game: half-street betting with a perfectly informed
//! bettor.
//!
//! Chance deals the second player (`Y`) either the nuts or a dead hand,
//! each half the time, and `Y` sees the deal. `Y` may check (showdown for
//! the pot) or bet a fixed amount. Facing a bet, the first player (`X`)
//! holds a bluff-catcher and must fold or call without knowing `Y`'s hand.
//!
//! The equilibrium is known in closed form: `Y` always bets the nuts and
//! bluffs with probability `B / (2P + B)`; `X` calls with probability
//! `2P / (2P + B)`. With `P = B = 1` that is a 1/3 bluff, a 2/3 call, and
//! a first-player value of -1/3 pot units. Because the solution moves with
//! the pot and bet sizes, this game checks that the engine tracks payoff
//! structure and not just symmetry.

use crate::games::{GameError, GameSolution};
use crate::mccfr::{MCCFRConfig, MonteCarloCFR};
use crate::tree::{ChanceDistribution, GameTree, GameTreeBuilder, Player, TreeError};

/// Half-street game between a clairvoyant bettor and a bluff-catcher.
#[derive(Debug, Clone)]
pub struct ClairvoyanceGame {
    /// Pot size at the start of the street.
    pub pot_size: f64,
    /// Fixed bet size available to the bettor.
    pub bet_size: f64,
}

impl Default for ClairvoyanceGame {
    fn default() -> Self {
        Self {
            pot_size: 1.0,
            bet_size: 1.0,
        }
    }
}

/// Closed-form equilibrium of the clairvoyance game.
#[derive(Debug, Clone, Copy)]
pub struct ClairvoyanceEquilibrium {
    /// Probability that the bettor bets when holding a dead hand.
    pub bluff_frequency: f64,
    /// Probability that the bluff-catcher calls a bet.
    pub call_frequency: f64,
    /// Expected payoff for the bluff-catcher (the first player).
    pub game_value: f64,
}

impl ClairvoyanceGame {
    /// Create the game with a pot-sized bet into a unit pot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the game with explicit pot and bet sizes.
    pub fn with_sizes(pot_size: f64, bet_size: f64) -> Self {
        Self { pot_size, bet_size }
    }

    /// The equilibrium frequencies and value.
    ///
    /// The bettor always bets the nuts; the bluff and call frequencies make
    /// the opponent indifferent, which pins them at `B / (2P + B)` and
    /// `2P / (2P + B)` respectively.
    pub fn analytic_solution(&self) -> ClairvoyanceEquilibrium {
        let p = self.pot_size;
        let b = self.bet_size;
        ClairvoyanceEquilibrium {
            bluff_frequency: b / (2.0 * p + b),
            call_frequency: 2.0 * p / (2.0 * p + b),
            game_value: -(p * b) / (2.0 * p + b),
        }
    }

    /// Build the extensive-form tree.
    ///
    /// Information sets: `Y:nuts` and `Y:bluff` for the bettor (who sees
    /// the deal) and a single `X:bet_response` for the bluff-catcher, who
    /// cannot distinguish a value bet from a bluff.
    pub fn build_game_tree(&self) -> Result<GameTree, TreeError> {
        let p = self.pot_size;
        let b = self.bet_size;

        let deal = ChanceDistribution::new(
            "deal",
            vec![("nuts".to_string(), 0.5), ("bluff".to_string(), 0.5)],
        );
        deal.validate()?;

        let mut builder = GameTreeBuilder::new();
        builder.information_set("Y:nuts", Player::SecondPlayer, Some("Y holds the nuts"))?;
        builder.information_set("Y:bluff", Player::SecondPlayer, Some("Y holds a dead hand"))?;
        builder.information_set(
            "X:bet_response",
            Player::FirstPlayer,
            Some("X facing a bet, hand unknown"),
        )?;

        let root = builder.chance_node();
        for (hand, probability) in deal.iter() {
            let y_node = builder.decision_node(&format!("Y:{}", hand))?;
            builder.add_chance_edge(
                root,
                &format!("Y hand = {}", hand),
                y_node,
                *probability,
                Some(serde_json::json!({ "hand": hand })),
            )?;

            // Y wins the showdown exactly when holding the nuts.
            let showdown = if hand == "nuts" { (-p, p) } else { (p, -p) };
            let check = builder.terminal_node(showdown);
            builder.add_edge(
                y_node,
                "check",
                check,
                Some(serde_json::json!({ "hand": hand, "action": "check" })),
            )?;

            let x_node = builder.decision_node("X:bet_response")?;
            builder.add_edge(
                y_node,
                "bet",
                x_node,
                Some(serde_json::json!({ "hand": hand, "action": "bet", "bet_size": b })),
            )?;

            // A fold concedes the pot regardless of Y's hand; a call is
            // settled by the showdown for pot plus bet.
            let fold = builder.terminal_node((-p, p));
            builder.add_edge(
                x_node,
                "fold",
                fold,
                Some(serde_json::json!({ "response": "fold" })),
            )?;
            let called = if hand == "nuts" {
                (-(p + b), p + b)
            } else {
                (p + b, -(p + b))
            };
            let call = builder.terminal_node(called);
            builder.add_edge(
                x_node,
                "call",
                call,
                Some(serde_json::json!({ "response": "call" })),
            )?;
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_structure_matches_the_half_street() {
        let tree = ClairvoyanceGame::new().build_game_tree().unwrap();

        let root = tree.node(tree.root());
        assert_eq!(root.player, Player::Chance);
        assert_eq!(root.action_labels(), vec!["Y hand = nuts", "Y hand = bluff"]);
        for edge in &root.edges {
            assert_eq!(edge.probability, 0.5);
        }

        for key in ["Y:nuts", "Y:bluff"] {
            let info = tree.information_set(key).unwrap();
            assert_eq!(info.nodes.len(), 1);
            assert_eq!(tree.node(info.nodes[0]).action_labels(), vec!["check", "bet"]);
        }

        // Both bet lines land in the same X information set.
        let x_info = tree.information_set("X:bet_response").unwrap();
        assert_eq!(x_info.nodes.len(), 2);
        for &id in &x_info.nodes {
            assert_eq!(tree.node(id).action_labels(), vec!["fold", "call"]);
        }
    }

    #[test]
    fn payoffs_scale_with_pot_and_bet() {
        let game = ClairvoyanceGame::with_sizes(2.0, 3.0);
        let tree = game.build_game_tree().unwrap();

        let nuts_node = tree.information_set("Y:nuts").unwrap().nodes[0];
        let check = tree.node(tree.node(nuts_node).edges[0].child);
        assert_eq!(check.payoffs, Some((-2.0, 2.0)));

        let x_node = tree.node(nuts_node).edges[1].child;
        let fold = tree.node(tree.node(x_node).edges[0].child);
        let call = tree.node(tree.node(x_node).edges[1].child);
        assert_eq!(fold.payoffs, Some((-2.0, 2.0)));
        assert_eq!(call.payoffs, Some((-5.0, 5.0)));

        let bluff_node = tree.information_set("Y:bluff").unwrap().nodes[0];
        let bluff_x = tree.node(bluff_node).edges[1].child;
        let bluff_call = tree.node(tree.node(bluff_x).edges[1].child);
        assert_eq!(bluff_call.payoffs, Some((5.0, -5.0)));
    }

    #[test]
    fn analytic_solution_for_pot_sized_bet() {
        let equilibrium = ClairvoyanceGame::new().analytic_solution();
        assert!((equilibrium.bluff_frequency - 1.0 / 3.0).abs() < 1e-12);
        assert!((equilibrium.call_frequency - 2.0 / 3.0).abs() < 1e-12);
        assert!((equilibrium.game_value - (-1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn dump_shows_the_deal_metadata() {
        let tree = ClairvoyanceGame::new().build_game_tree().unwrap();
        let dump = tree.dump();
        assert!(dump.contains("--Y hand = nuts (p=0.500)"));
        assert!(dump.contains("\"hand\""));
        assert!(dump.contains("info=X:bet_response"));
    }

    #[test]
    fn mccfr_recovers_the_bluffing_frequencies() {
        let game = ClairvoyanceGame::new();
        let equilibrium = game.analytic_solution();
        // The bluffing frequency is a mixed equilibrium driven by sampled
        // responses; CFR+ clipping rectifies that sampling noise and
        // overshoots it, so solve with plain regret accumulation.
        let config = MCCFRConfig::default().with_cfr_plus(false);
        let solution = game.solve_mccfr(40_000, Some(7), config).unwrap();

        let call = solution.info_set_strategies["X:bet_response"]["call"];
        let bluff = solution.info_set_strategies["Y:bluff"]["bet"];
        let value_bet = solution.info_set_strategies["Y:nuts"]["bet"];

        assert!(
            (call - equilibrium.call_frequency).abs() < 0.05,
            "call frequency {}",
            call
        );
        assert!(
            (bluff - equilibrium.bluff_frequency).abs() < 0.05,
            "bluff frequency {}",
            bluff
        );
        assert!(value_bet > 0.95, "nuts bet frequency {}", value_bet);
        assert!(
            (solution.game_value - equilibrium.game_value).abs() < 0.05,
            "game value {}",
            solution.game_value
        );
    }
}
