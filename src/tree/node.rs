//! Nodes and edges of an extensive-form game tree.
//!
//! Nodes live in an arena owned by [`GameTree`](crate::tree::GameTree) and
//! refer to each other through [`NodeId`] indices. Parent links are plain
//! indices as well, which keeps the structure free of ownership cycles;
//! they exist only so the tree can be printed, traversal always proceeds
//! downward from the root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`GameTree`](crate::tree::GameTree) arena.
pub type NodeId = usize;

/// Who controls a point in the game.
///
/// `Chance` and `Terminal` are not controlled by either player: chance nodes
/// resolve by their edge probabilities and terminal nodes carry payoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The first player (index 0).
    FirstPlayer,
    /// The second player (index 1).
    SecondPlayer,
    /// A random event resolved by edge probabilities.
    Chance,
    /// End of play; the node carries a payoff pair.
    Terminal,
}

impl Player {
    /// Player index used by the engine's reach-probability pair.
    ///
    /// # Returns
    /// `Some(0)` for the first player, `Some(1)` for the second,
    /// `None` for chance and terminal nodes.
    pub fn index(&self) -> Option<usize> {
        match self {
            Player::FirstPlayer => Some(0),
            Player::SecondPlayer => Some(1),
            Player::Chance | Player::Terminal => None,
        }
    }

    /// Whether this is one of the two acting players.
    pub fn is_acting(&self) -> bool {
        self.index().is_some()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Player::FirstPlayer => "first",
            Player::SecondPlayer => "second",
            Player::Chance => "chance",
            Player::Terminal => "terminal",
        };
        write!(f, "{}", label)
    }
}

/// One outgoing transition from a node.
#[derive(Debug, Clone)]
pub struct GameTreeEdge {
    /// Action label, e.g. `"bet"` or `"fold"`.
    pub action: String,
    /// The node this edge leads to.
    pub child: NodeId,
    /// Probability of the transition. Only meaningful at chance nodes;
    /// defaults to 1.0 elsewhere.
    pub probability: f64,
    /// Free-form annotation for debugging and analysis. Never read by the
    /// engine.
    pub metadata: Option<serde_json::Value>,
}

/// One point in play: a decision, a chance event, or a terminal outcome.
///
/// Nodes are created through the
/// [`GameTreeBuilder`](crate::tree::GameTreeBuilder), which enforces the
/// structural invariants (a node is terminal iff it has payoffs, decision
/// nodes belong to an information set, chance edges carry probabilities).
#[derive(Debug, Clone)]
pub struct GameTreeNode {
    /// Controlling player.
    pub player: Player,
    /// Key of the information set this node belongs to. Present iff the
    /// node is a decision node.
    pub info_set: Option<String>,
    /// Terminal payoff pair `(first player, second player)`. Present iff the
    /// node is terminal.
    pub payoffs: Option<(f64, f64)>,
    /// Ordered outgoing edges.
    pub edges: Vec<GameTreeEdge>,
    /// Parent node, for printing only.
    pub parent: Option<NodeId>,
    /// Action label on the edge that reached this node, for printing only.
    pub action_from_parent: Option<String>,
}

impl GameTreeNode {
    /// A node is terminal exactly when its payoff pair is set.
    pub fn is_terminal(&self) -> bool {
        self.payoffs.is_some()
    }

    /// Ordered action labels of the outgoing edges.
    pub fn action_labels(&self) -> Vec<String> {
        self.edges.iter().map(|edge| edge.action.clone()).collect()
    }
}
