//! Information sets: decision nodes a player cannot tell apart.

use crate::tree::node::{NodeId, Player};

/// A collection of decision nodes that look identical to the acting player.
///
/// Identity is the string `key`; the engine indexes its per-information-set
/// accumulators by this key, so nodes in different branches of the tree can
/// share a decision point without any node aliasing. Every member node must
/// expose the same ordered action labels; the engine rejects the tree at
/// construction time otherwise.
#[derive(Debug, Clone)]
pub struct InformationSet {
    /// Unique key identifying this information set.
    pub key: String,
    /// The player acting at every node of this set.
    pub player: Player,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Member decision nodes, in the order they were registered.
    pub nodes: Vec<NodeId>,
}

impl InformationSet {
    /// Create an empty information set for `player`.
    ///
    /// The builder is responsible for rejecting non-acting players.
    pub(crate) fn new(key: String, player: Player, description: Option<String>) -> Self {
        Self {
            key,
            player,
            description,
            nodes: Vec::new(),
        }
    }
}
