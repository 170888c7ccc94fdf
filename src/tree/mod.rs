//! Extensive-form game tree model.
//!
//! This module carries no algorithm logic: its entire value is making
//! illegal trees unconstructible. A [`GameTree`] is built once by a concrete
//! game through the [`GameTreeBuilder`], which enforces the structural
//! invariants (a node is terminal iff it has a payoff pair, decision nodes
//! belong to an information set, chance edges carry probabilities, every
//! node has at most one parent). The finished tree is read-only during
//! solving and may be shared across engine instances.
//!
//! Nodes are stored in an arena and referenced by [`NodeId`] indices, so
//! information sets can list their member nodes and nodes can point at their
//! parents without ownership cycles.

pub mod builder;
pub mod chance;
pub mod info_set;
pub mod node;

pub use builder::GameTreeBuilder;
pub use chance::ChanceDistribution;
pub use info_set::InformationSet;
pub use node::{GameTreeEdge, GameTreeNode, NodeId, Player};

use rustc_hash::FxHashMap;
use std::fmt;

/// An extensive-form game tree: the node arena, the root, and the table of
/// information sets keyed by their string identity.
///
/// Construct through [`GameTreeBuilder`]; read-only afterwards.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<GameTreeNode>,
    root: NodeId,
    information_sets: FxHashMap<String, InformationSet>,
}

impl GameTree {
    pub(crate) fn from_parts(
        nodes: Vec<GameTreeNode>,
        root: NodeId,
        information_sets: FxHashMap<String, InformationSet>,
    ) -> Self {
        Self {
            nodes,
            root,
            information_sets,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    ///
    /// # Panics
    /// Panics on an id that did not come from this tree's builder.
    pub fn node(&self, id: NodeId) -> &GameTreeNode {
        &self.nodes[id]
    }

    /// Number of nodes in the arena.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all information sets. The order is unspecified; nothing
    /// in the engine depends on it.
    pub fn all_information_sets(&self) -> impl Iterator<Item = &InformationSet> {
        self.information_sets.values()
    }

    /// Look up an information set by key.
    pub fn information_set(&self, key: &str) -> Option<&InformationSet> {
        self.information_sets.get(key)
    }

    /// Render the tree as indented text for debugging.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        self.dump_node(self.root, 0, &mut lines);
        lines.join("\n")
    }

    fn dump_node(&self, id: NodeId, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        let node = self.node(id);

        if let Some((first, second)) = node.payoffs {
            lines.push(format!("{}Terminal payoffs=({}, {})", indent, first, second));
            return;
        }

        let info = match &node.info_set {
            Some(key) => format!(" info={}", key),
            None => String::new(),
        };
        lines.push(format!("{}{}{}", indent, node.player, info));

        for edge in &node.edges {
            let meta = match &edge.metadata {
                Some(value) => format!(" {}", value),
                None => String::new(),
            };
            lines.push(format!(
                "{}  --{} (p={:.3}){}",
                indent, edge.action, edge.probability, meta
            ));
            self.dump_node(edge.child, depth + 2, lines);
        }
    }
}

/// Errors raised while constructing a game tree.
///
/// All of these are fatal: the caller must fix the tree before solving.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// An information set key was registered twice.
    DuplicateInformationSet(String),
    /// A decision node referenced an unregistered information set key.
    UnknownInformationSet(String),
    /// An information set was registered for chance or terminal.
    NotAnActingPlayer {
        /// The offending information set key.
        key: String,
        /// The non-acting player it was registered for.
        player: Player,
    },
    /// A node id that does not exist in the builder.
    UnknownNode(NodeId),
    /// An edge was added out of a terminal node.
    TerminalHasEdges(NodeId),
    /// A node was attached under a second parent.
    NodeAlreadyAttached(NodeId),
    /// Attaching the edge would make a node its own ancestor.
    CycleDetected {
        /// The intended parent.
        parent: NodeId,
        /// The child that is already an ancestor of the parent.
        child: NodeId,
    },
    /// A chance edge was added out of a non-chance node.
    NotAChanceNode(NodeId),
    /// A chance edge carried a non-positive or non-finite probability.
    InvalidChanceProbability {
        /// Action label of the offending edge.
        action: String,
        /// The rejected probability.
        probability: f64,
    },
    /// A non-terminal node has no outgoing edges.
    MissingEdges(NodeId),
    /// A chance node's edge probabilities sum to a non-positive total.
    InvalidChanceTotal {
        /// The offending chance node.
        node: NodeId,
        /// The non-positive total.
        total: f64,
    },
    /// The designated root already hangs under another node.
    RootHasParent(NodeId),
    /// A [`ChanceDistribution`] whose probabilities do not sum to 1.
    DistributionNotNormalized {
        /// Name of the distribution.
        name: String,
        /// The off-by-more-than-tolerance total.
        total: f64,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DuplicateInformationSet(key) => {
                write!(f, "Information set {} registered twice", key)
            }
            TreeError::UnknownInformationSet(key) => {
                write!(f, "Unknown information set {}", key)
            }
            TreeError::NotAnActingPlayer { key, player } => {
                write!(
                    f,
                    "Information set {} cannot belong to non-acting player {}",
                    key, player
                )
            }
            TreeError::UnknownNode(id) => write!(f, "Unknown node id {}", id),
            TreeError::TerminalHasEdges(id) => {
                write!(f, "Terminal node {} cannot have outgoing edges", id)
            }
            TreeError::NodeAlreadyAttached(id) => {
                write!(f, "Node {} already has a parent", id)
            }
            TreeError::CycleDetected { parent, child } => {
                write!(
                    f,
                    "Attaching node {} under node {} would create a cycle",
                    child, parent
                )
            }
            TreeError::NotAChanceNode(id) => {
                write!(f, "Node {} is not a chance node", id)
            }
            TreeError::InvalidChanceProbability {
                action,
                probability,
            } => {
                write!(
                    f,
                    "Chance edge {} has invalid probability {}",
                    action, probability
                )
            }
            TreeError::MissingEdges(id) => {
                write!(f, "Non-terminal node {} has no outgoing edges", id)
            }
            TreeError::InvalidChanceTotal { node, total } => {
                write!(
                    f,
                    "Chance node {} has non-positive total probability {}",
                    node, total
                )
            }
            TreeError::RootHasParent(id) => {
                write!(f, "Root node {} already has a parent", id)
            }
            TreeError::DistributionNotNormalized { name, total } => {
                write!(
                    f,
                    "Chance probabilities of {} must sum to 1.0, got {}",
                    name, total
                )
            }
        }
    }
}

impl std::error::Error for TreeError {}
