//! Construction of game trees.
//!
//! A concrete game registers its information sets, creates nodes, wires them
//! together with edges, and finally calls [`GameTreeBuilder::build`]. Each
//! step validates the invariant it can see; `build` runs the checks that
//! need the whole structure (dangling non-terminal nodes, degenerate chance
//! probabilities). Action-list consistency across an information set's
//! member nodes is deliberately left to the engine, which is where the
//! per-action accumulators are sized.

use rustc_hash::FxHashMap;

use crate::tree::info_set::InformationSet;
use crate::tree::node::{GameTreeEdge, GameTreeNode, NodeId, Player};
use crate::tree::{GameTree, TreeError};

/// Incremental builder for a [`GameTree`].
///
/// # Example
/// ```
/// use mccfr_solver::tree::{GameTreeBuilder, Player};
///
/// let mut builder = GameTreeBuilder::new();
/// builder.information_set("X:choice", Player::FirstPlayer, None).unwrap();
/// let root = builder.decision_node("X:choice").unwrap();
/// let win = builder.terminal_node((1.0, -1.0));
/// let lose = builder.terminal_node((-1.0, 1.0));
/// builder.add_edge(root, "left", win, None).unwrap();
/// builder.add_edge(root, "right", lose, None).unwrap();
/// let tree = builder.build(root).unwrap();
/// assert_eq!(tree.num_nodes(), 3);
/// ```
#[derive(Debug, Default)]
pub struct GameTreeBuilder {
    nodes: Vec<GameTreeNode>,
    information_sets: FxHashMap<String, InformationSet>,
}

impl GameTreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an information set for one of the two acting players.
    ///
    /// # Errors
    /// Rejects duplicate keys and non-acting owners.
    pub fn information_set(
        &mut self,
        key: &str,
        player: Player,
        description: Option<&str>,
    ) -> Result<(), TreeError> {
        if !player.is_acting() {
            return Err(TreeError::NotAnActingPlayer {
                key: key.to_string(),
                player,
            });
        }
        if self.information_sets.contains_key(key) {
            return Err(TreeError::DuplicateInformationSet(key.to_string()));
        }
        self.information_sets.insert(
            key.to_string(),
            InformationSet::new(key.to_string(), player, description.map(str::to_string)),
        );
        Ok(())
    }

    /// Create a chance node.
    pub fn chance_node(&mut self) -> NodeId {
        self.push_node(Player::Chance, None, None)
    }

    /// Create a decision node belonging to a registered information set.
    ///
    /// The node is appended to the information set's member list; the acting
    /// player is taken from the set.
    ///
    /// # Errors
    /// [`TreeError::UnknownInformationSet`] when the key is unregistered.
    pub fn decision_node(&mut self, info_key: &str) -> Result<NodeId, TreeError> {
        let player = match self.information_sets.get(info_key) {
            Some(info) => info.player,
            None => return Err(TreeError::UnknownInformationSet(info_key.to_string())),
        };
        let id = self.push_node(player, Some(info_key.to_string()), None);
        if let Some(info) = self.information_sets.get_mut(info_key) {
            info.nodes.push(id);
        }
        Ok(id)
    }

    /// Create a terminal node carrying the payoff pair
    /// `(first player, second player)`.
    pub fn terminal_node(&mut self, payoffs: (f64, f64)) -> NodeId {
        self.push_node(Player::Terminal, None, Some(payoffs))
    }

    /// Attach `child` under `parent` with probability 1.0.
    ///
    /// # Errors
    /// Rejects unknown ids, edges out of terminal nodes, children that
    /// already have a parent, and attachments that would form a cycle.
    pub fn add_edge(
        &mut self,
        parent: NodeId,
        action: &str,
        child: NodeId,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), TreeError> {
        self.attach(parent, action, child, 1.0, metadata)
    }

    /// Attach `child` under the chance node `parent` with the given outcome
    /// probability.
    ///
    /// # Errors
    /// Everything [`GameTreeBuilder::add_edge`] rejects, plus non-chance
    /// parents and non-positive or non-finite probabilities.
    pub fn add_chance_edge(
        &mut self,
        parent: NodeId,
        action: &str,
        child: NodeId,
        probability: f64,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), TreeError> {
        let parent_node = self
            .nodes
            .get(parent)
            .ok_or(TreeError::UnknownNode(parent))?;
        if parent_node.player != Player::Chance {
            return Err(TreeError::NotAChanceNode(parent));
        }
        if !probability.is_finite() || probability <= 0.0 {
            return Err(TreeError::InvalidChanceProbability {
                action: action.to_string(),
                probability,
            });
        }
        self.attach(parent, action, child, probability, metadata)
    }

    /// Finalize the tree with `root` at the top.
    ///
    /// # Errors
    /// Rejects roots that hang under another node, non-terminal nodes
    /// without edges, and chance nodes whose edge probabilities sum to a
    /// non-positive total.
    pub fn build(self, root: NodeId) -> Result<GameTree, TreeError> {
        let root_node = self.nodes.get(root).ok_or(TreeError::UnknownNode(root))?;
        if root_node.parent.is_some() {
            return Err(TreeError::RootHasParent(root));
        }

        for (id, node) in self.nodes.iter().enumerate() {
            if node.is_terminal() {
                continue;
            }
            if node.edges.is_empty() {
                return Err(TreeError::MissingEdges(id));
            }
            if node.player == Player::Chance {
                let total: f64 = node.edges.iter().map(|edge| edge.probability).sum();
                if total <= 0.0 {
                    return Err(TreeError::InvalidChanceTotal { node: id, total });
                }
            }
        }

        Ok(GameTree::from_parts(self.nodes, root, self.information_sets))
    }

    fn push_node(
        &mut self,
        player: Player,
        info_set: Option<String>,
        payoffs: Option<(f64, f64)>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(GameTreeNode {
            player,
            info_set,
            payoffs,
            edges: Vec::new(),
            parent: None,
            action_from_parent: None,
        });
        id
    }

    fn attach(
        &mut self,
        parent: NodeId,
        action: &str,
        child: NodeId,
        probability: f64,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), TreeError> {
        if parent >= self.nodes.len() {
            return Err(TreeError::UnknownNode(parent));
        }
        if child >= self.nodes.len() {
            return Err(TreeError::UnknownNode(child));
        }
        if self.nodes[parent].is_terminal() {
            return Err(TreeError::TerminalHasEdges(parent));
        }
        if self.nodes[child].parent.is_some() {
            return Err(TreeError::NodeAlreadyAttached(child));
        }

        // Walk the parent chain; hitting `child` means it is an ancestor.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(TreeError::CycleDetected { parent, child });
            }
            cursor = self.nodes[id].parent;
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[child].action_from_parent = Some(action.to_string());
        self.nodes[parent].edges.push(GameTreeEdge {
            action: action.to_string(),
            child,
            probability,
            metadata,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_action_tree() -> (GameTreeBuilder, NodeId) {
        let mut builder = GameTreeBuilder::new();
        builder
            .information_set("X:choice", Player::FirstPlayer, Some("only decision"))
            .unwrap();
        let root = builder.decision_node("X:choice").unwrap();
        let win = builder.terminal_node((1.0, -1.0));
        let lose = builder.terminal_node((-1.0, 1.0));
        builder.add_edge(root, "left", win, None).unwrap();
        builder.add_edge(root, "right", lose, None).unwrap();
        (builder, root)
    }

    #[test]
    fn builds_a_minimal_tree() {
        let (builder, root) = two_action_tree();
        let tree = builder.build(root).unwrap();
        assert_eq!(tree.root(), root);
        assert_eq!(tree.num_nodes(), 3);

        let info = tree.information_set("X:choice").unwrap();
        assert_eq!(info.player, Player::FirstPlayer);
        assert_eq!(info.nodes, vec![root]);
        assert_eq!(tree.node(root).action_labels(), vec!["left", "right"]);

        // Parent back-references exist for printing.
        let first_child = tree.node(root).edges[0].child;
        assert_eq!(tree.node(first_child).parent, Some(root));
        assert_eq!(
            tree.node(first_child).action_from_parent.as_deref(),
            Some("left")
        );
    }

    #[test]
    fn rejects_duplicate_information_set() {
        let mut builder = GameTreeBuilder::new();
        builder
            .information_set("X:choice", Player::FirstPlayer, None)
            .unwrap();
        assert_eq!(
            builder.information_set("X:choice", Player::SecondPlayer, None),
            Err(TreeError::DuplicateInformationSet("X:choice".to_string()))
        );
    }

    #[test]
    fn rejects_chance_owned_information_set() {
        let mut builder = GameTreeBuilder::new();
        assert!(matches!(
            builder.information_set("deal", Player::Chance, None),
            Err(TreeError::NotAnActingPlayer { .. })
        ));
    }

    #[test]
    fn rejects_decision_node_without_information_set() {
        let mut builder = GameTreeBuilder::new();
        assert_eq!(
            builder.decision_node("missing"),
            Err(TreeError::UnknownInformationSet("missing".to_string()))
        );
    }

    #[test]
    fn rejects_edge_out_of_terminal() {
        let mut builder = GameTreeBuilder::new();
        let terminal = builder.terminal_node((0.0, 0.0));
        let other = builder.terminal_node((1.0, -1.0));
        assert_eq!(
            builder.add_edge(terminal, "x", other, None),
            Err(TreeError::TerminalHasEdges(terminal))
        );
    }

    #[test]
    fn rejects_second_parent() {
        let mut builder = GameTreeBuilder::new();
        let a = builder.chance_node();
        let b = builder.chance_node();
        let shared = builder.terminal_node((0.0, 0.0));
        builder.add_chance_edge(a, "x", shared, 1.0, None).unwrap();
        assert_eq!(
            builder.add_chance_edge(b, "y", shared, 1.0, None),
            Err(TreeError::NodeAlreadyAttached(shared))
        );
    }

    #[test]
    fn rejects_cycle() {
        let mut builder = GameTreeBuilder::new();
        let a = builder.chance_node();
        let b = builder.chance_node();
        builder.add_chance_edge(a, "down", b, 1.0, None).unwrap();
        assert_eq!(
            builder.add_chance_edge(b, "up", a, 1.0, None),
            Err(TreeError::CycleDetected { parent: b, child: a })
        );
    }

    #[test]
    fn rejects_bad_chance_probability() {
        let mut builder = GameTreeBuilder::new();
        let root = builder.chance_node();
        let leaf = builder.terminal_node((0.0, 0.0));
        assert!(matches!(
            builder.add_chance_edge(root, "x", leaf, 0.0, None),
            Err(TreeError::InvalidChanceProbability { .. })
        ));
        assert!(matches!(
            builder.add_chance_edge(root, "x", leaf, f64::NAN, None),
            Err(TreeError::InvalidChanceProbability { .. })
        ));
    }

    #[test]
    fn rejects_chance_edge_on_decision_node() {
        let mut builder = GameTreeBuilder::new();
        builder
            .information_set("X:choice", Player::FirstPlayer, None)
            .unwrap();
        let root = builder.decision_node("X:choice").unwrap();
        let leaf = builder.terminal_node((0.0, 0.0));
        assert_eq!(
            builder.add_chance_edge(root, "x", leaf, 0.5, None),
            Err(TreeError::NotAChanceNode(root))
        );
    }

    #[test]
    fn rejects_dangling_non_terminal() {
        let mut builder = GameTreeBuilder::new();
        let root = builder.chance_node();
        let dangling = builder.chance_node();
        let leaf = builder.terminal_node((0.0, 0.0));
        builder
            .add_chance_edge(root, "down", dangling, 1.0, None)
            .unwrap();
        // `leaf` is never attached but is terminal, so only `dangling`
        // should trip the check.
        let _ = leaf;
        assert_eq!(
            builder.build(root).unwrap_err(),
            TreeError::MissingEdges(dangling)
        );
    }

    #[test]
    fn rejects_attached_root() {
        let mut builder = GameTreeBuilder::new();
        let top = builder.chance_node();
        let below = builder.chance_node();
        let leaf = builder.terminal_node((0.0, 0.0));
        builder.add_chance_edge(top, "down", below, 1.0, None).unwrap();
        builder.add_chance_edge(below, "end", leaf, 1.0, None).unwrap();
        assert_eq!(
            builder.build(below).unwrap_err(),
            TreeError::RootHasParent(below)
        );
    }

    #[test]
    fn dump_renders_players_probabilities_and_metadata() {
        let mut builder = GameTreeBuilder::new();
        builder
            .information_set("Y:reply", Player::SecondPlayer, None)
            .unwrap();
        let root = builder.chance_node();
        let decision = builder.decision_node("Y:reply").unwrap();
        let up = builder.terminal_node((1.0, -1.0));
        let down = builder.terminal_node((-1.0, 1.0));
        builder
            .add_chance_edge(
                root,
                "deal",
                decision,
                1.0,
                Some(serde_json::json!({"hand": "nuts"})),
            )
            .unwrap();
        builder.add_edge(decision, "up", up, None).unwrap();
        builder.add_edge(decision, "down", down, None).unwrap();
        let tree = builder.build(root).unwrap();

        let dump = tree.dump();
        assert!(dump.contains("chance"));
        assert!(dump.contains("second info=Y:reply"));
        assert!(dump.contains("--deal (p=1.000)"));
        assert!(dump.contains("\"hand\""));
        assert!(dump.contains("Terminal payoffs=(1, -1)"));
    }

    #[test]
    fn build_requires_known_root() {
        let builder = GameTreeBuilder::new();
        assert_eq!(builder.build(0).unwrap_err(), TreeError::UnknownNode(0));
    }
}
