//! Tree data structures for the search
//!
//! Each node owns the game state it stands for, so siblings never share
//! mutable state. Children are created all at once when a node is expanded.

use std::fmt;

use log::trace;

use crate::{game_state::GameState, Result};

/// A node in the search tree
pub struct MCTSNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// The move that led to this state (None for root)
    pub action: Option<S::Move>,

    /// Side that played `action`; for the root, the side to move
    pub player: S::Player,

    /// Number of completed iterations that went through this node
    pub visits: u64,

    /// Sum of the outcomes credited to this node
    pub total_score: f64,

    /// One child per legal move, empty until the node is expanded
    pub children: Vec<MCTSNode<S>>,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,
}

impl<S: GameState> MCTSNode<S> {
    /// Creates a new unexpanded node
    pub fn new(state: S, action: Option<S::Move>, player: Option<S::Player>, depth: usize) -> Self {
        let player = player.unwrap_or_else(|| state.current_player());

        MCTSNode {
            state,
            action,
            player,
            visits: 0,
            total_score: 0.0,
            children: Vec::new(),
            depth,
        }
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the accumulated score of this node
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Returns the average score of this node
    pub fn value(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_score / self.visits as f64
    }

    /// Counts one visit and adds `score` to the total
    pub fn record(&mut self, score: f64) {
        self.visits += 1;
        self.total_score += score;
    }

    /// Returns true if this node has no children yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Creates one child per legal move of the side to move
    ///
    /// Returns the number of children created. Terminal nodes and nodes
    /// that were already expanded are left alone.
    pub fn expand(&mut self) -> Result<usize> {
        if !self.children.is_empty() || self.state.is_terminal() {
            return Ok(0);
        }

        let mover = self.state.current_player();
        for mv in self.state.legal_moves() {
            let next = self.state.apply_move(&mv)?;
            self.children
                .push(MCTSNode::new(next, Some(mv), Some(mover), self.depth + 1));
        }

        trace!(
            "expanded node at depth {} into {} children",
            self.depth,
            self.children.len()
        );
        Ok(self.children.len())
    }

    /// Counts the nodes in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MCTSNode::subtree_size)
            .sum::<usize>()
    }
}

/// A path from the root to a node, as a list of child indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    pub indices: Vec<usize>,
}

impl NodePath {
    /// Creates an empty path (pointing to the root)
    pub fn new() -> Self {
        NodePath {
            indices: Vec::new(),
        }
    }

    /// Extends the path with a new index
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Returns the length of the path
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the path points to the root
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}
