//! Selection policies decide which child to descend into
//!
//! The default is UCT:
//!
//! ```text
//! UCT = total_score / visits + C * sqrt(ln(parent_visits) / visits)
//! ```
//!
//! Unvisited children rank as infinite and are always tried first.

use std::cmp::Ordering;

use crate::{
    game_state::{GameState, Move},
    tree::MCTSNode,
    utils,
};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<S: GameState>: Send + Sync {
    /// Returns the index of the child to descend into
    ///
    /// Called only on nodes that have at least one child.
    fn select_child(&self, node: &MCTSNode<S>) -> usize;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;
}

/// UCT selection with a fixed tie-break on move preference
///
/// When two children have the same UCT value (most often two unvisited
/// children) the one whose move has the higher [`Move::preference`] wins;
/// after that, the earlier child wins.
#[derive(Debug, Clone)]
pub struct UCTPolicy {
    /// Exploration constant `C`
    pub exploration_constant: f64,
}

impl UCTPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCTPolicy {
            exploration_constant,
        }
    }

    /// Calculates the UCT value of a child
    pub fn uct_value(&self, total_score: f64, child_visits: u64, parent_visits: u64) -> f64 {
        utils::ucb1_value(total_score, child_visits, parent_visits, self.exploration_constant)
    }
}

impl Default for UCTPolicy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

fn preference<S: GameState>(node: &MCTSNode<S>) -> u8 {
    node.action.as_ref().map_or(0, Move::preference)
}

impl<S: GameState> SelectionPolicy<S> for UCTPolicy {
    fn select_child(&self, node: &MCTSNode<S>) -> usize {
        let parent_visits = node.visits();
        let mut best: Option<(usize, f64, u8)> = None;

        for (i, child) in node.children.iter().enumerate() {
            let value = self.uct_value(child.total_score(), child.visits(), parent_visits);
            let rank = preference(child);

            let better = match best {
                None => true,
                Some((_, best_value, best_rank)) => match value.partial_cmp(&best_value) {
                    Some(Ordering::Greater) => true,
                    Some(Ordering::Equal) => rank > best_rank,
                    _ => false,
                },
            };
            if better {
                best = Some((i, value, rank));
            }
        }

        best.map_or(0, |(i, _, _)| i)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

/// Pure exploitation: picks the child with the best average score
///
/// Unvisited children still come first so every move gets a rollout.
#[derive(Debug, Clone, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    /// Creates a new greedy policy
    pub fn new() -> Self {
        GreedyPolicy
    }
}

impl<S: GameState> SelectionPolicy<S> for GreedyPolicy {
    fn select_child(&self, node: &MCTSNode<S>) -> usize {
        UCTPolicy::new(0.0).select_child(node)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn select_child(&self, node: &MCTSNode<S>) -> usize {
        (**self).select_child(node)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}
