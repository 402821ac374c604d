//! Backpropagation policies decide what each node on the path is credited
//!
//! Outcomes are always measured from the root side's point of view.

use crate::{game_state::GameState, tree::MCTSNode};

/// Trait for policies that backpropagate rollout results
pub trait BackpropagationPolicy<S: GameState>: Send + Sync {
    /// Updates statistics for a node on the path of a finished iteration
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: f64, root_player: S::Player);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>>;
}

/// Credits the root side's outcome to every node on the path
#[derive(Debug, Clone, Default)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl<S: GameState> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: f64, _root_player: S::Player) {
        node.record(outcome);
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

/// Credits nodes entered by the opponent with the complement of the outcome
///
/// Selection at opponent nodes then maximizes the opponent's chances instead
/// of the root side's.
#[derive(Debug, Clone, Default)]
pub struct AdversarialPolicy;

impl AdversarialPolicy {
    /// Creates a new adversarial policy
    pub fn new() -> Self {
        AdversarialPolicy
    }
}

impl<S: GameState> BackpropagationPolicy<S> for AdversarialPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: f64, root_player: S::Player) {
        if node.player == root_player {
            node.record(outcome);
        } else {
            node.record(1.0 - outcome);
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> BackpropagationPolicy<S> for Box<dyn BackpropagationPolicy<S>> {
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: f64, root_player: S::Player) {
        (**self).update_stats(node, outcome, root_player)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        (**self).clone_box()
    }
}
