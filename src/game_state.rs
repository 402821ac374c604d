//! Traits the search engine needs from a game.
//!
//! The planner in [`crate::mcts`] only talks to the game through these traits,
//! so the tree, the policies and the statistics stay independent of the
//! board rules implemented in [`crate::game`].

use std::fmt::Debug;

use rand::{seq::SliceRandom, Rng};

use crate::Result;

/// Trait for moves that can be expanded into search nodes
pub trait Move: Clone + Debug + PartialEq + Send + Sync {
    /// Tie-break rank used when two children score the same
    ///
    /// Higher values are preferred.
    fn preference(&self) -> u8 {
        0
    }
}

/// Trait for the sides taking turns in a game
pub trait Player: Clone + Copy + Debug + PartialEq + Send + Sync {}

/// Trait defining the game state interface required by the planner
pub trait GameState: Clone + Send + Sync {
    /// The type of moves that can be taken in this game
    type Move: Move;

    /// The type of sides taking turns in this game
    type Player: Player;

    /// Returns the legal moves for the side to move
    ///
    /// A non-terminal state must return at least one move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a move and returns the resulting state, leaving `self` untouched
    ///
    /// Fails if the move is not legal in this state.
    fn apply_move(&self, mv: &Self::Move) -> Result<Self>;

    /// Returns true once the game is over
    fn is_terminal(&self) -> bool;

    /// Returns the outcome from `for_player`'s point of view, 1.0 for a win
    /// and 0.0 otherwise
    fn outcome(&self, for_player: Self::Player) -> f64;

    /// Returns the side that moves next
    fn current_player(&self) -> Self::Player;

    /// Plays uniformly random moves until the game ends
    ///
    /// Returns the outcome for `for_player` and the number of moves played.
    fn random_playout<R: Rng + ?Sized>(
        &self,
        for_player: Self::Player,
        rng: &mut R,
    ) -> Result<(f64, usize)> {
        let mut current = self.clone();
        let mut plies = 0;

        while !current.is_terminal() {
            let moves = current.legal_moves();
            let Some(mv) = moves.choose(rng) else {
                break;
            };
            current = current.apply_move(mv)?;
            plies += 1;
        }

        Ok((current.outcome(for_player), plies))
    }
}
