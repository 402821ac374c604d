//! # photosynthesis-mcts
//!
//! A Monte Carlo Tree Search bot for a two-player tree growing game played on
//! a 37-cell hexagonal board.
//!
//! Players spend sun to plant seeds, grow trees and harvest them for points.
//! Trees earn sun every day, but the sun turns around the board and tall
//! trees shadow the trees behind them. The game lasts 24 days.
//!
//! ## Layout
//!
//! - [`field`]: board geometry with precomputed distance rings and direction
//!   vectors
//! - [`shadow`]: shadow tests and projected sun income
//! - [`game`]: turn snapshot, move generation and exact forward simulation
//! - [`mcts`], [`tree`], [`policy`]: the search
//! - [`strategy`]: greedy strategies, used on their own or as rollout policy
//! - [`protocol`]: referee input parsing
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use photosynthesis_mcts::{
//!     config::RulesConfig, Game, HexField, MCTSConfig, PlayerState, Side, Tree, MCTS,
//! };
//!
//! fn main() -> Result<(), photosynthesis_mcts::MCTSError> {
//!     let field = Arc::new(HexField::standard());
//!     let mut game = Game::new(field, RulesConfig::default());
//!     game.day = 20;
//!     *game.player_mut(Side::Me) = PlayerState::new(10, 0);
//!     game.place_tree(Tree::new(0, 3, Side::Me))?;
//!
//!     let config = MCTSConfig::default().with_max_iterations(200).with_seed(1);
//!     let mut mcts = MCTS::new(game, config);
//!     let action = mcts.search()?;
//!
//!     println!("{}", action);
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod config;
pub mod field;
pub mod game;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod protocol;
pub mod shadow;
pub mod stats;
pub mod strategy;
pub mod tree;
pub mod utils;

pub use action::{Action, ActionKind};
pub use config::{MCTSConfig, RulesConfig};
pub use field::{Cell, Direction, HexField};
pub use game::{Game, PlayerState, Side, Tree};
pub use game_state::{GameState, Move, Player};
pub use mcts::MCTS;
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use shadow::ShadowModel;
pub use stats::SearchStatistics;
pub use strategy::Strategy;
pub use tree::{MCTSNode, NodePath};

/// Error types for the bot
#[derive(thiserror::Error, Debug)]
pub enum MCTSError {
    /// A cell index that does not exist on the board
    #[error("Invalid cell index: {0}")]
    InvalidCell(usize),

    /// A ring distance outside 1..=3
    #[error("Invalid distance: {0}")]
    InvalidDistance(usize),

    /// A direction outside 0..=5
    #[error("Invalid direction: {0}")]
    InvalidDirection(usize),

    /// An action the rules do not allow in the current state
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    /// Malformed referee input
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading input failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// The root state is already past the last day
    #[error("Game over with outcome {outcome}")]
    GameOver { outcome: f64 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for fallible operations
pub type Result<T> = std::result::Result<T, MCTSError>;
