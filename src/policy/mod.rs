//! Policies for the phases of the search
//!
//! - Selection policies: which child to descend into
//! - Simulation policies: how to play a node out to the end of the game
//! - Backpropagation policies: what each node on the path is credited

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{AdversarialPolicy, BackpropagationPolicy, StandardPolicy};
pub use selection::{GreedyPolicy, SelectionPolicy, UCTPolicy};
pub use simulation::{RandomPolicy, SimulationPolicy, StrategyPolicy};
