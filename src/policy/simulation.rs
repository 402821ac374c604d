//! Simulation (rollout) policies play a state out to the end of the game

use rand::{rngs::StdRng, seq::SliceRandom, Rng};

use crate::{
    action::Action,
    game::{Game, Side},
    game_state::GameState,
    strategy::Strategy,
    Result,
};

/// Trait for policies that play out games
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Plays `state` to the end and returns the outcome for `for_player`
    /// together with the number of moves played
    fn simulate(&self, state: &S, for_player: S::Player, rng: &mut StdRng) -> Result<(f64, usize)>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Plays uniformly random legal moves for whichever side is to move
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &S, for_player: S::Player, rng: &mut StdRng) -> Result<(f64, usize)> {
        state.random_playout(for_player, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

/// Plays both sides with a greedy [`Strategy`]
///
/// With probability `exploration` a move is drawn uniformly at random
/// instead, which keeps rollouts from the same node from all being equal.
#[derive(Debug, Clone)]
pub struct StrategyPolicy {
    strategy: Strategy,
    exploration: f64,
}

impl StrategyPolicy {
    /// Creates a policy that always follows `strategy`
    pub fn new(strategy: Strategy) -> Self {
        StrategyPolicy {
            strategy,
            exploration: 0.0,
        }
    }

    /// Sets the probability of playing a random move instead
    pub fn with_exploration(mut self, probability: f64) -> Self {
        self.exploration = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    fn pick(&self, game: &Game, side: Side, rng: &mut StdRng) -> Result<Action> {
        if self.exploration > 0.0 && rng.gen_bool(self.exploration) {
            let actions = game.actions(side);
            if let Some(action) = actions.choose(rng) {
                return Ok(*action);
            }
        }
        self.strategy.action(game, side)
    }
}

impl Default for StrategyPolicy {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl SimulationPolicy<Game> for StrategyPolicy {
    fn simulate(&self, state: &Game, for_player: Side, rng: &mut StdRng) -> Result<(f64, usize)> {
        let mut current = state.clone();
        let mut plies = 0;

        while !current.is_terminal() {
            let action = self.pick(&current, current.to_move(), rng)?;
            current = current.simulate(&action)?;
            plies += 1;
        }

        Ok((current.outcome(for_player), plies))
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<Game>> {
        Box::new(self.clone())
    }
}

impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(&self, state: &S, for_player: S::Player, rng: &mut StdRng) -> Result<(f64, usize)> {
        (**self).simulate(state, for_player, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}
