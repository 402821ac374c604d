//! Greedy filter-and-score strategies
//!
//! A [`Strategy`] looks at the moves the rules allow, keeps the kind it cares
//! about, scores them and plays the best one. Strategies are used directly as
//! a fallback bot and as the move picker of [`crate::policy::StrategyPolicy`]
//! rollouts.

use crate::{
    action::Action,
    game::{Game, Side, HARVEST_COST, LAST_DAY, MAX_TREE_SIZE},
    shadow::ShadowModel,
    Result,
};

/// Something a strategy may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// A tree to grow or harvest
    Tree(usize),

    /// A seed from `source` into `target`
    Plant { source: usize, target: usize },
}

/// A greedy policy, or an ordered list of them
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Harvest size-3 trees, best soil first
    Chop,

    /// Grow the tree with the best projected sun income
    Grow,

    /// Plant a free seed on good soil away from our own trees
    Seed,

    /// The first strategy that produces a move wins
    Composite(Vec<Strategy>),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Composite(vec![Strategy::Chop, Strategy::Grow, Strategy::Seed])
    }
}

impl Strategy {
    /// Returns true if the strategy might produce a move for `side`
    pub fn is_applicable(&self, game: &Game, side: Side) -> bool {
        let player = game.player(side);
        if player.waiting || game.is_terminal() {
            return false;
        }

        match self {
            Strategy::Chop => player.sun >= HARVEST_COST && game.trees_of(side).next().is_some(),
            Strategy::Grow => game
                .trees_of(side)
                .any(|tree| !tree.dormant && tree.size < MAX_TREE_SIZE),
            Strategy::Seed => game.seed_cost(side) == 0 && game.day < game.rules().seed_until_day,
            Strategy::Composite(strategies) => {
                strategies.iter().any(|strategy| strategy.is_applicable(game, side))
            }
        }
    }

    /// Lists what this strategy could act on
    ///
    /// Only legal moves are considered. Composites have no candidates of
    /// their own.
    pub fn candidates(&self, game: &Game, side: Side) -> Vec<Candidate> {
        let actions = game.actions(side);
        let days_left = LAST_DAY.saturating_sub(game.day);

        actions
            .into_iter()
            .filter_map(|action| match (self, action) {
                (Strategy::Chop, Action::Complete { cell }) => Some(Candidate::Tree(cell)),
                (Strategy::Grow, Action::Grow { cell }) => {
                    // A tree that cannot reach full size before the end is wasted sun
                    let size = game.tree(cell).map_or(0, |tree| tree.size);
                    (MAX_TREE_SIZE - size <= days_left).then_some(Candidate::Tree(cell))
                }
                (Strategy::Seed, Action::Seed { source, target }) => {
                    Some(Candidate::Plant { source, target })
                }
                _ => None,
            })
            .collect()
    }

    /// Scores a candidate; higher is better
    pub fn score(&self, game: &Game, side: Side, candidate: &Candidate) -> Result<i32> {
        let field = game.field();

        match (self, *candidate) {
            (Strategy::Chop, Candidate::Tree(cell)) => {
                let mut score = field.richness(cell)? as i32;
                for &neighbor in field.neighs(cell, 1)? {
                    match game.tree(neighbor) {
                        Some(tree) if tree.owner == side => score += 1,
                        Some(_) => score -= 1,
                        None => {}
                    }
                }
                Ok(score)
            }
            (Strategy::Grow, Candidate::Tree(cell)) => {
                let size = game.tree(cell).map_or(0, |tree| tree.size) as i32;
                let projected = ShadowModel::new(field).count_sun(
                    game.trees(),
                    cell,
                    game.day,
                    game.rules().sun_horizon,
                )?;
                Ok(field.richness(cell)? as i32 + size + projected)
            }
            (Strategy::Seed, Candidate::Plant { source, target }) => {
                let mut score = 2 * field.richness(target)? as i32;
                for (distance, weight) in [(1, 2), (2, 1)] {
                    for &cell in field.neighs(target, distance)? {
                        if game.tree(cell).map_or(false, |tree| tree.owner == side) {
                            score -= weight;
                        }
                    }
                }
                score -= game.tree(source).map_or(0, |tree| tree.size) as i32;
                Ok(score)
            }
            _ => Ok(i32::MIN),
        }
    }

    /// Turns a candidate into the move this strategy plays for it
    pub fn to_action(&self, candidate: &Candidate) -> Option<Action> {
        match (self, *candidate) {
            (Strategy::Chop, Candidate::Tree(cell)) => Some(Action::Complete { cell }),
            (Strategy::Grow, Candidate::Tree(cell)) => Some(Action::Grow { cell }),
            (Strategy::Seed, Candidate::Plant { source, target }) => {
                Some(Action::Seed { source, target })
            }
            _ => None,
        }
    }

    /// Returns the best move of this strategy, if it has one
    ///
    /// Ties go to the earliest candidate.
    pub fn best_action(&self, game: &Game, side: Side) -> Result<Option<Action>> {
        if !self.is_applicable(game, side) {
            return Ok(None);
        }

        if let Strategy::Composite(strategies) = self {
            for strategy in strategies {
                if let Some(action) = strategy.best_action(game, side)? {
                    return Ok(Some(action));
                }
            }
            return Ok(None);
        }

        let mut best: Option<(i32, Candidate)> = None;
        for candidate in self.candidates(game, side) {
            let score = self.score(game, side, &candidate)?;
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, candidate));
            }
        }

        Ok(best.and_then(|(_, candidate)| self.to_action(&candidate)))
    }

    /// Returns the move to play, WAIT when nothing applies
    pub fn action(&self, game: &Game, side: Side) -> Result<Action> {
        Ok(self.best_action(game, side)?.unwrap_or(Action::Wait))
    }
}
