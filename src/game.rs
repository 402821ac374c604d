//! Turn snapshot and exact forward simulation of the game rules
//!
//! A [`Game`] owns its trees and players by value, so cloning it gives a fully
//! independent branch. Only the immutable [`HexField`] is shared between
//! branches, behind an `Arc`.
//!
//! Within a day the two sides take turns. A side that has played WAIT sits
//! out the rest of the day while the other keeps acting; once both have
//! waited the day ends, trees wake up and sun is paid out.

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::{
    action::Action,
    config::{RulesConfig, SunIncome},
    field::HexField,
    game_state::{GameState, Player},
    shadow::ShadowModel,
    MCTSError, Result,
};

/// Number of days in a game
pub const DAYS: u8 = 24;

/// Index of the final day; the game is over once the day passes it
pub const LAST_DAY: u8 = DAYS - 1;

/// Largest tree size
pub const MAX_TREE_SIZE: u8 = 3;

/// Base sun cost to grow a tree from size 0, 1 and 2
pub const GROW_BASE_COST: [u32; MAX_TREE_SIZE as usize] = [1, 3, 7];

/// Sun cost of harvesting a size-3 tree
pub const HARVEST_COST: u32 = 4;

/// Nutrients at the start of a game
pub const INITIAL_NUTRIENTS: u32 = 20;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Me,
    Opponent,
}

impl Side {
    /// Both sides, in turn order
    pub const BOTH: [Side; 2] = [Side::Me, Side::Opponent];

    /// Returns the other side
    pub fn other(self) -> Side {
        match self {
            Side::Me => Side::Opponent,
            Side::Opponent => Side::Me,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Me => 0,
            Side::Opponent => 1,
        }
    }
}

impl Player for Side {}

/// A tree standing on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    pub cell: usize,
    pub size: u8,
    pub owner: Side,
    /// Set once the tree has acted this day
    pub dormant: bool,
}

impl Tree {
    /// Creates an awake tree
    pub fn new(cell: usize, size: u8, owner: Side) -> Self {
        Tree {
            cell,
            size,
            owner,
            dormant: false,
        }
    }

    /// Returns the same tree marked dormant
    pub fn dormant(mut self) -> Self {
        self.dormant = true;
        self
    }
}

/// Resources and turn status of one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    pub sun: u32,
    pub score: u32,
    /// Set once the player has passed for the current day
    pub waiting: bool,
}

impl PlayerState {
    /// Creates an active player with the given sun and score
    pub fn new(sun: u32, score: u32) -> Self {
        PlayerState {
            sun,
            score,
            waiting: false,
        }
    }
}

/// Snapshot of a game at one point of a day
#[derive(Debug, Clone)]
pub struct Game {
    field: Arc<HexField>,
    rules: RulesConfig,

    /// Current day, `0..DAYS`; `DAYS` or more means the game is over
    pub day: u8,

    /// Bonus added to the next harvest, decreasing by one per harvest
    pub nutrients: u32,

    players: [PlayerState; 2],
    trees: Vec<Option<Tree>>,

    /// Moves the referee declared legal for this turn, root snapshots only
    judge_actions: Option<Vec<Action>>,

    to_move: Side,
}

impl Game {
    /// Creates the snapshot of an empty board on day 0
    pub fn new(field: Arc<HexField>, rules: RulesConfig) -> Self {
        let trees = vec![None; field.len()];
        Game {
            field,
            rules,
            day: 0,
            nutrients: INITIAL_NUTRIENTS,
            players: [PlayerState::default(); 2],
            trees,
            judge_actions: None,
            to_move: Side::Me,
        }
    }

    /// Returns the board
    pub fn field(&self) -> &HexField {
        &self.field
    }

    /// Returns the rule settings
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Returns a player's resources
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    /// Returns a player's resources for editing
    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side.index()]
    }

    /// Returns the side that moves next
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Returns the trees indexed by cell
    pub fn trees(&self) -> &[Option<Tree>] {
        &self.trees
    }

    /// Returns the tree on `cell`, if any
    pub fn tree(&self, cell: usize) -> Option<&Tree> {
        self.trees.get(cell).and_then(Option::as_ref)
    }

    /// Iterates over the trees owned by `side` in cell order
    pub fn trees_of(&self, side: Side) -> impl Iterator<Item = &Tree> + '_ {
        self.trees.iter().flatten().filter(move |tree| tree.owner == side)
    }

    /// Places a tree on the board
    ///
    /// Fails if the cell does not exist, is barren or already holds a tree,
    /// or if the size is out of range.
    pub fn place_tree(&mut self, tree: Tree) -> Result<()> {
        let cell = self.field.cell(tree.cell)?;
        if !cell.is_usable() {
            return Err(MCTSError::IllegalAction(format!(
                "cell {} is barren",
                tree.cell
            )));
        }
        if tree.size > MAX_TREE_SIZE {
            return Err(MCTSError::IllegalAction(format!(
                "tree on cell {} has size {}",
                tree.cell, tree.size
            )));
        }
        if self.trees[tree.cell].is_some() {
            return Err(MCTSError::IllegalAction(format!(
                "cell {} already holds a tree",
                tree.cell
            )));
        }
        self.trees[tree.cell] = Some(tree);
        Ok(())
    }

    /// Restricts my moves to the referee's list for this snapshot
    pub fn set_judge_actions(&mut self, actions: Vec<Action>) {
        self.judge_actions = Some(actions);
    }

    /// Returns the referee's list of legal moves, if one was supplied
    pub fn judge_actions(&self) -> Option<&[Action]> {
        self.judge_actions.as_deref()
    }

    /// Counts the trees of `side` with the given size
    pub fn tree_count(&self, side: Side, size: u8) -> usize {
        self.trees_of(side).filter(|tree| tree.size == size).count()
    }

    /// Returns the sun needed to grow a tree of `side` from `size`
    ///
    /// `None` for trees that are already fully grown.
    pub fn grow_cost(&self, side: Side, size: u8) -> Option<u32> {
        let base = *GROW_BASE_COST.get(size as usize)?;
        Some(base + self.tree_count(side, size + 1) as u32)
    }

    /// Returns the sun needed for `side` to plant a seed
    pub fn seed_cost(&self, side: Side) -> u32 {
        self.tree_count(side, 0) as u32
    }

    /// Returns the points a harvest on `cell` would score right now
    pub fn harvest_score(&self, cell: usize) -> Result<u32> {
        Ok(self.field.richness(cell)? as u32 + self.nutrients)
    }

    /// Returns the sun `side` collects at the start of the current day
    pub fn sun_income(&self, side: Side) -> Result<u32> {
        let shadows = ShadowModel::new(&self.field);
        let mut income = 0;
        for tree in self.trees_of(side) {
            let lit = match self.rules.sun_income {
                SunIncome::Flat => true,
                SunIncome::Shadowed => {
                    !shadows.is_shadow(&self.trees, tree.cell, tree.size, self.day)?
                }
            };
            if lit {
                income += tree.size as u32;
            }
        }
        Ok(income)
    }

    /// Returns true if `side` may harvest under the configured gating
    fn harvest_open(&self, side: Side) -> bool {
        self.day >= self.rules.harvest_from_day
            || self.tree_count(side, MAX_TREE_SIZE) >= self.rules.harvest_tree_threshold
    }

    /// Lists the moves available to `side`
    ///
    /// WAIT is always first and always present. A side that already passed
    /// this day only gets WAIT.
    pub fn actions(&self, side: Side) -> Vec<Action> {
        let mut actions = vec![Action::Wait];
        let player = self.player(side);
        if self.is_terminal() || player.waiting {
            return actions;
        }

        let seed_cost = self.seed_cost(side);
        let harvest_open = self.harvest_open(side);

        for tree in self.trees_of(side).filter(|tree| !tree.dormant) {
            match self.grow_cost(side, tree.size) {
                Some(cost) if player.sun >= cost => actions.push(Action::Grow { cell: tree.cell }),
                None if harvest_open && player.sun >= HARVEST_COST => {
                    actions.push(Action::Complete { cell: tree.cell })
                }
                _ => {}
            }

            if seed_cost > player.sun {
                continue;
            }
            for distance in 1..=tree.size as usize {
                let ring = self.field.neighs(tree.cell, distance).unwrap_or(&[]);
                for &target in ring {
                    if self.is_plantable(target) {
                        actions.push(Action::Seed {
                            source: tree.cell,
                            target,
                        });
                    }
                }
            }
        }

        if side == Side::Me {
            if let Some(judge) = &self.judge_actions {
                actions.retain(|action| *action == Action::Wait || judge.contains(action));
            }
        }

        actions
    }

    fn is_plantable(&self, cell: usize) -> bool {
        self.trees.get(cell).map_or(false, Option::is_none)
            && self.field.cell(cell).map_or(false, |c| c.is_usable())
    }

    /// Applies `action` for the side to move and returns the next snapshot
    ///
    /// `self` is left untouched. Fails with [`MCTSError::IllegalAction`] if
    /// the rules forbid the action.
    pub fn simulate(&self, action: &Action) -> Result<Game> {
        if self.is_terminal() {
            return Err(MCTSError::IllegalAction(format!(
                "{} after the last day",
                action
            )));
        }

        let side = self.to_move;
        if self.player(side).waiting && *action != Action::Wait {
            return Err(MCTSError::IllegalAction(format!(
                "{} by a player who already passed",
                action
            )));
        }

        let mut next = self.clone();
        next.judge_actions = None;

        match *action {
            Action::Wait => {
                next.player_mut(side).waiting = true;
            }
            Action::Grow { cell } => {
                let tree = self.active_tree(side, cell, action)?;
                let cost = self
                    .grow_cost(side, tree.size)
                    .ok_or_else(|| illegal(action, "tree is fully grown"))?;
                next.pay(side, cost, action)?;
                next.trees[cell] = Some(Tree {
                    size: tree.size + 1,
                    dormant: true,
                    ..tree
                });
            }
            Action::Seed { source, target } => {
                let tree = self.active_tree(side, source, action)?;
                if !self.is_plantable(target) {
                    return Err(illegal(action, "target cell is not plantable"));
                }
                let in_range = (1..=tree.size as usize).any(|distance| {
                    self.field
                        .neighs(source, distance)
                        .map_or(false, |ring| ring.contains(&target))
                });
                if !in_range {
                    return Err(illegal(action, "target is out of range"));
                }
                next.pay(side, self.seed_cost(side), action)?;
                next.trees[source] = Some(tree.dormant());
                next.trees[target] = Some(Tree::new(target, 0, side).dormant());
            }
            Action::Complete { cell } => {
                let tree = self.active_tree(side, cell, action)?;
                if tree.size != MAX_TREE_SIZE {
                    return Err(illegal(action, "tree is not fully grown"));
                }
                next.pay(side, HARVEST_COST, action)?;
                let score = self.harvest_score(cell)?;
                let player = next.player_mut(side);
                player.score = player.score.saturating_add(score);
                next.trees[cell] = None;
                next.nutrients = next.nutrients.saturating_sub(1);
            }
        }

        next.pass_turn(side)?;
        Ok(next)
    }

    fn active_tree(&self, side: Side, cell: usize, action: &Action) -> Result<Tree> {
        let tree = self
            .trees
            .get(cell)
            .copied()
            .flatten()
            .ok_or_else(|| illegal(action, "no tree on that cell"))?;
        if tree.owner != side {
            return Err(illegal(action, "tree belongs to the other player"));
        }
        if tree.dormant {
            return Err(illegal(action, "tree is dormant"));
        }
        Ok(tree)
    }

    fn pay(&mut self, side: Side, cost: u32, action: &Action) -> Result<()> {
        let player = self.player_mut(side);
        player.sun = player
            .sun
            .checked_sub(cost)
            .ok_or_else(|| illegal(action, "not enough sun"))?;
        Ok(())
    }

    fn pass_turn(&mut self, actor: Side) -> Result<()> {
        let other = actor.other();
        if self.player(actor).waiting && self.player(other).waiting {
            self.advance_day()
        } else {
            self.to_move = if self.player(other).waiting { actor } else { other };
            Ok(())
        }
    }

    fn advance_day(&mut self) -> Result<()> {
        self.day += 1;
        for tree in self.trees.iter_mut().flatten() {
            tree.dormant = false;
        }
        for player in self.players.iter_mut() {
            player.waiting = false;
        }
        self.to_move = Side::Me;

        if !self.is_terminal() {
            for side in Side::BOTH {
                let income = self.sun_income(side)?;
                let player = self.player_mut(side);
                player.sun = player.sun.saturating_add(income);
            }
        }

        trace!("day {} begins: {}", self.day, self);
        Ok(())
    }

    /// Returns true once the last day is over
    pub fn is_terminal(&self) -> bool {
        self.day > LAST_DAY
    }

    /// Returns 1.0 if `side` has a strictly higher score than the other side
    pub fn outcome(&self, side: Side) -> f64 {
        if self.player(side).score > self.player(side.other()).score {
            1.0
        } else {
            0.0
        }
    }
}

fn illegal(action: &Action, reason: &str) -> MCTSError {
    MCTSError::IllegalAction(format!("{}: {}", action, reason))
}

impl GameState for Game {
    type Move = Action;
    type Player = Side;

    fn legal_moves(&self) -> Vec<Action> {
        self.actions(self.to_move)
    }

    fn apply_move(&self, mv: &Action) -> Result<Self> {
        self.simulate(mv)
    }

    fn is_terminal(&self) -> bool {
        Game::is_terminal(self)
    }

    fn outcome(&self, for_player: Side) -> f64 {
        Game::outcome(self, for_player)
    }

    fn current_player(&self) -> Side {
        self.to_move
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let me = self.player(Side::Me);
        let opp = self.player(Side::Opponent);
        write!(
            f,
            "day {} nutrients {} | me sun {} score {} trees {} | opp sun {} score {} trees {}",
            self.day,
            self.nutrients,
            me.sun,
            me.score,
            self.trees_of(Side::Me).count(),
            opp.sun,
            opp.score,
            self.trees_of(Side::Opponent).count()
        )
    }
}
