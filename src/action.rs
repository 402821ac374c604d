//! Actions a player can take on their turn, and their protocol text form

use std::fmt;
use std::str::FromStr;

use crate::{game_state::Move, MCTSError};

/// Kind of an action, ordered by search preference
///
/// When two moves look equally promising the planner prefers the one with
/// the higher kind: `Complete > Grow > Seed > Wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Wait = 0,
    Seed = 1,
    Grow = 2,
    Complete = 3,
}

/// A single player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pass for the rest of the day
    Wait,

    /// Plant a seed from the tree on `source` into the empty cell `target`
    Seed { source: usize, target: usize },

    /// Grow the tree on `cell` by one size
    Grow { cell: usize },

    /// Harvest the size-3 tree on `cell`
    Complete { cell: usize },
}

impl Action {
    /// Returns the kind of this action
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Wait => ActionKind::Wait,
            Action::Seed { .. } => ActionKind::Seed,
            Action::Grow { .. } => ActionKind::Grow,
            Action::Complete { .. } => ActionKind::Complete,
        }
    }
}

impl Move for Action {
    fn preference(&self) -> u8 {
        self.kind() as u8
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Wait => write!(f, "WAIT"),
            Action::Seed { source, target } => write!(f, "SEED {} {}", source, target),
            Action::Grow { cell } => write!(f, "GROW {}", cell),
            Action::Complete { cell } => write!(f, "COMPLETE {}", cell),
        }
    }
}

impl FromStr for Action {
    type Err = MCTSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || MCTSError::Parse(format!("invalid action '{}'", s.trim()));

        let mut parts = s.split_whitespace();
        let kind = parts.next().ok_or_else(parse_error)?;
        let args = parts
            .map(|part| part.parse::<usize>().map_err(|_| parse_error()))
            .collect::<Result<Vec<_>, _>>()?;

        match (kind, args.as_slice()) {
            ("WAIT", []) => Ok(Action::Wait),
            ("SEED", [source, target]) => Ok(Action::Seed {
                source: *source,
                target: *target,
            }),
            ("GROW", [cell]) => Ok(Action::Grow { cell: *cell }),
            ("COMPLETE", [cell]) => Ok(Action::Complete { cell: *cell }),
            _ => Err(parse_error()),
        }
    }
}
