//! Line-oriented referee protocol
//!
//! The referee first sends the board once, then one block per turn. Every
//! reader here works on any [`BufRead`], so tests can feed plain strings.

use std::io::BufRead;
use std::sync::Arc;

use log::debug;

use crate::{
    action::Action,
    config::RulesConfig,
    field::{Cell, HexField, DIRECTIONS},
    game::{Game, PlayerState, Side, Tree},
    MCTSError, Result,
};

/// Reads referee input line by line, keeping track of the line number
pub struct LineReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered reader
    pub fn new(inner: R) -> Self {
        LineReader { inner, line: 0 }
    }

    /// Returns the number of lines read so far
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Reads the next line, `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<String>> {
        let mut buffer = String::new();
        if self.inner.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn expect_line(&mut self) -> Result<String> {
        self.next_line()?.ok_or_else(|| {
            MCTSError::Parse(format!("unexpected end of input after line {}", self.line))
        })
    }

    fn expect_numbers(&mut self, count: usize) -> Result<Vec<i64>> {
        let line = self.expect_line()?;
        self.numbers(&line, count)
    }

    fn numbers(&self, line: &str, count: usize) -> Result<Vec<i64>> {
        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| {
                    MCTSError::Parse(format!("line {}: '{}' is not an integer", self.line, token))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if values.len() != count {
            return Err(MCTSError::Parse(format!(
                "line {}: expected {} values, found {}",
                self.line,
                count,
                values.len()
            )));
        }
        Ok(values)
    }

    fn expect_count(&mut self) -> Result<usize> {
        let value = self.expect_numbers(1)?[0];
        self.non_negative(value)
    }

    fn non_negative<T: TryFrom<i64>>(&self, value: i64) -> Result<T> {
        T::try_from(value).map_err(|_| {
            MCTSError::Parse(format!("line {}: value {} is out of range", self.line, value))
        })
    }

    fn flag(&self, value: i64) -> Result<bool> {
        match value {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(MCTSError::Parse(format!(
                "line {}: expected 0 or 1, found {}",
                self.line, other
            ))),
        }
    }
}

/// Reads the board description
///
/// The first line holds the number of cells, followed by one line per cell:
/// `index richness n0 n1 n2 n3 n4 n5`, with `-1` for a missing neighbor.
pub fn read_field<R: BufRead>(reader: &mut LineReader<R>) -> Result<HexField> {
    let count = reader.expect_count()?;
    let mut cells = Vec::new();

    for _ in 0..count {
        let values = reader.expect_numbers(2 + DIRECTIONS)?;
        let index = reader.non_negative(values[0])?;
        let richness = reader.non_negative(values[1])?;

        let mut neighbors = [None; DIRECTIONS];
        for (slot, &value) in neighbors.iter_mut().zip(&values[2..]) {
            *slot = if value < 0 {
                None
            } else {
                Some(reader.non_negative(value)?)
            };
        }
        cells.push(Cell::new(index, richness, neighbors));
    }

    let field = HexField::from_cells(cells)?;
    debug!("read field with {} cells", field.len());
    Ok(field)
}

/// Reads one turn and builds the snapshot with me to move
///
/// Returns `None` if the input ends cleanly before the turn starts.
pub fn read_turn<R: BufRead>(
    reader: &mut LineReader<R>,
    field: Arc<HexField>,
    rules: RulesConfig,
) -> Result<Option<Game>> {
    let Some(first) = reader.next_line()? else {
        return Ok(None);
    };

    let mut game = Game::new(field, rules);
    let day = reader.numbers(&first, 1)?[0];
    game.day = reader.non_negative(day)?;
    let nutrients = reader.expect_numbers(1)?[0];
    game.nutrients = reader.non_negative(nutrients)?;

    let mine = reader.expect_numbers(2)?;
    *game.player_mut(Side::Me) = PlayerState::new(
        reader.non_negative(mine[0])?,
        reader.non_negative(mine[1])?,
    );

    let theirs = reader.expect_numbers(3)?;
    *game.player_mut(Side::Opponent) = PlayerState {
        sun: reader.non_negative(theirs[0])?,
        score: reader.non_negative(theirs[1])?,
        waiting: reader.flag(theirs[2])?,
    };

    let tree_count = reader.expect_count()?;
    for _ in 0..tree_count {
        let values = reader.expect_numbers(4)?;
        let owner = if reader.flag(values[2])? {
            Side::Me
        } else {
            Side::Opponent
        };
        let tree = Tree {
            cell: reader.non_negative(values[0])?,
            size: reader.non_negative(values[1])?,
            owner,
            dormant: reader.flag(values[3])?,
        };
        game.place_tree(tree)
            .map_err(|e| MCTSError::Parse(format!("line {}: {}", reader.line_number(), e)))?;
    }

    let action_count = reader.expect_count()?;
    let mut actions = Vec::new();
    for _ in 0..action_count {
        let line = reader.expect_line()?;
        let action = line
            .parse::<Action>()
            .map_err(|e| MCTSError::Parse(format!("line {}: {}", reader.line_number(), e)))?;
        actions.push(action);
    }
    game.set_judge_actions(actions);

    debug!("read turn: {}", game);
    Ok(Some(game))
}
