//! Sun direction, shadows and projected sun income
//!
//! The sun moves one direction per day. A tree shadows the cells downwind of
//! it up to its own size, but only cells whose tree is not taller than it.

use crate::{
    field::{Direction, HexField, DIRECTIONS},
    game::{Tree, LAST_DAY, MAX_TREE_SIZE},
    Result,
};

/// Shadow queries over a fixed field
#[derive(Debug, Clone, Copy)]
pub struct ShadowModel<'a> {
    field: &'a HexField,
}

impl<'a> ShadowModel<'a> {
    /// Creates a shadow model for the given field
    pub fn new(field: &'a HexField) -> Self {
        ShadowModel { field }
    }

    /// Returns the direction the sun shines towards on `day`
    pub fn sun_direction(day: u8) -> Direction {
        Direction::ALL[day as usize % DIRECTIONS]
    }

    /// Returns true if a tree of `size` on `index` is shadowed on `day`
    ///
    /// Casters are looked up upwind of the cell, closest first. A caster at
    /// distance `d` with size `s` shadows the cell when `s >= d` and
    /// `s >= size`.
    pub fn is_shadow(
        &self,
        trees: &[Option<Tree>],
        index: usize,
        size: u8,
        day: u8,
    ) -> Result<bool> {
        let upwind = Self::sun_direction(day).opposite();

        for (step, &cell) in self.field.vector(index, upwind)?.iter().enumerate() {
            let distance = step as u8 + 1;
            if let Some(caster) = trees.get(cell).copied().flatten() {
                if caster.size >= distance && caster.size >= size {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Projects the net sun income of the tree on `index` over `horizon` days
    ///
    /// The tree is assumed to grow one size per day up to the maximum while
    /// every other tree keeps its current size. Each projected day counts the
    /// tree's own income when it is lit, plus the income it takes away from
    /// opponent trees it shadows, minus the income it takes away from its
    /// owner's trees. Days past the end of the game are not counted.
    pub fn count_sun(
        &self,
        trees: &[Option<Tree>],
        index: usize,
        day: u8,
        horizon: u8,
    ) -> Result<i32> {
        let Some(tree) = trees.get(index).copied().flatten() else {
            return Ok(0);
        };

        let mut total = 0i32;
        for ahead in 1..=horizon {
            let future_day = day.saturating_add(ahead);
            if future_day > LAST_DAY {
                break;
            }
            let size = tree.size.saturating_add(ahead).min(MAX_TREE_SIZE);

            if !self.is_shadow(trees, index, size, future_day)? {
                total += size as i32;
            }

            let downwind = Self::sun_direction(future_day);
            for (step, &cell) in self.field.vector(index, downwind)?.iter().enumerate() {
                if size < step as u8 + 1 {
                    break;
                }
                if let Some(other) = trees.get(cell).copied().flatten() {
                    if other.size > 0 && other.size <= size {
                        if other.owner == tree.owner {
                            total -= other.size as i32;
                        } else {
                            total += other.size as i32;
                        }
                    }
                }
            }
        }

        Ok(total)
    }
}
