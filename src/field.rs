//! Board geometry for the hexagonal field
//!
//! The field is built once per game and never mutated afterwards. Every query
//! the simulator needs in its hot loop (distance rings and direction vectors)
//! is precomputed at construction so lookups are plain slice accesses.

use std::collections::BTreeSet;
use std::fmt;

use crate::{MCTSError, Result};

/// Number of directions around a hexagonal cell
pub const DIRECTIONS: usize = 6;

/// Largest distance for which rings and vectors are precomputed
pub const MAX_DISTANCE: usize = 3;

/// One of the six directions on the hex grid
///
/// Numbering follows the protocol: 0 is east and the rest go counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    NorthWest = 2,
    West = 3,
    SouthWest = 4,
    SouthEast = 5,
}

impl Direction {
    /// All directions in protocol order
    pub const ALL: [Direction; DIRECTIONS] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Returns the direction pointing the other way, `(d + 3) mod 6`
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 3) % DIRECTIONS]
    }

    /// Returns the protocol index of this direction
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Direction {
    type Error = MCTSError;

    fn try_from(value: usize) -> Result<Self> {
        Direction::ALL
            .get(value)
            .copied()
            .ok_or(MCTSError::InvalidDirection(value))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A single board position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Index of the cell, unique within the field
    pub index: usize,

    /// Soil quality: 0 is barren, 1..=3 are plantable
    pub richness: u8,

    /// Neighbor index for each direction, `None` at the board edge
    pub neighbors: [Option<usize>; DIRECTIONS],
}

impl Cell {
    /// Creates a new cell
    pub fn new(index: usize, richness: u8, neighbors: [Option<usize>; DIRECTIONS]) -> Self {
        Cell {
            index,
            richness,
            neighbors,
        }
    }

    /// Returns the neighbor in the given direction, if any
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        self.neighbors[direction.index()]
    }

    /// Returns true if a tree may stand on this cell
    pub fn is_usable(&self) -> bool {
        self.richness > 0
    }
}

/// Immutable hexagonal board with precomputed rings and vectors
#[derive(Debug, Clone)]
pub struct HexField {
    cells: Vec<Cell>,

    /// `rings[cell][d - 1]` holds the cells at exactly distance `d`
    rings: Vec<[Vec<usize>; MAX_DISTANCE]>,

    /// `vectors[cell][direction]` holds up to three cells walking that way
    vectors: Vec<[Vec<usize>; DIRECTIONS]>,
}

impl HexField {
    /// Builds a field from a list of cells
    ///
    /// Cells may arrive in any order but their indices must cover `0..n`
    /// exactly once and every neighbor must refer to an existing cell.
    pub fn from_cells(mut cells: Vec<Cell>) -> Result<Self> {
        cells.sort_by_key(|cell| cell.index);

        for (position, cell) in cells.iter().enumerate() {
            if cell.index != position {
                return Err(MCTSError::InvalidCell(cell.index));
            }
            if cell.richness > 3 {
                return Err(MCTSError::InvalidConfiguration(format!(
                    "cell {} has richness {}",
                    cell.index, cell.richness
                )));
            }
        }
        for cell in &cells {
            for neighbor in cell.neighbors.iter().flatten() {
                if *neighbor >= cells.len() {
                    return Err(MCTSError::InvalidCell(*neighbor));
                }
            }
        }

        let rings = (0..cells.len()).map(|index| build_rings(&cells, index)).collect();
        let vectors = (0..cells.len())
            .map(|index| build_vectors(&cells, index))
            .collect();

        Ok(HexField {
            cells,
            rings,
            vectors,
        })
    }

    /// Builds the standard 37-cell board used by the game
    ///
    /// Richness is 3 for the center and the first ring, 2 for the second
    /// ring and 1 for the outer ring.
    pub fn standard() -> Self {
        Self::standard_with_richness(|ring| match ring {
            0 | 1 => 3,
            2 => 2,
            _ => 1,
        })
    }

    /// Builds the standard 37-cell layout with richness chosen per ring
    ///
    /// Cells are numbered the way the game numbers them: center first, then
    /// each ring starting from its east-most cell and going counter-clockwise.
    pub fn standard_with_richness<F>(richness: F) -> Self
    where
        F: Fn(usize) -> u8,
    {
        // Cube coordinates, indexed by direction
        const STEPS: [(i32, i32, i32); DIRECTIONS] = [
            (1, -1, 0),
            (1, 0, -1),
            (0, 1, -1),
            (-1, 1, 0),
            (-1, 0, 1),
            (0, -1, 1),
        ];
        let add = |a: (i32, i32, i32), b: (i32, i32, i32)| (a.0 + b.0, a.1 + b.1, a.2 + b.2);

        let mut coords = vec![(0, 0, 0)];
        let mut ring_of = vec![0];
        for ring in 1..=MAX_DISTANCE {
            let mut coord = (0, 0, 0);
            for _ in 0..ring {
                coord = add(coord, STEPS[0]);
            }
            for side in 0..DIRECTIONS {
                for _ in 0..ring {
                    coords.push(coord);
                    ring_of.push(ring);
                    coord = add(coord, STEPS[(side + 2) % DIRECTIONS]);
                }
            }
        }

        let cells = coords
            .iter()
            .enumerate()
            .map(|(index, &coord)| {
                let mut neighbors = [None; DIRECTIONS];
                for (direction, step) in STEPS.iter().enumerate() {
                    let target = add(coord, *step);
                    neighbors[direction] = coords.iter().position(|&c| c == target);
                }
                Cell::new(index, richness(ring_of[index]), neighbors)
            })
            .collect::<Vec<_>>();

        // The generated layout is well formed by construction
        match Self::from_cells(cells) {
            Ok(field) => field,
            Err(e) => unreachable!("standard board is invalid: {}", e),
        }
    }

    /// Returns the number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the field has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns all cells in index order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell with the given index
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells.get(index).ok_or(MCTSError::InvalidCell(index))
    }

    /// Returns the richness of the given cell
    pub fn richness(&self, index: usize) -> Result<u8> {
        Ok(self.cell(index)?.richness)
    }

    /// Returns the cells at exactly `distance` steps from `index`
    ///
    /// Only distances 1, 2 and 3 are precomputed.
    pub fn neighs(&self, index: usize, distance: usize) -> Result<&[usize]> {
        if !(1..=MAX_DISTANCE).contains(&distance) {
            return Err(MCTSError::InvalidDistance(distance));
        }
        let rings = self.rings.get(index).ok_or(MCTSError::InvalidCell(index))?;
        Ok(&rings[distance - 1])
    }

    /// Returns the cells met walking from `index` towards `direction`
    ///
    /// The walk stops at the board edge and is never longer than three cells.
    /// The first element is at distance 1.
    pub fn vector(&self, index: usize, direction: Direction) -> Result<&[usize]> {
        let vectors = self.vectors.get(index).ok_or(MCTSError::InvalidCell(index))?;
        Ok(&vectors[direction.index()])
    }

    /// Validating variant of [`Direction::opposite`] for raw protocol values
    pub fn opposite_direction(direction: usize) -> Result<usize> {
        Ok(Direction::try_from(direction)?.opposite().index())
    }
}

fn build_rings(cells: &[Cell], index: usize) -> [Vec<usize>; MAX_DISTANCE] {
    let mut seen = BTreeSet::new();
    seen.insert(index);

    let mut rings: [Vec<usize>; MAX_DISTANCE] = Default::default();
    let mut frontier = vec![index];

    for ring in rings.iter_mut() {
        let mut next = BTreeSet::new();
        for &from in &frontier {
            for neighbor in cells[from].neighbors.iter().flatten() {
                if !seen.contains(neighbor) {
                    next.insert(*neighbor);
                }
            }
        }
        seen.extend(next.iter().copied());
        *ring = next.into_iter().collect();
        frontier = ring.clone();
    }

    rings
}

fn build_vectors(cells: &[Cell], index: usize) -> [Vec<usize>; DIRECTIONS] {
    let mut vectors: [Vec<usize>; DIRECTIONS] = Default::default();

    for direction in Direction::ALL {
        let vector = &mut vectors[direction.index()];
        let mut current = index;
        while vector.len() < MAX_DISTANCE {
            match cells[current].neighbor(direction) {
                Some(next) => {
                    vector.push(next);
                    current = next;
                }
                None => break,
            }
        }
    }

    vectors
}
