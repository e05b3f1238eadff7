use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Board side length and row/column positions.
pub type Coord = u8;

/// Flat row-major cell index, `row * side + col`.
pub type CellIndex = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Up to eight neighbor indices, stored inline.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

/// Two-dimensional position of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: Coord,
    pub col: Coord,
}

impl CellPos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Splits a flat index, `side` must be non-zero.
    pub const fn from_index(index: CellIndex, side: Coord) -> Self {
        let side = side as CellIndex;
        Self {
            row: (index / side) as Coord,
            col: (index % side) as Coord,
        }
    }

    pub const fn to_index(self, side: Coord) -> CellIndex {
        self.row as CellIndex * side as CellIndex + self.col as CellIndex
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for CellPos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

/// Number of cells on a square board.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Checks that `index` addresses a cell of a `side` x `side` board.
pub fn validate_index(index: CellIndex, side: Coord) -> Result<CellPos> {
    let cells = square(side);
    if index < cells {
        Ok(CellPos::from_index(index, side))
    } else {
        Err(GameError::InvalidIndex { index, cells })
    }
}

/// Moore neighborhood of `index`, in row-major scan order, excluding the cell itself.
pub fn neighbors(index: CellIndex, side: Coord) -> Result<Neighbors> {
    let center = validate_index(index, side)?;
    Ok(NeighborIter::new(center, side)
        .map(|pos| pos.to_index(side))
        .collect())
}

// (row, col) deltas, row-major
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: CellPos, (dr, dc): (i8, i8), side: Coord) -> Option<CellPos> {
    let row = pos.row.checked_add_signed(dr)?;
    if row >= side {
        return None;
    }

    let col = pos.col.checked_add_signed(dc)?;
    if col >= side {
        return None;
    }

    Some(CellPos::new(row, col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: CellPos,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: CellPos, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellPos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.side);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
