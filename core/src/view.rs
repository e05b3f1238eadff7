use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer needs to know about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub adjacent_mines: u8,
}

/// Glyph category of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    /// Safe cell with its adjacent mine count, zero renders as clear.
    Revealed(u8),
    TriggeredMine,
    /// Unrevealed mine, highlighted once the game is lost.
    Mine,
}

impl CellSnapshot {
    pub const fn view(self, status: GameStatus) -> CellView {
        match (self.is_revealed, self.is_mine) {
            (true, true) => CellView::TriggeredMine,
            (true, false) => CellView::Revealed(self.adjacent_mines),
            (false, true) if matches!(status, GameStatus::Lost) => CellView::Mine,
            (false, _) => CellView::Hidden,
        }
    }
}

impl Board {
    pub fn cell(&self, index: CellIndex) -> Result<CellSnapshot> {
        let pos = validate_index(index, self.side())?;
        Ok(self.snapshot_at(pos))
    }

    pub fn cell_view(&self, index: CellIndex) -> Result<CellView> {
        Ok(self.cell(index)?.view(self.status()))
    }

    /// Snapshots of every cell in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellSnapshot> + '_ {
        let side = self.side();
        (0..square(side)).map(move |index| self.snapshot_at(CellPos::from_index(index, side)))
    }

    fn snapshot_at(&self, pos: CellPos) -> CellSnapshot {
        let layout = self.layout();
        CellSnapshot {
            is_mine: layout[pos],
            is_revealed: self.is_revealed_at(pos),
            adjacent_mines: layout.count_adjacent(pos),
        }
    }
}
