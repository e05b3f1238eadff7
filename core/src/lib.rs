#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod session;
mod types;
mod view;

#[cfg(test)]
mod testing;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    side: Coord,
    mines: CellCount,
}

impl GameConfig {
    /// The board shown on the welcome page.
    pub const WELCOME: Self = Self::new_unchecked(8, 3);

    pub(crate) const fn new_unchecked(side: Coord, mines: CellCount) -> Self {
        Self { side, mines }
    }

    pub fn new(side: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(side, mines);
        config.validate()?;
        Ok(config)
    }

    /// Requires at least one cell and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.side == 0 {
            return Err(GameError::EmptyBoard);
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }

        Ok(())
    }

    pub const fn side(&self) -> Coord {
        self.side
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.side)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::WELCOME
    }
}

/// Where the mines are, fixed for the lifetime of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutData")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Unchecked form of a [`MineLayout`] as it comes out of a deserializer.
#[derive(Deserialize)]
struct MineLayoutData {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<MineLayoutData> for MineLayout {
    type Error = GameError;

    fn try_from(data: MineLayoutData) -> Result<Self> {
        let layout = Self {
            mine_mask: data.mine_mask,
            mine_count: data.mine_count,
        };
        layout.validate()?;
        Ok(layout)
    }
}

pub(crate) fn count_set(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&is_set| is_set).count()
}

impl MineLayout {
    fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        // a side fits in `Coord`, so any count of its cells fits in `CellCount`
        let mine_count = count_set(&mine_mask) as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit indices, duplicates collapse into one mine.
    pub fn from_mine_indices(side: Coord, mine_indices: &[CellIndex]) -> Result<Self> {
        if side == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default([usize::from(side), usize::from(side)]);
        for &index in mine_indices {
            let pos = validate_index(index, side)?;
            mine_mask[pos.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        layout.game_config().validate()?;
        Ok(layout)
    }

    /// Checks the mask is a square board that matches `mine_count` and keeps a safe cell.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.mine_mask.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        if rows == 0 {
            return Err(GameError::EmptyBoard);
        }
        if count_set(&self.mine_mask) != usize::from(self.mine_count) {
            return Err(GameError::InconsistentBoard);
        }

        self.game_config().validate()
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.side(), self.mine_count)
    }

    pub fn side(&self) -> Coord {
        self.mine_mask.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.side())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, index: CellIndex) -> Result<bool> {
        let pos = validate_index(index, self.side())?;
        Ok(self[pos])
    }

    /// Mined cells in ascending index order.
    pub fn mine_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let side = self.side();
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(move |((row, col), _)| CellPos::new(row as Coord, col as Coord).to_index(side))
    }

    pub fn adjacent_mine_count(&self, index: CellIndex) -> Result<u8> {
        let pos = validate_index(index, self.side())?;
        Ok(self.count_adjacent(pos))
    }

    pub(crate) fn count_adjacent(&self, pos: CellPos) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(pos).filter(|&pos| self[pos]).count() as u8
    }

    pub(crate) fn iter_neighbors(&self, pos: CellPos) -> NeighborIter {
        NeighborIter::new(pos, self.side())
    }
}

impl Index<CellPos> for MineLayout {
    type Output = bool;

    fn index(&self, pos: CellPos) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Win,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Win => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_boards_without_safe_cells() {
        assert_eq!(
            GameConfig::new(3, 9),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        );
        assert_eq!(GameConfig::new(0, 0), Err(GameError::EmptyBoard));
        assert!(GameConfig::new(3, 8).is_ok());
        assert!(GameConfig::new(1, 0).is_ok());
    }

    #[test]
    fn welcome_board_is_the_default() {
        let config = GameConfig::default();

        assert_eq!(config, GameConfig::WELCOME);
        assert_eq!(config.side(), 8);
        assert_eq!(config.mines(), 3);
        assert_eq!(config.safe_cells(), 61);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialized_config_can_be_revalidated() {
        let config: GameConfig = serde_json::from_str(r#"{"side":2,"mines":4}"#).unwrap();

        assert_eq!(
            config.validate(),
            Err(GameError::TooManyMines { mines: 4, cells: 4 })
        );
    }

    #[test]
    fn layout_counts_distinct_mines() {
        let layout = MineLayout::from_mine_indices(3, &[4, 4, 0]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.mine_indices().collect::<Vec<_>>(), [0, 4]);
        assert_eq!(layout.game_config(), GameConfig::new(3, 2).unwrap());
    }

    #[test]
    fn layout_rejects_bad_input() {
        assert_eq!(
            MineLayout::from_mine_indices(3, &[9]),
            Err(GameError::InvalidIndex { index: 9, cells: 9 })
        );
        assert_eq!(
            MineLayout::from_mine_indices(1, &[0]),
            Err(GameError::TooManyMines { mines: 1, cells: 1 })
        );
        assert_eq!(MineLayout::from_mine_indices(0, &[]), Err(GameError::EmptyBoard));
    }

    #[test]
    fn validate_rejects_malformed_layouts() {
        let layout = |mine_mask, mine_count| MineLayout {
            mine_mask,
            mine_count,
        };

        assert_eq!(
            layout(Array2::from_elem([2, 3], false), 0).validate(),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            layout(Array2::from_elem([256, 256], false), 0).validate(),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            layout(Array2::from_elem([0, 0], false), 0).validate(),
            Err(GameError::EmptyBoard)
        );
        assert_eq!(
            layout(Array2::from_elem([2, 2], true), 3).validate(),
            Err(GameError::InconsistentBoard)
        );
        assert_eq!(
            layout(Array2::from_elem([2, 2], true), 4).validate(),
            Err(GameError::TooManyMines { mines: 4, cells: 4 })
        );
        assert!(MineLayout::from_mine_indices(3, &[4]).unwrap().validate().is_ok());
    }

    #[test]
    fn deserializing_checks_the_layout() {
        let layout = MineLayout::from_mine_indices(3, &[4]).unwrap();
        let mut value = serde_json::to_value(&layout).unwrap();

        assert_eq!(serde_json::from_value::<MineLayout>(value.clone()).unwrap(), layout);

        value["mine_count"] = serde_json::json!(0);
        assert!(serde_json::from_value::<MineLayout>(value.clone()).is_err());

        value["mine_count"] = serde_json::json!(1);
        value["mine_mask"] = serde_json::to_value(Array2::from_elem([2, 3], false)).unwrap();
        assert!(serde_json::from_value::<MineLayout>(value).is_err());
    }

    #[test]
    fn adjacent_mine_count_covers_the_moore_neighborhood() {
        let layout = MineLayout::from_mine_indices(3, &[4]).unwrap();

        for index in [0, 1, 2, 3, 5, 6, 7, 8] {
            assert_eq!(layout.adjacent_mine_count(index), Ok(1));
        }
        assert_eq!(layout.adjacent_mine_count(4), Ok(0));
        assert!(layout.contains_mine(4).unwrap());
        assert!(!layout.contains_mine(0).unwrap());

        let crowded = MineLayout::from_mine_indices(3, &[0, 1, 2, 3, 5, 6, 7, 8]).unwrap();
        assert_eq!(crowded.adjacent_mine_count(4), Ok(8));
        assert_eq!(crowded.adjacent_mine_count(0), Ok(2));
    }

    #[test]
    fn only_no_change_has_no_update() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed.has_update());
        assert!(RevealOutcome::HitMine.has_update());
        assert!(RevealOutcome::Win.has_update());
    }
}
