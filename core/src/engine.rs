use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Lost,
    Won,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game, from initialization until the next one replaces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    mine_layout: MineLayout,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<CellIndex>,
}

/// Unchecked form of a [`Board`] as it comes out of a deserializer.
#[derive(Deserialize)]
struct BoardData {
    mine_layout: MineLayout,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<CellIndex>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let board = Self {
            mine_layout: data.mine_layout,
            revealed: data.revealed,
            revealed_count: data.revealed_count,
            status: data.status,
            triggered_mine: data.triggered_mine,
        };
        board.validate()?;
        Ok(board)
    }
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let side = usize::from(mine_layout.side());
        Self {
            mine_layout,
            revealed: Array2::default([side, side]),
            revealed_count: 0,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    /// Starts a fresh game with randomly placed mines.
    pub fn initialize<R: RandomSource + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let mine_layout = MineLayout::random(config, rng)?;
        log::debug!(
            "New {}x{} board with {} mines",
            config.side(),
            config.side(),
            config.mines()
        );
        Ok(Self::new(mine_layout))
    }

    /// Checks that the revealed mask, counters and status describe a reachable game.
    pub fn validate(&self) -> Result<()> {
        self.mine_layout.validate()?;

        let side = self.side();
        if self.revealed.dim() != (usize::from(side), usize::from(side)) {
            return Err(GameError::InvalidBoardShape);
        }
        if count_set(&self.revealed) != usize::from(self.revealed_count) {
            return Err(GameError::InconsistentBoard);
        }

        let mut revealed_mines = self
            .mine_layout
            .mine_indices()
            .filter(|&index| self.is_revealed_at(CellPos::from_index(index, side)));
        let triggered = revealed_mines.next();
        if revealed_mines.next().is_some() {
            return Err(GameError::InconsistentBoard);
        }

        let safe_cells = self.mine_layout.safe_cell_count();
        let expected = match triggered {
            // the triggered mine is part of `revealed_count`
            Some(_) if self.revealed_count <= safe_cells => GameStatus::Lost,
            Some(_) => return Err(GameError::InconsistentBoard),
            None if self.revealed_count == safe_cells => GameStatus::Won,
            None => GameStatus::InProgress,
        };
        if self.status != expected || self.triggered_mine != triggered {
            return Err(GameError::InconsistentBoard);
        }

        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn side(&self) -> Coord {
        self.mine_layout.side()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    /// Cells revealed so far, including a triggered mine.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    pub fn is_revealed(&self, index: CellIndex) -> Result<bool> {
        let pos = validate_index(index, self.side())?;
        Ok(self.is_revealed_at(pos))
    }

    pub(crate) fn is_revealed_at(&self, pos: CellPos) -> bool {
        self.revealed[pos.to_nd_index()]
    }

    /// Reveals a cell, flood-filling through cells with no adjacent mines.
    ///
    /// Revealing an already revealed cell, or any cell after the game ended, is a no-op.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let pos = validate_index(index, self.side())?;

        if self.status.is_finished() || self.is_revealed_at(pos) {
            return Ok(NoChange);
        }

        if self.mine_layout[pos] {
            // only the triggered mine is shown, the rest stay hidden
            self.mark_revealed(pos);
            self.triggered_mine = Some(index);
            self.end_game(GameStatus::Lost);
            return Ok(HitMine);
        }

        self.flood_reveal(pos);

        if self.revealed_count == self.mine_layout.safe_cell_count() {
            self.end_game(GameStatus::Won);
            Ok(Win)
        } else {
            Ok(Revealed)
        }
    }

    /// Depth-first fill with an explicit stack, the revealed mask doubles as the visited set.
    fn flood_reveal(&mut self, start: CellPos) {
        let mut to_visit = vec![start];

        while let Some(pos) = to_visit.pop() {
            if self.is_revealed_at(pos) || self.mine_layout[pos] {
                continue;
            }

            self.mark_revealed(pos);
            let adjacent_mines = self.mine_layout.count_adjacent(pos);
            log::trace!("Revealed {:?}, adjacent mines: {}", pos, adjacent_mines);

            if adjacent_mines == 0 {
                // pushed in reverse so the first neighbor in scan order is visited first
                let hidden: SmallVec<[CellPos; 8]> = self
                    .mine_layout
                    .iter_neighbors(pos)
                    .filter(|&neighbor| !self.is_revealed_at(neighbor))
                    .collect();
                to_visit.extend(hidden.into_iter().rev());
            }
        }
    }

    fn mark_revealed(&mut self, pos: CellPos) {
        self.revealed[pos.to_nd_index()] = true;
        self.revealed_count += 1;
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        log::debug!(
            "Game ended {:?} with {} cells revealed",
            status,
            self.revealed_count
        );
        self.status = status;
    }
}
