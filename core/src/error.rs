use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Too many mines, requested {mines} but the board has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Invalid cell index {index}, the board has {cells} cells")]
    InvalidIndex { index: CellIndex, cells: CellCount },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board counters or status disagree with its cells")]
    InconsistentBoard,
    #[error("Reset is locked until the current game has been played")]
    ResetLocked,
}

impl GameError {
    /// Whether the error comes from malformed input rather than from game flow.
    pub const fn is_invalid_argument(self) -> bool {
        match self {
            Self::EmptyBoard
            | Self::TooManyMines { .. }
            | Self::InvalidIndex { .. }
            | Self::InvalidBoardShape
            | Self::InconsistentBoard => true,
            Self::ResetLocked => false,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
