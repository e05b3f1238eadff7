use bitflags::bitflags;

use crate::*;

bitflags! {
    /// Feedback signals for a single reveal, the embedding app decides how to play them.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Cues: u8 {
        const CLICK = 0b001;
        const BUG = 0b010;
        const WIN = 0b100;
    }
}

impl From<RevealOutcome> for Cues {
    fn from(outcome: RevealOutcome) -> Self {
        use RevealOutcome::*;
        match outcome {
            NoChange => Cues::empty(),
            Revealed => Cues::CLICK,
            HitMine => Cues::CLICK | Cues::BUG,
            Win => Cues::CLICK | Cues::WIN,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub outcome: RevealOutcome,
    pub cues: Cues,
}

impl From<RevealOutcome> for Feedback {
    fn from(outcome: RevealOutcome) -> Self {
        Self {
            outcome,
            cues: outcome.into(),
        }
    }
}

/// The single live game of a page, with the reset gate around it.
///
/// Reset stays locked until the current board has accepted at least one reveal.
#[derive(Clone, Debug)]
pub struct GameSession<R = SeededSource> {
    config: GameConfig,
    rng: R,
    board: Board,
    has_interacted: bool,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self> {
        let board = Board::initialize(config, &mut rng)?;
        Ok(Self {
            config,
            rng,
            board,
            has_interacted: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn can_reset(&self) -> bool {
        self.has_interacted
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<Feedback> {
        let outcome = self.board.reveal(index)?;
        if outcome.has_update() {
            self.has_interacted = true;
        }
        log::debug!("Reveal {} -> {:?}", index, outcome);
        Ok(outcome.into())
    }

    /// Replaces the board with a freshly generated one.
    pub fn reset(&mut self) -> Result<()> {
        if !self.has_interacted {
            return Err(GameError::ResetLocked);
        }

        self.board = Board::initialize(self.config, &mut self.rng)?;
        self.has_interacted = false;
        Ok(())
    }
}
