use alloc::collections::VecDeque;

use crate::*;

/// Replays a fixed list of draws.
pub(crate) struct Scripted(VecDeque<CellIndex>);

impl Scripted {
    pub(crate) fn new(draws: &[CellIndex]) -> Self {
        Self(draws.iter().copied().collect())
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.0.is_empty()
    }
}

impl RandomSource for Scripted {
    fn next_index(&mut self, bound: CellCount) -> CellIndex {
        let index = self.0.pop_front().expect("script exhausted");
        assert!(index < bound);
        index
    }
}
