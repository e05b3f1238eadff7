use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::prelude::*;

use crate::*;

/// Source of uniformly distributed cell indices used to place mines.
pub trait RandomSource {
    /// Draws an index from `0..bound`, `bound` is never zero.
    fn next_index(&mut self, bound: CellCount) -> CellIndex;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: CellCount) -> CellIndex {
        (**self).next_index(bound)
    }
}

/// Seeded generator, the same seed always yields the same sequence of boards.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_index(&mut self, bound: CellCount) -> CellIndex {
        self.rng.random_range(0..bound)
    }
}

impl MineLayout {
    /// Places `config.mines()` distinct mines by rejection sampling.
    pub fn random<R: RandomSource + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let cells = config.total_cells();
        let target = usize::from(config.mines());
        let mut picked: HashSet<CellIndex> = HashSet::with_capacity(target);
        let mut draws: u32 = 0;
        while picked.len() < target {
            picked.insert(rng.next_index(cells));
            draws += 1;
        }
        log::debug!(
            "Placed {} mines on {} cells after {} draws",
            target,
            cells,
            draws
        );

        let mine_indices: Vec<CellIndex> = picked.into_iter().collect();
        Self::from_mine_indices(config.side(), &mine_indices)
    }
}
