use alloc::vec;
use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Places prizes on a uniformly random permutation of the cells: the first slots become jackpots, the next ones
/// small jackpots, and everything after that stays empty.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: &GameConfig) -> Grid {
        let total_cells = config.total_cells();

        let jackpots = config.jackpots.min(total_cells);
        let small_jackpots = config.small_jackpots.min(total_cells - jackpots);
        if (jackpots, small_jackpots) != (config.jackpots, config.small_jackpots) {
            log::warn!(
                "Grid already full, requested {} + {} prizes but only fits {}",
                config.jackpots,
                config.small_jackpots,
                total_cells
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut order: Vec<CellIndex> = (0..total_cells).collect();
        order.shuffle(&mut rng);

        let mut prizes = vec![Prize::Empty; usize::from(total_cells)];
        let (jackpot_slots, rest) = order.split_at(usize::from(jackpots));
        for &index in jackpot_slots {
            prizes[usize::from(index)] = Prize::Jackpot;
        }
        for &index in &rest[..usize::from(small_jackpots)] {
            prizes[usize::from(index)] = Prize::SmallJackpot;
        }

        let grid = Grid::from_prizes(config.size, &prizes);
        log::debug!(
            "Generated {:?} grid with {} jackpots and {} small jackpots",
            config.size,
            grid.prize_count(Prize::Jackpot),
            grid.prize_count(Prize::SmallJackpot)
        );
        grid
    }
}
