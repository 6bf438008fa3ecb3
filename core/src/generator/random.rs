use super::*;

/// Uniformly random placement without replacement, reproducible from a seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, options: GameOptions) -> MineLayout {
        use rand::rngs::SmallRng;
        use rand::seq::index;
        use rand::SeedableRng;

        let total_cells = usize::from(options.total_cells());
        let requested = usize::from(options.mines);
        if requested > total_cells {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                requested,
                total_cells
            );
        }
        let amount = requested.min(total_cells);

        let cols = usize::from(options.width);
        let mut mine_mask: Array2<bool> = Array2::default(options.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        // every draw comes from the cells that are still free, so this always finishes
        for place in index::sample(&mut rng, total_cells, amount) {
            mine_mask[[place / cols, place % cols]] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Generated {} mines on a {}x{} board from seed {}",
            layout.mine_count(),
            options.width,
            options.height,
            self.seed
        );
        layout
    }
}
