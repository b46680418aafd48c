use rand::prelude::*;

use super::*;

/// Picks uniformly random positions and retries on collision until every mine is placed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        let mut grid = Grid::empty(config.size());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut attempts: u64 = 0;
        while grid.mine_count() < config.mines {
            let coords = (
                rng.random_range(0..config.rows),
                rng.random_range(0..config.cols),
            );
            grid.place_mine(coords);
            attempts += 1;
        }
        grid.count_adjacent_mines();

        log::debug!(
            "placed {} mines on {}x{} in {} attempts",
            config.mines,
            config.rows,
            config.cols,
            attempts
        );
        grid
    }
}
