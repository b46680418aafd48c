use rand::prelude::*;

use super::*;

/// Partial Fisher-Yates shuffle over all cell indices; the first `mines` indices become mines.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleMinefieldGenerator {
    seed: u64,
}

impl ShuffleMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for ShuffleMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        let mut grid = Grid::empty(config.size());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let total = config.total_cells();
        let mines = config.mines.min(total);
        if mines < config.mines {
            log::warn!(
                "Grid already full, requested {} mines but only fits {}",
                config.mines,
                total
            );
        }

        let mut indices: Vec<CellCount> = (0..total).collect();
        let cols = CellCount::from(config.cols);
        for i in 0..mines {
            let j = rng.random_range(i..total);
            indices.swap(i as usize, j as usize);

            let index = indices[i as usize];
            // both parts are bounded by the config dimensions
            let coords = ((index / cols) as Coord, (index % cols) as Coord);
            grid.place_mine(coords);
        }
        grid.count_adjacent_mines();

        grid
    }
}
