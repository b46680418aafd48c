use crate::*;
pub use random::*;
pub use shuffle::*;

mod random;
mod shuffle;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Grid;
}

/// Generates a grid for `config` with a fresh seed, so placement differs between games.
///
/// Rejection sampling stays cheap while at most half of the board is mined; denser boards use the
/// shuffle strategy, which places every mine in a single pass.
pub fn generate(config: GameConfig) -> Grid {
    let seed = rand::random();
    generate_seeded(config, seed)
}

/// Same strategy choice as [`generate`], with a caller-provided seed.
pub fn generate_seeded(config: GameConfig, seed: u64) -> Grid {
    if config.mines.saturating_mul(2) <= config.total_cells() {
        RandomMinefieldGenerator::new(seed).generate(config)
    } else {
        ShuffleMinefieldGenerator::new(seed).generate(config)
    }
}
