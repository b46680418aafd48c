use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::*;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

/// Runs games against a [`GameStore`]: generation on start, then validate, mutate, persist on
/// every move. A rejected move never reaches the store.
#[derive(Debug, Default)]
pub struct GameService<S> {
    store: S,
    seed: Option<u64>,
    /// Games generated so far; offsets the seed so each game gets its own layout.
    generated: AtomicU64,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            seed: None,
            generated: AtomicU64::new(0),
        }
    }

    /// Every grid this service generates derives from `seed`, so a session can be replayed.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self {
            store,
            seed: Some(seed),
            generated: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn start_game(&self, config: GameConfig) -> ServiceResult<Game> {
        let start_time = Utc::now();
        let grid = match self.seed {
            Some(seed) => {
                let index = self.generated.fetch_add(1, Ordering::Relaxed);
                generate_seeded(config, seed.wrapping_add(index))
            }
            None => generate(config),
        };

        let mut game = Game::new(grid, start_time);
        self.store.upsert(&mut game)?;

        log::info!(
            "game {} started: {}x{} with {} mines",
            game.id(),
            config.rows,
            config.cols,
            config.mines
        );
        Ok(game)
    }

    pub fn get_game(&self, id: GameId) -> ServiceResult<Game> {
        Ok(self.store.find_by_id(id)?)
    }

    pub fn list_games(&self) -> ServiceResult<Vec<Game>> {
        Ok(self.store.find_all()?)
    }

    pub fn reveal_cell(&self, id: GameId, row: i64, col: i64) -> ServiceResult<Game> {
        log::debug!("game {id}: reveal ({row}, {col})");
        self.store
            .update(id, |game| {
                let outcome = game.reveal(row, col)?;
                log::debug!("game {id}: {outcome:?}");
                Ok(game.clone())
            })
            .inspect_err(|err| log::warn!("game {id}: reveal ({row}, {col}) rejected: {err}"))
    }

    pub fn flag_cell(&self, id: GameId, row: i64, col: i64) -> ServiceResult<Game> {
        log::debug!("game {id}: flag ({row}, {col})");
        self.store
            .update(id, |game| {
                game.toggle_flag(row, col)?;
                Ok(game.clone())
            })
            .inspect_err(|err| log::warn!("game {id}: flag ({row}, {col}) rejected: {err}"))
    }
}
