use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::*;

/// Keyed storage for game snapshots.
///
/// Reads hand out owned copies; callers mutate their copy and write it back with
/// [`GameStore::upsert`]. Implementations must make [`GameStore::update`] atomic per id if games
/// can be moved on from several threads.
pub trait GameStore {
    fn find_all(&self) -> Result<Vec<Game>, StoreError>;

    fn find_by_id(&self, id: GameId) -> Result<Game, StoreError>;

    /// Stores `game`, assigning a fresh id first when its id is 0.
    fn upsert(&self, game: &mut Game) -> Result<(), StoreError>;

    /// Fetches game `id`, applies `f` to a copy and persists the copy only when `f` succeeds.
    fn update<R, E, F>(&self, id: GameId, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Game) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut game = self.find_by_id(id)?;
        let result = f(&mut game)?;
        self.upsert(&mut game)?;
        Ok(result)
    }
}

#[derive(Debug, Default)]
struct Games {
    by_id: BTreeMap<GameId, Game>,
    last_id: GameId,
}

impl Games {
    fn insert(&mut self, game: &mut Game) {
        if game.id() == 0 {
            self.last_id += 1;
            game.set_id(self.last_id);
        } else {
            self.last_id = self.last_id.max(game.id());
        }
        self.by_id.insert(game.id(), game.clone());
    }
}

/// Process-local store; a single mutex guards the whole map.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: Mutex<Games>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Games>, StoreError> {
        self.games.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl GameStore for MemoryGameStore {
    fn find_all(&self) -> Result<Vec<Game>, StoreError> {
        Ok(self.lock()?.by_id.values().cloned().collect())
    }

    fn find_by_id(&self, id: GameId) -> Result<Game, StoreError> {
        self.lock()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn upsert(&self, game: &mut Game) -> Result<(), StoreError> {
        self.lock()?.insert(game);
        Ok(())
    }

    fn update<R, E, F>(&self, id: GameId, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Game) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut games = self.lock()?;
        let mut game = games.by_id.get(&id).cloned().ok_or(StoreError::NotFound(id))?;
        let result = f(&mut game)?;
        games.insert(&mut game);
        Ok(result)
    }
}
