use thiserror::Error;

use crate::GameId;

/// A move or configuration was rejected. No game state is changed when one is returned.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game already finished")]
    AlreadyFinished,
    #[error("row out of bounds")]
    RowOutOfBounds,
    #[error("col out of bounds")]
    ColOutOfBounds,
    #[error("cell already revealed")]
    AlreadyRevealed,
    #[error("cannot reveal a flagged cell")]
    FlaggedCell,
    #[error("grid must have at least one row and one col")]
    InvalidSize,
    #[error("mines must be between 1 and {max}")]
    InvalidMineCount { max: u32 },
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(GameId),
    #[error("game store lock poisoned")]
    Poisoned,
}

/// Anything the orchestrator can fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound(_)))
    }
}
