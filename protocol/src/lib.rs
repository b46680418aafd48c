//! JSON-facing shapes for adapters that sit in front of [`sweeper_core::GameService`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sweeper_core::{
    Cell, CellCount, Coord, Game, GameConfig, GameError, GameId, GameStatus, ServiceError,
    StoreError,
};

/// Largest row or col count accepted from the outside.
pub const MAX_SIDE: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub cols: u32,
    #[serde(default)]
    pub mines: u32,
}

impl StartGameRequest {
    /// Checks every field and reports all violations at once, in field order.
    pub fn validate(&self) -> Result<GameConfig, ApiError> {
        let mut problems = Vec::new();

        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 {
                problems.push(format!("{name}: cannot be blank"));
            } else if value > MAX_SIDE {
                problems.push(format!("{name}: must be no greater than {MAX_SIDE}"));
            }
        }

        let max_mines = i64::from(self.rows) * i64::from(self.cols) - 1;
        if self.mines == 0 {
            problems.push("mines: cannot be blank".to_string());
        } else if i64::from(self.mines) > max_mines {
            problems.push(format!("mines: must be no greater than {max_mines}"));
        }

        if !problems.is_empty() {
            return Err(ApiError::bad_request(format!("{}.", problems.join("; "))));
        }

        // both sides are within MAX_SIDE here
        GameConfig::new(self.rows as Coord, self.cols as Coord, self.mines as CellCount)
            .map_err(ApiError::from)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: i64,
    pub col: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub mines_around: u8,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        Self {
            mine: cell.mine,
            revealed: cell.revealed,
            flagged: cell.flagged,
            mines_around: cell.mines_around,
        }
    }
}

/// Externally visible game. `grid` is left out of summaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub cells_revealed: CellCount,
    pub game_status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<CellView>>>,
}

impl GameView {
    pub fn from_game(game: &Game) -> Self {
        let grid = game
            .grid()
            .iter_rows()
            .map(|row| row.iter().copied().map(CellView::from).collect())
            .collect();
        Self {
            grid: Some(grid),
            ..Self::summary(game)
        }
    }

    pub fn summary(game: &Game) -> Self {
        Self {
            id: game.id(),
            start_time: game.start_time(),
            finish_time: game.finish_time(),
            rows: game.rows(),
            cols: game.cols(),
            mines: game.mines(),
            cells_revealed: game.cells_revealed(),
            game_status: game.status(),
            grid: None,
        }
    }
}

/// Error body with an HTTP-style status code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL: u16 = 500;

    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, Self::BAD_REQUEST)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for ApiError {}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound(_) => Self::NOT_FOUND,
            StoreError::Poisoned => Self::INTERNAL,
        };
        Self::new(err.to_string(), status)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Game(err) => err.into(),
            ServiceError::Store(err) => err.into(),
        }
    }
}
