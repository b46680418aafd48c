use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    #[default]
    Undefined,
    Win,
    Loose,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Loose)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::Win => "WIN",
            Self::Loose => "LOOSE",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single game: its board plus the bookkeeping the store persists.
///
/// Moves go through [`Game::reveal`] and [`Game::toggle_flag`]; once the status is terminal
/// every further move is rejected and the grid stays as it was.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) start_time: DateTime<Utc>,
    pub(crate) finish_time: Option<DateTime<Utc>>,
    pub(crate) rows: Coord,
    pub(crate) cols: Coord,
    pub(crate) mines: CellCount,
    pub(crate) cells_revealed: CellCount,
    pub(crate) status: GameStatus,
    pub(crate) grid: Grid,
}

impl Game {
    /// New unsaved game (id 0) over an already generated grid.
    pub fn new(grid: Grid, start_time: DateTime<Utc>) -> Self {
        let (rows, cols) = grid.size();
        Self {
            id: 0,
            start_time,
            finish_time: None,
            rows,
            cols,
            mines: grid.mine_count(),
            cells_revealed: 0,
            status: GameStatus::Undefined,
            grid,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: GameId) {
        self.id = id;
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn finish_time(&self) -> Option<DateTime<Utc>> {
        self.finish_time
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn cols(&self) -> Coord {
        self.cols
    }

    pub fn mines(&self) -> CellCount {
        self.mines
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.cells_revealed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }

    /// Mines minus placed flags; negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        let flags = self.grid.cells().iter().filter(|cell| cell.flagged).count();
        i64::from(self.mines) - flags as i64
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "game {} [{}] {}x{} mines left: {}",
            self.id,
            self.status,
            self.rows,
            self.cols,
            self.mines_left()
        )?;

        write!(f, "    ")?;
        for col in 0..self.cols {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for (row, cells) in self.grid.iter_rows().enumerate() {
            write!(f, "{:>3} ", row)?;
            for cell in cells {
                write!(f, "{:>3}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
