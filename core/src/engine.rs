use chrono::{DateTime, Utc};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Safe cell opened; carries how many cells this move revealed, flood-fill included.
    Revealed(CellCount),
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Flagged,
    Unflagged,
}

impl Game {
    /// Checks a move without touching the game, in this order: finished game, row, col, revealed.
    pub fn validate(&self, row: i64, col: i64) -> Result<Coord2> {
        if self.status.is_finished() {
            return Err(GameError::AlreadyFinished);
        }

        let row = Coord::try_from(row)
            .ok()
            .filter(|&row| row < self.rows)
            .ok_or(GameError::RowOutOfBounds)?;
        let col = Coord::try_from(col)
            .ok()
            .filter(|&col| col < self.cols)
            .ok_or(GameError::ColOutOfBounds)?;

        if self.grid[(row, col)].revealed {
            return Err(GameError::AlreadyRevealed);
        }

        Ok((row, col))
    }

    pub fn reveal(&mut self, row: i64, col: i64) -> Result<RevealOutcome> {
        self.reveal_at(row, col, Utc::now())
    }

    /// Reveal with an explicit clock reading, used as the finish time on a terminal move.
    pub fn reveal_at(&mut self, row: i64, col: i64, now: DateTime<Utc>) -> Result<RevealOutcome> {
        let coords = self.validate(row, col)?;
        if self.grid[coords].flagged {
            return Err(GameError::FlaggedCell);
        }

        let before = self.cells_revealed;
        self.open_cell(coords);

        if self.grid[coords].mine {
            self.finish(GameStatus::Loose, now);
            return Ok(RevealOutcome::HitMine);
        }

        if self.grid[coords].mines_around == 0 {
            self.flood_fill(coords);
        }

        if self.cells_revealed == self.grid.safe_cell_count() {
            self.finish(GameStatus::Win, now);
            return Ok(RevealOutcome::Won);
        }

        Ok(RevealOutcome::Revealed(self.cells_revealed - before))
    }

    pub fn toggle_flag(&mut self, row: i64, col: i64) -> Result<MarkOutcome> {
        let coords = self.validate(row, col)?;
        let cell = &mut self.grid[coords];
        cell.flagged = !cell.flagged;

        Ok(if cell.flagged {
            MarkOutcome::Flagged
        } else {
            MarkOutcome::Unflagged
        })
    }

    fn open_cell(&mut self, coords: Coord2) {
        self.grid[coords].revealed = true;
        self.cells_revealed += 1;
    }

    /// Opens the zero region around `start` and its nonzero border. `start` must already be
    /// revealed. Only hidden, unflagged cells are pushed, and a cell is revealed as soon as it is
    /// pushed, so each one enters the worklist at most once.
    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            for pos in self.grid.iter_neighbors(coords) {
                if !self.grid[pos].is_open_candidate() {
                    continue;
                }
                self.open_cell(pos);
                if self.grid[pos].mines_around == 0 {
                    to_visit.push(pos);
                }
            }
        }
    }

    fn finish(&mut self, status: GameStatus, now: DateTime<Utc>) {
        if self.status.is_finished() {
            return;
        }
        self.status = status;
        self.finish_time = Some(now);
        log::info!("game {} finished: {}", self.id, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> Game {
        Game::new(Grid::from_mine_coords(size, mines).unwrap(), Utc::now())
    }

    fn revealed(game: &Game) -> Vec<Coord2> {
        let mut cells = Vec::new();
        for row in 0..game.rows() {
            for col in 0..game.cols() {
                if game.cell_at((row, col)).revealed {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn validate_checks_in_order() {
        let mut game = game((1, 3), &[(0, 2)]);

        assert_eq!(game.validate(10, 10), Err(GameError::RowOutOfBounds));
        assert_eq!(game.validate(-1, 0), Err(GameError::RowOutOfBounds));
        assert_eq!(game.validate(0, 3), Err(GameError::ColOutOfBounds));
        assert_eq!(game.validate(0, -2), Err(GameError::ColOutOfBounds));
        assert_eq!(game.validate(0, 1), Ok((0, 1)));

        game.reveal(0, 1).unwrap();
        assert_eq!(game.validate(0, 1), Err(GameError::AlreadyRevealed));

        game.status = GameStatus::Win;
        assert_eq!(game.validate(10, 1), Err(GameError::AlreadyFinished));
    }

    #[test]
    fn reveal_out_of_bounds_leaves_grid_unchanged() {
        let mut game = game((1, 3), &[(0, 2)]);
        let before = game.clone();

        assert_eq!(game.reveal(10, 0), Err(GameError::RowOutOfBounds));
        assert_eq!(game, before);
    }

    #[test]
    fn reveal_mine_loses_with_flag_elsewhere() {
        let mut game = game((1, 3), &[(0, 2)]);
        game.toggle_flag(0, 0).unwrap();

        let outcome = game.reveal(0, 2).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Loose);
        assert!(game.finish_time().is_some());
        assert_eq!(game.cells_revealed(), 1);
        assert_eq!(revealed(&game), vec![(0, 2)]);
    }

    #[test]
    fn mine_without_mined_neighbors_never_floods() {
        let mut game = game((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal(0, 0).unwrap(), RevealOutcome::HitMine);
        assert_eq!(revealed(&game), vec![(0, 0)]);
    }

    #[test]
    fn reveal_last_safe_cell_wins() {
        let mut game = game((1, 3), &[(0, 0)]);
        assert_eq!(game.cell_at((0, 1)).mines_around, 1);
        assert_eq!(game.cell_at((0, 2)).mines_around, 0);

        assert_eq!(game.reveal(0, 1).unwrap(), RevealOutcome::Revealed(1));
        let outcome = game.reveal(0, 2).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.cells_revealed(), 2);
        assert_eq!(game.status(), GameStatus::Win);
        assert!(game.finish_time().is_some());
    }

    #[test]
    fn reveal_zero_cell_wins_through_flood_fill() {
        let mut game = game((1, 3), &[(0, 0)]);

        assert_eq!(game.reveal(0, 2).unwrap(), RevealOutcome::Won);
        assert_eq!(revealed(&game), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn flood_fill_opens_zero_region_and_border() {
        let mut game = game((3, 3), &[(1, 2)]);

        let outcome = game.reveal(1, 0).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(6));
        assert_eq!(game.status(), GameStatus::Undefined);
        assert_eq!(
            revealed(&game),
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
        assert!(!game.cell_at((1, 2)).revealed);
        assert_eq!(game.cells_revealed(), 6);
    }

    #[test]
    fn flood_fill_stops_at_nonzero_border() {
        // column 2 is a wall of mines, column 1 the numbered border
        let mut game = game((5, 5), &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);

        game.reveal(2, 0).unwrap();

        let opened = revealed(&game);
        assert_eq!(opened.len(), 10);
        assert!(opened.iter().all(|&(_, col)| col < 2));
        assert_eq!(game.cells_revealed(), 10);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut game = game((3, 3), &[(2, 2)]);
        game.toggle_flag(0, 2).unwrap();

        game.reveal(0, 0).unwrap();

        let cell = game.cell_at((0, 2));
        assert!(cell.flagged && !cell.revealed);
        assert_eq!(game.status(), GameStatus::Undefined);
        assert_eq!(game.cells_revealed(), 7);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut game = game((2, 2), &[(0, 0)]);
        game.toggle_flag(1, 1).unwrap();
        let before = game.clone();

        assert_eq!(game.reveal(1, 1), Err(GameError::FlaggedCell));
        assert_eq!(game, before);
    }

    #[test]
    fn flag_toggles_without_side_effects() {
        let mut game = game((2, 2), &[(0, 0)]);
        game.reveal(1, 1).unwrap();
        let before = game.clone();

        assert_eq!(game.toggle_flag(0, 0).unwrap(), MarkOutcome::Flagged);
        assert!(game.cell_at((0, 0)).flagged);
        assert_eq!(game.cells_revealed(), before.cells_revealed());
        assert_eq!(game.status(), GameStatus::Undefined);
        assert_eq!(game.mines_left(), 0);

        assert_eq!(game.toggle_flag(0, 0).unwrap(), MarkOutcome::Unflagged);
        assert_eq!(game, before);
    }

    #[test]
    fn flag_rejects_revealed_cell() {
        let mut game = game((2, 2), &[(0, 0)]);
        game.reveal(1, 1).unwrap();

        assert_eq!(game.toggle_flag(1, 1), Err(GameError::AlreadyRevealed));
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut game = game((1, 3), &[(0, 2)]);
        game.reveal(0, 2).unwrap();
        let finished = game.clone();

        assert_eq!(game.reveal(0, 0), Err(GameError::AlreadyFinished));
        assert_eq!(game.toggle_flag(0, 0), Err(GameError::AlreadyFinished));
        assert_eq!(game, finished);
    }

    #[test]
    fn cells_revealed_is_monotonic_and_bounded() {
        let config = GameConfig::new(12, 12, 20).unwrap();
        for seed in 0..10 {
            let mut game = Game::new(generate_seeded(config, seed), Utc::now());
            let mut last = 0;

            'moves: for row in 0..12 {
                for col in 0..12 {
                    match game.reveal(row, col) {
                        Ok(outcome) => {
                            assert!(game.cells_revealed() >= last);
                            assert!(game.cells_revealed() <= config.total_cells());
                            assert_eq!(game.cells_revealed() as usize, revealed(&game).len());
                            last = game.cells_revealed();
                            if outcome.is_terminal() {
                                break 'moves;
                            }
                        }
                        Err(err) => assert_eq!(err, GameError::AlreadyRevealed),
                    }
                }
            }
        }
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let config = GameConfig::new(6, 7, 9).unwrap();
        let mut game = Game::new(generate_seeded(config, 11), Utc::now());

        for row in 0..6u16 {
            for col in 0..7u16 {
                if game.cell_at((row, col)).mine || game.cell_at((row, col)).revealed {
                    continue;
                }
                game.reveal(row.into(), col.into()).unwrap();
            }
        }

        assert_eq!(game.status(), GameStatus::Win);
        assert_eq!(game.cells_revealed(), 42 - 9);
    }
}
