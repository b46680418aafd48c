use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use service::*;
pub use store::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod game;
mod generator;
mod service;
mod store;
mod types;

/// Requested board shape. Only [`GameConfig::new`] checks the bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// At least one row and col, at least one mine, and at least one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }
        let max = mult(rows, cols) - 1;
        if mines == 0 || mines > max {
            return Err(GameError::InvalidMineCount { max });
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

/// Rectangular matrix of cells owned by a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// All cells hidden, unflagged and without mines.
    pub fn empty((rows, cols): Coord2) -> Self {
        Self {
            cells: Array2::default((usize::from(rows), usize::from(cols))),
            mine_count: 0,
        }
    }

    /// Builds a grid with mines at exactly `mine_coords` and fills in the adjacency counts.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut grid = Self::empty(size);
        for &coords in mine_coords {
            if coords.0 >= size.0 {
                return Err(GameError::RowOutOfBounds);
            }
            if coords.1 >= size.1 {
                return Err(GameError::ColOutOfBounds);
            }
            grid.place_mine(coords);
        }
        grid.count_adjacent_mines();

        Ok(grid)
    }

    /// Marks `coords` as a mine, returning `false` when it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self[coords];
        if cell.mine {
            return false;
        }
        cell.mine = true;
        self.mine_count += 1;
        true
    }

    /// Adds one to every in-bounds neighbour of every mine.
    pub(crate) fn count_adjacent_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if !self[(row, col)].mine {
                    continue;
                }
                for pos in self.iter_neighbors((row, col)) {
                    self[pos].mines_around += 1;
                }
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Mines actually present around `coords`, computed from the mine flags.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self.iter_neighbors(coords).filter(|&pos| self[pos].mine).count();
        // at most eight neighbours
        count as u8
    }

    /// Cells row by row, for rendering and serialization.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let cols = usize::from(self.cols()).max(1);
        self.cells.as_slice().unwrap_or(&[]).chunks(cols)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(GameConfig::new(0, 3, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(3, 0, 1), Err(GameError::InvalidSize));
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert_eq!(
            GameConfig::new(2, 2, 4),
            Err(GameError::InvalidMineCount { max: 3 })
        );
        assert_eq!(
            GameConfig::new(2, 2, 0),
            Err(GameError::InvalidMineCount { max: 3 })
        );
        assert_eq!(GameConfig::new(2, 2, 3).unwrap().total_cells(), 4);
    }

    #[test]
    fn config_mine_count_message_covers_both_bounds() {
        let err = GameConfig::new(3, 3, 0).unwrap_err();
        assert_eq!(err, GameError::InvalidMineCount { max: 8 });
        assert_eq!(err.to_string(), "mines must be between 1 and 8");
        assert_eq!(GameConfig::new(3, 3, 9).unwrap_err(), err);
    }

    #[test]
    fn from_mine_coords_counts_neighbors() {
        let grid = Grid::from_mine_coords((3, 3), &[(1, 2)]).unwrap();

        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid.safe_cell_count(), 8);
        assert_eq!(grid[(0, 0)].mines_around, 0);
        assert_eq!(grid[(0, 1)].mines_around, 1);
        assert_eq!(grid[(2, 1)].mines_around, 1);
        assert_eq!(grid[(1, 0)].mines_around, 0);
        assert!(grid[(1, 2)].mine);
    }

    #[test]
    fn from_mine_coords_ignores_duplicates() {
        let grid = Grid::from_mine_coords((1, 3), &[(0, 0), (0, 0)]).unwrap();
        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid[(0, 1)].mines_around, 1);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Grid::from_mine_coords((1, 3), &[(1, 0)]),
            Err(GameError::RowOutOfBounds)
        );
        assert_eq!(
            Grid::from_mine_coords((1, 3), &[(0, 3)]),
            Err(GameError::ColOutOfBounds)
        );
    }

    #[test]
    fn iter_rows_follows_layout() {
        let grid = Grid::from_mine_coords((2, 3), &[(1, 1)]).unwrap();
        let rows: Vec<_> = grid.iter_rows().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert!(rows[1][1].mine);
    }
}
