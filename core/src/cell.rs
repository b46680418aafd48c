use serde::{Deserialize, Serialize};

/// One square of the grid. `mines_around` is only read for non-mine cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub mines_around: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.revealed
    }

    /// Hidden, unflagged and safe to open by the flood-fill.
    pub(crate) const fn is_open_candidate(self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Character shown to the player for this cell.
    pub const fn symbol(self) -> char {
        match (self.revealed, self.flagged, self.mine) {
            (false, true, _) => 'F',
            (false, false, _) => '.',
            (true, _, true) => '*',
            (true, _, false) if self.mines_around == 0 => ' ',
            (true, _, false) => (b'0' + self.mines_around) as char,
        }
    }
}
