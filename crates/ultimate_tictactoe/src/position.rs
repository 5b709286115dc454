//! A single cell of a sub-board.

use crate::{BoardError, Coord, Occupant, Player};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One cell of a 3x3 sub-board.
///
/// The occupant only ever moves from `Empty` to a player. The single
/// way back is [`Position::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    coord: Coord,
    occupant: Occupant,
}

impl Position {
    /// Creates an empty cell at a global coordinate.
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            occupant: Occupant::Empty,
        }
    }

    /// Marks the cell for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OccupiedCell`] and leaves the cell untouched
    /// if it already holds a mark.
    pub fn occupy(&mut self, player: Player) -> Result<(), BoardError> {
        if !self.is_open() {
            warn!(coord = %self.coord, occupant = %self.occupant, %player, "Cell already occupied");
            return Err(BoardError::OccupiedCell(self.coord));
        }
        self.occupant = Occupant::Occupied(player);
        Ok(())
    }

    /// Returns true if nobody has played here.
    pub fn is_open(&self) -> bool {
        self.occupant == Occupant::Empty
    }

    /// The global coordinate of this cell.
    pub fn coordinates(&self) -> Coord {
        self.coord
    }

    /// Who holds this cell.
    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    /// Returns true if `player` holds this cell.
    pub fn is_held_by(&self, player: Player) -> bool {
        self.occupant == Occupant::Occupied(player)
    }

    /// Clears the cell.
    pub(crate) fn reset(&mut self) {
        self.occupant = Occupant::Empty;
    }
}
