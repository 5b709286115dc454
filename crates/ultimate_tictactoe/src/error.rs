//! Board error types.

use crate::{BoardId, Coord};
use derive_more::{Display, Error};

/// Error raised by a board lookup, move or construction.
///
/// None of these are fatal. Drivers log them and continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The coordinate lies outside the 9x9 grid.
    #[display("Coordinate {_0} is outside the 9x9 grid")]
    InvalidCoordinate(#[error(not(source))] Coord),

    /// The coordinate belongs to a different sub-board.
    #[display("Coordinate {coord} is not on board {board}")]
    OutsideBoard {
        /// The requested coordinate.
        coord: Coord,
        /// The board that was asked.
        board: BoardId,
    },

    /// The cell already holds a mark.
    #[display("Cell {_0} is already occupied")]
    OccupiedCell(#[error(not(source))] Coord),

    /// A cell was generated twice while building the index.
    #[display("Cell {_0} was already generated")]
    DuplicateConstruction(#[error(not(source))] Coord),

    /// A board was finished with cells still missing.
    #[display("Board {_0} is missing cells")]
    IncompleteBoard(#[error(not(source))] BoardId),
}
