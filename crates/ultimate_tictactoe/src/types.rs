//! Core domain types for ultimate tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Score assigned to a board by the evaluator.
///
/// Terminal boards score exactly `-1`, `0` or `+1`.
pub type Score = i32;

/// Upper search bound, larger than any reachable score.
pub const INFINITY: Score = Score::MAX;

/// Lower search bound, smaller than any reachable score.
pub const NEG_INFINITY: Score = Score::MIN;

/// Width of a sub-board, and of the grid of sub-boards.
pub const SIDE: usize = 3;

/// Width of the global grid.
pub const GLOBAL_SIDE: usize = SIDE * SIDE;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X, the maximizer.
    X,
    /// Player O, the minimizer.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Maps the search's maximizing flag to a player.
    pub fn from_maximizing(maximizing: bool) -> Self {
        if maximizing { Player::X } else { Player::O }
    }

    /// Returns true for the player whose score the search maximizes.
    pub fn is_maximizing(self) -> bool {
        self == Player::X
    }
}

/// The occupant of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Occupant {
    /// Nobody has played here.
    #[default]
    #[display(".")]
    Empty,
    /// Cell occupied by a player.
    #[display("{_0}")]
    Occupied(Player),
}

/// A coordinate pair in the global 9x9 grid.
///
/// Constructing a `Coord` never fails; out-of-range pairs are rejected
/// when they are resolved against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("[{row}, {col}]")]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Creates a coordinate pair.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row in global space.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column in global space.
    pub fn col(self) -> usize {
        self.col
    }

    /// Returns true if the pair lies inside the global grid.
    pub fn in_bounds(self) -> bool {
        self.row < GLOBAL_SIDE && self.col < GLOBAL_SIDE
    }

    /// The sub-board this coordinate belongs to, if it is in bounds.
    pub fn board_id(self) -> Option<BoardId> {
        self.in_bounds()
            .then(|| BoardId::new(self.row / SIDE, self.col / SIDE))
    }

    /// Index of this coordinate within its sub-board (0-8, row-major).
    pub fn local_index(self) -> usize {
        (self.row % SIDE) * SIDE + self.col % SIDE
    }
}

/// Identifier of one of the nine sub-boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("{row}{col}")]
pub struct BoardId {
    row: usize,
    col: usize,
}

impl BoardId {
    /// Creates a sub-board identifier.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row of the sub-board in the 3x3 grid of boards.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column of the sub-board in the 3x3 grid of boards.
    pub fn col(self) -> usize {
        self.col
    }

    /// Global coordinate of the top-left cell.
    pub fn origin(self) -> Coord {
        Coord::new(self.row * SIDE, self.col * SIDE)
    }

    /// Global coordinate of the cell at a local index (0-8).
    pub fn coord_at(self, local_index: usize) -> Coord {
        let origin = self.origin();
        Coord::new(
            origin.row() + local_index / SIDE,
            origin.col() + local_index % SIDE,
        )
    }

    /// The nine global coordinates of this sub-board in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..SIDE * SIDE).map(move |index| self.coord_at(index))
    }

    /// Returns true if the coordinate falls inside this sub-board.
    pub fn contains(self, coord: Coord) -> bool {
        coord.board_id() == Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_maximizing_roundtrip() {
        assert_eq!(Player::from_maximizing(true), Player::X);
        assert_eq!(Player::from_maximizing(false), Player::O);
        assert!(Player::X.is_maximizing());
        assert!(!Player::O.is_maximizing());
        assert_eq!(Player::X.opponent(), Player::O);
    }

    #[test]
    fn test_player_parses_case_insensitive() {
        assert_eq!("x".parse::<Player>().unwrap(), Player::X);
        assert_eq!("O".parse::<Player>().unwrap(), Player::O);
        assert!("z".parse::<Player>().is_err());
    }

    #[test]
    fn test_coord_projection() {
        let coord = Coord::new(4, 7);
        assert_eq!(coord.board_id(), Some(BoardId::new(1, 2)));
        assert_eq!(coord.local_index(), 4);
        assert_eq!(Coord::new(9, 0).board_id(), None);
    }

    #[test]
    fn test_board_coords_row_major() {
        let coords: Vec<Coord> = BoardId::new(2, 1).coords().collect();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], Coord::new(6, 3));
        assert_eq!(coords[1], Coord::new(6, 4));
        assert_eq!(coords[3], Coord::new(7, 3));
        assert_eq!(coords[8], Coord::new(8, 5));
    }

    #[test]
    fn test_occupant_display() {
        assert_eq!(Occupant::Empty.to_string(), ".");
        assert_eq!(Occupant::Occupied(Player::O).to_string(), "O");
    }
}
