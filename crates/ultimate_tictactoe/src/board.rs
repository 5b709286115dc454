//! A single 3x3 sub-board.

use crate::phases::Outcome;
use crate::rules;
use crate::{BoardError, BoardId, Coord, Player, Position, Score};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// One 3x3 sub-board of the 9x9 game.
///
/// Cells are stored by local index (row-major, 0-8). The remaining-moves
/// list holds exactly the open cells, in generation order. The search
/// engine walks that list front to back, so its order is the tie-break
/// between equally scored moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    positions: [Position; 9],
    remaining: Vec<Coord>,
}

impl Board {
    /// Creates an empty sub-board with cells generated in row-major order.
    pub fn new(id: BoardId) -> Self {
        Self {
            id,
            positions: std::array::from_fn(|index| Position::new(id.coord_at(index))),
            remaining: id.coords().collect(),
        }
    }

    /// Identifier of this sub-board.
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// All nine cells by local index.
    pub fn positions(&self) -> &[Position; 9] {
        &self.positions
    }

    /// Returns the cell at a global coordinate on this board.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidCoordinate`] outside the 9x9 grid and
    /// [`BoardError::OutsideBoard`] for a cell of another sub-board.
    pub fn position_at(&self, coord: Coord) -> Result<&Position, BoardError> {
        let index = self.local_index(coord)?;
        Ok(&self.positions[index])
    }

    /// Marks `coord` for `player` and drops it from the remaining moves.
    ///
    /// Returns the coordinate that was played. On error the board is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Lookup errors as in [`Board::position_at`], and
    /// [`BoardError::OccupiedCell`] if the cell already holds a mark.
    pub fn apply_move(&mut self, coord: Coord, player: Player) -> Result<Coord, BoardError> {
        let index = self.local_index(coord)?;
        self.positions[index].occupy(player)?;
        if let Some(slot) = self.remaining.iter().position(|open| *open == coord) {
            self.remaining.remove(slot);
        }
        debug_assert_eq!(
            self.remaining.len(),
            self.positions.iter().filter(|p| p.is_open()).count()
        );
        Ok(coord)
    }

    /// Open coordinates in generation order.
    pub fn remaining_moves(&self) -> &[Coord] {
        &self.remaining
    }

    /// Returns true when no open cell remains.
    pub fn is_full(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Returns true if `player` holds a complete line.
    pub fn winner(&self, player: Player) -> bool {
        rules::is_winner(self, player)
    }

    /// Returns true once either player has won or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.winner(Player::X) || self.winner(Player::O) || self.is_full()
    }

    /// `+1` if X has won, `-1` if O has won, otherwise `0`.
    ///
    /// In-progress boards also score `0`.
    pub fn score(&self) -> Score {
        if self.winner(Player::X) {
            1
        } else if self.winner(Player::O) {
            -1
        } else {
            0
        }
    }

    /// The outcome of a terminal board, `None` while play continues.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(player) = rules::check_winner(self) {
            Some(Outcome::Winner(player))
        } else if self.is_full() {
            Some(Outcome::Tie)
        } else {
            None
        }
    }

    /// Clears every cell and restores all nine remaining moves.
    #[instrument(skip(self), fields(board = %self.id))]
    pub fn reset(&mut self) {
        self.positions.iter_mut().for_each(Position::reset);
        self.remaining = self.id.coords().collect();
    }

    /// Formats the board as a bordered text grid.
    pub fn render(&self) -> String {
        let mut result = String::from("-------\n");
        for row in self.positions.chunks(3) {
            result.push('|');
            for position in row {
                result.push_str(&position.occupant().to_string());
                result.push('|');
            }
            result.push('\n');
        }
        result.push_str("-------");
        result
    }

    fn local_index(&self, coord: Coord) -> Result<usize, BoardError> {
        if !coord.in_bounds() {
            warn!(%coord, board = %self.id, "Coordinate outside the grid");
            return Err(BoardError::InvalidCoordinate(coord));
        }
        if !self.id.contains(coord) {
            warn!(%coord, board = %self.id, "Coordinate belongs to another board");
            return Err(BoardError::OutsideBoard {
                coord,
                board: self.id,
            });
        }
        Ok(coord.local_index())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Incremental construction of a [`Board`], one cell at a time.
///
/// Remaining moves follow the order cells are generated in.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    id: BoardId,
    slots: [Option<Position>; 9],
    order: Vec<Coord>,
}

impl BoardBuilder {
    /// Starts an empty builder for a sub-board.
    pub fn new(id: BoardId) -> Self {
        Self {
            id,
            slots: [None; 9],
            order: Vec::with_capacity(9),
        }
    }

    /// Identifier of the board under construction.
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// Generates the cell at `coord`.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicateConstruction`] if the cell already exists,
    /// and the lookup errors of [`Board::position_at`].
    pub fn generate_position(&mut self, coord: Coord) -> Result<&Position, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::InvalidCoordinate(coord));
        }
        if !self.id.contains(coord) {
            return Err(BoardError::OutsideBoard {
                coord,
                board: self.id,
            });
        }
        let slot = &mut self.slots[coord.local_index()];
        if slot.is_some() {
            warn!(%coord, board = %self.id, "Cell generated twice");
            return Err(BoardError::DuplicateConstruction(coord));
        }
        self.order.push(coord);
        Ok(slot.insert(Position::new(coord)))
    }

    /// Finishes the board.
    ///
    /// # Errors
    ///
    /// [`BoardError::IncompleteBoard`] unless all nine cells were generated.
    pub fn build(self) -> Result<Board, BoardError> {
        let mut positions = [Position::new(self.id.origin()); 9];
        for (index, slot) in self.slots.into_iter().enumerate() {
            positions[index] = slot.ok_or(BoardError::IncompleteBoard(self.id))?;
        }
        Ok(Board {
            id: self.id,
            positions,
            remaining: self.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occupant;

    fn top_left() -> Board {
        Board::new(BoardId::new(0, 0))
    }

    #[test]
    fn test_new_board_has_nine_moves_in_row_major_order() {
        let board = Board::new(BoardId::new(1, 2));
        let expected: Vec<Coord> = (3..6)
            .flat_map(|row| (6..9).map(move |col| Coord::new(row, col)))
            .collect();
        assert_eq!(board.remaining_moves(), expected.as_slice());
        assert!(!board.is_full());
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_apply_move_removes_exactly_one() {
        let mut board = top_left();
        let played = board.apply_move(Coord::new(1, 1), Player::X).unwrap();
        assert_eq!(played, Coord::new(1, 1));
        assert_eq!(board.remaining_moves().len(), 8);
        assert!(!board.remaining_moves().contains(&Coord::new(1, 1)));
        assert_eq!(
            board.position_at(Coord::new(1, 1)).unwrap().occupant(),
            Occupant::Occupied(Player::X)
        );
    }

    #[test]
    fn test_apply_move_preserves_order_of_the_rest() {
        let mut board = top_left();
        board.apply_move(Coord::new(0, 1), Player::O).unwrap();
        assert_eq!(board.remaining_moves()[0], Coord::new(0, 0));
        assert_eq!(board.remaining_moves()[1], Coord::new(0, 2));
    }

    #[test]
    fn test_apply_move_to_occupied_cell_changes_nothing() {
        let mut board = top_left();
        board.apply_move(Coord::new(2, 2), Player::X).unwrap();
        let before = board.clone();

        let result = board.apply_move(Coord::new(2, 2), Player::O);
        assert_eq!(result, Err(BoardError::OccupiedCell(Coord::new(2, 2))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_position_at_rejects_foreign_coordinates() {
        let board = top_left();
        assert_eq!(
            board.position_at(Coord::new(3, 0)),
            Err(BoardError::OutsideBoard {
                coord: Coord::new(3, 0),
                board: BoardId::new(0, 0),
            })
        );
        assert_eq!(
            board.position_at(Coord::new(0, 9)),
            Err(BoardError::InvalidCoordinate(Coord::new(0, 9)))
        );
    }

    #[test]
    fn test_top_row_wins_for_x() {
        let mut board = top_left();
        for col in 0..3 {
            board.apply_move(Coord::new(0, col), Player::X).unwrap();
        }
        assert!(board.winner(Player::X));
        assert!(board.is_terminal());
        assert_eq!(board.score(), 1);
        assert_eq!(board.outcome(), Some(Outcome::Winner(Player::X)));
    }

    #[test]
    fn test_score_for_o_win_and_in_progress() {
        let mut board = top_left();
        assert_eq!(board.score(), 0);
        board.apply_move(Coord::new(0, 2), Player::O).unwrap();
        board.apply_move(Coord::new(1, 1), Player::O).unwrap();
        assert_eq!(board.score(), 0);
        assert_eq!(board.outcome(), None);
        board.apply_move(Coord::new(2, 0), Player::O).unwrap();
        assert_eq!(board.score(), -1);
    }

    #[test]
    fn test_full_board_without_line_is_a_tie() {
        // X O X / O X X / O X O
        let mut board = top_left();
        let marks = [
            Player::X,
            Player::O,
            Player::X,
            Player::O,
            Player::X,
            Player::X,
            Player::O,
            Player::X,
            Player::O,
        ];
        for (index, player) in marks.into_iter().enumerate() {
            board.apply_move(board.id().coord_at(index), player).unwrap();
        }
        assert!(board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.score(), 0);
        assert!(board.outcome().is_some_and(|outcome| outcome.is_tie()));
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        // X X X / O O X / X O O
        let mut board = top_left();
        let marks = [
            Player::X,
            Player::X,
            Player::X,
            Player::O,
            Player::O,
            Player::X,
            Player::X,
            Player::O,
            Player::O,
        ];
        for (index, player) in marks.into_iter().enumerate() {
            board.apply_move(board.id().coord_at(index), player).unwrap();
        }
        assert!(board.is_full());
        let outcome = board.outcome().unwrap();
        assert!(!outcome.is_tie());
        assert_eq!(outcome.winner(), Some(Player::X));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = top_left();
        let mut copy = board.clone();
        copy.apply_move(Coord::new(0, 0), Player::X).unwrap();
        assert!(board.position_at(Coord::new(0, 0)).unwrap().is_open());
        assert_eq!(board.remaining_moves().len(), 9);
        assert_eq!(copy.remaining_moves().len(), 8);
    }

    #[test]
    fn test_reset_restores_all_moves() {
        let mut board = top_left();
        board.apply_move(Coord::new(0, 0), Player::X).unwrap();
        board.apply_move(Coord::new(2, 1), Player::O).unwrap();
        board.reset();
        assert_eq!(board, top_left());
    }

    #[test]
    fn test_render() {
        let mut board = top_left();
        board.apply_move(Coord::new(0, 0), Player::X).unwrap();
        board.apply_move(Coord::new(1, 2), Player::O).unwrap();
        assert_eq!(board.render(), "-------\n|X|.|.|\n|.|.|O|\n|.|.|.|\n-------");
        assert_eq!(board.to_string(), board.render());
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let id = BoardId::new(2, 2);
        let mut builder = BoardBuilder::new(id);
        assert!(builder.generate_position(Coord::new(6, 6)).is_ok());
        assert_eq!(
            builder.generate_position(Coord::new(6, 6)).map(|p| p.coordinates()),
            Err(BoardError::DuplicateConstruction(Coord::new(6, 6)))
        );
    }

    #[test]
    fn test_builder_rejects_incomplete_board() {
        let id = BoardId::new(0, 1);
        let mut builder = BoardBuilder::new(id);
        builder.generate_position(Coord::new(0, 3)).unwrap();
        assert_eq!(builder.build(), Err(BoardError::IncompleteBoard(id)));
    }

    #[test]
    fn test_builder_matches_new() {
        let id = BoardId::new(1, 0);
        let mut builder = BoardBuilder::new(id);
        for coord in id.coords() {
            builder.generate_position(coord).unwrap();
        }
        assert_eq!(builder.build().unwrap(), Board::new(id));
    }
}
