//! Win detection for a sub-board.

use crate::{Board, Player};

/// The eight winning lines as local indices (row-major, 0-8).
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [6, 4, 2],
];

/// Returns true if `player` holds all three cells of any line.
pub fn is_winner(board: &Board, player: Player) -> bool {
    let positions = board.positions();
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&index| positions[index].is_held_by(player)))
}

/// Returns the player holding a complete line, checking X first.
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| is_winner(board, player))
}
