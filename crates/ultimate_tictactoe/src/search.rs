//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The search never touches the caller's board. Each branch plays its
//! move on a clone, and the clone is dropped when the branch returns.
//!
//! Moves are tried in [`Board::remaining_moves`] order and `best_move`
//! is only replaced on a strict improvement, so among equally scored
//! moves the first one in that order wins.
//!
//! Leaves are scored with [`Board::score`]: a won board is `±1` and
//! anything else, including an unfinished board at the depth cutoff,
//! is `0`.

use crate::{Board, Coord, INFINITY, NEG_INFINITY, Player, Score};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument};

/// Result of a search from one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct SearchOutcome {
    /// Best score the side to move can force within the search depth.
    score: Score,
    /// Move achieving `score`, `None` at a terminal board or depth 0.
    best_move: Option<Coord>,
    /// Nodes visited, root included.
    nodes: u64,
}

/// Alpha-beta search from `board` with `maximizing` to move.
///
/// Top-level callers seed `alpha = NEG_INFINITY` and `beta = INFINITY`.
/// A depth of 0 evaluates the board without expanding any move.
#[instrument(skip(board), fields(board = %board.id(), open = board.remaining_moves().len()))]
pub fn search(
    board: &Board,
    maximizing: bool,
    depth: u32,
    alpha: Score,
    beta: Score,
) -> SearchOutcome {
    let mut nodes = 0;
    let (score, best_move) = alpha_beta(board, maximizing, depth, alpha, beta, &mut nodes);
    debug!(score, best_move = ?best_move, nodes, "Search finished");
    SearchOutcome::new(score, best_move, nodes)
}

/// Plain minimax over the same tree, without pruning.
///
/// Returns the same score and move as [`search`] with open bounds.
#[instrument(skip(board), fields(board = %board.id(), open = board.remaining_moves().len()))]
pub fn exhaustive(board: &Board, maximizing: bool, depth: u32) -> SearchOutcome {
    let mut nodes = 0;
    let (score, best_move) = minimax(board, maximizing, depth, &mut nodes);
    debug!(score, best_move = ?best_move, nodes, "Exhaustive search finished");
    SearchOutcome::new(score, best_move, nodes)
}

/// Best move for `player` at `depth`, searching with open bounds.
pub fn best_move(board: &Board, player: Player, depth: u32) -> Option<Coord> {
    *search(board, player.is_maximizing(), depth, NEG_INFINITY, INFINITY).best_move()
}

fn alpha_beta(
    board: &Board,
    maximizing: bool,
    depth: u32,
    mut alpha: Score,
    mut beta: Score,
    nodes: &mut u64,
) -> (Score, Option<Coord>) {
    *nodes += 1;
    if board.is_terminal() || depth < 1 {
        return (board.score(), None);
    }

    let player = Player::from_maximizing(maximizing);
    let moves = board.remaining_moves();
    debug_assert!(!moves.is_empty(), "non-terminal board {} has no moves", board.id());

    let mut best = if maximizing { NEG_INFINITY } else { INFINITY };
    let mut best_move = moves.first().copied();

    for &candidate in moves {
        let mut simulation = board.clone();
        let applied = simulation.apply_move(candidate, player);
        debug_assert!(applied.is_ok(), "remaining move {candidate} is not open");
        let (score, _) = alpha_beta(&simulation, !maximizing, depth - 1, alpha, beta, nodes);

        if (maximizing && score > best) || (!maximizing && score < best) {
            best = score;
            best_move = Some(candidate);
            if maximizing {
                alpha = alpha.max(best);
            } else {
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
    }

    (best, best_move)
}

fn minimax(
    board: &Board,
    maximizing: bool,
    depth: u32,
    nodes: &mut u64,
) -> (Score, Option<Coord>) {
    *nodes += 1;
    if board.is_terminal() || depth < 1 {
        return (board.score(), None);
    }

    let player = Player::from_maximizing(maximizing);
    let moves = board.remaining_moves();
    let mut best = if maximizing { NEG_INFINITY } else { INFINITY };
    let mut best_move = moves.first().copied();

    for &candidate in moves {
        let mut simulation = board.clone();
        let applied = simulation.apply_move(candidate, player);
        debug_assert!(applied.is_ok(), "remaining move {candidate} is not open");
        let (score, _) = minimax(&simulation, !maximizing, depth - 1, nodes);
        if (maximizing && score > best) || (!maximizing && score < best) {
            best = score;
            best_move = Some(candidate);
        }
    }

    (best, best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardId;

    fn board_with(moves: &[(Coord, Player)]) -> Board {
        let mut board = Board::new(BoardId::new(0, 0));
        for &(coord, player) in moves {
            board.apply_move(coord, player).unwrap();
        }
        board
    }

    #[test]
    fn test_depth_zero_expands_nothing() {
        let board = board_with(&[]);
        let outcome = search(&board, true, 0, NEG_INFINITY, INFINITY);
        assert_eq!(*outcome.score(), 0);
        assert_eq!(*outcome.best_move(), None);
        assert_eq!(*outcome.nodes(), 1);
    }

    #[test]
    fn test_terminal_board_returns_score_without_move() {
        let board = board_with(&[
            (Coord::new(0, 0), Player::O),
            (Coord::new(1, 1), Player::O),
            (Coord::new(2, 2), Player::O),
        ]);
        let outcome = search(&board, true, 5, NEG_INFINITY, INFINITY);
        assert_eq!(*outcome.score(), -1);
        assert_eq!(*outcome.best_move(), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = board_with(&[
            (Coord::new(0, 0), Player::X),
            (Coord::new(1, 0), Player::O),
            (Coord::new(0, 1), Player::X),
            (Coord::new(1, 1), Player::O),
        ]);
        let outcome = search(&board, true, 1, NEG_INFINITY, INFINITY);
        assert_eq!(*outcome.score(), 1);
        assert_eq!(*outcome.best_move(), Some(Coord::new(0, 2)));
    }

    #[test]
    fn test_ties_fall_back_to_first_remaining_move() {
        // Depth 1 from an empty board sees no win anywhere.
        let board = board_with(&[]);
        let outcome = search(&board, false, 1, NEG_INFINITY, INFINITY);
        assert_eq!(*outcome.score(), 0);
        assert_eq!(*outcome.best_move(), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_every_remaining_move_is_expanded() {
        // Root plus one child per open cell; each child played its move.
        let board = board_with(&[(Coord::new(1, 1), Player::X)]);
        let pruned = search(&board, false, 1, NEG_INFINITY, INFINITY);
        let plain = exhaustive(&board, false, 1);
        assert_eq!(*pruned.nodes(), 9);
        assert_eq!(*plain.nodes(), 9);

        let two_ply = exhaustive(&board, false, 2);
        assert_eq!(*two_ply.nodes(), 1 + 8 + 8 * 7);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = board_with(&[(Coord::new(1, 1), Player::X)]);
        let before = board.clone();
        search(&board, false, 8, NEG_INFINITY, INFINITY);
        assert_eq!(board, before);
    }

    #[test]
    fn test_best_move_maps_player_to_side() {
        let board = board_with(&[
            (Coord::new(2, 0), Player::O),
            (Coord::new(0, 0), Player::X),
            (Coord::new(2, 1), Player::O),
            (Coord::new(0, 1), Player::X),
        ]);
        assert_eq!(best_move(&board, Player::O, 1), Some(Coord::new(2, 2)));
        assert_eq!(best_move(&board, Player::X, 1), Some(Coord::new(0, 2)));
    }
}
