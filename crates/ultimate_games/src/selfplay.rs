//! The search engine playing itself on one sub-board.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info, instrument};
use ultimate_tictactoe::{Board, BoardId, Outcome, Player, best_move};

/// Plays a full game with a search depth per player.
///
/// Writes the board after every move and the outcome at the end.
#[instrument(skip(output))]
pub fn self_play<W: Write>(
    output: &mut W,
    depth_x: u32,
    depth_o: u32,
    first: Player,
) -> Result<Outcome> {
    let mut board = Board::new(BoardId::new(0, 0));
    let mut player = first;

    while !board.is_terminal() {
        let depth = match player {
            Player::X => depth_x,
            Player::O => depth_o,
        };
        let coord = best_move(&board, player, depth)
            .with_context(|| format!("No move for {} on a non-terminal board", player))?;
        board.apply_move(coord, player)?;
        debug!(%player, %coord, depth, "Self-play move");
        writeln!(output, "{}", board)?;
        player = player.opponent();
    }

    let outcome = board
        .outcome()
        .context("Finished board has no outcome")?;
    info!(%outcome, tie = outcome.is_tie(), "Self-play finished");
    writeln!(output, "\t*** {} ***", outcome)?;
    Ok(outcome)
}
