//! Ultimate tic-tac-toe game logic.
//!
//! A 3x3 grid of 3x3 sub-boards and a depth-limited minimax search with
//! alpha-beta pruning that plays on a single sub-board.
//!
//! # Architecture
//!
//! - **Position**: one cell, holding its global coordinate and occupant
//! - **Board**: one sub-board with its open cells in generation order
//! - **BoardIndex**: the nine boards of a game, addressed by global coordinate
//! - **Search**: minimax over cloned boards
//!
//! # Example
//!
//! ```
//! use ultimate_tictactoe::{BoardIndex, Coord, Player, best_move};
//!
//! # fn example() -> Result<(), ultimate_tictactoe::BoardError> {
//! let mut index = BoardIndex::new()?;
//! index.apply_move(Coord::new(0, 0), Player::X)?;
//!
//! let board = index.board_for(Coord::new(0, 0))?;
//! let reply = best_move(board, Player::O, 4);
//! assert!(reply.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod board_index;
mod error;
mod phases;
mod position;
pub mod rules;
mod search;
mod types;

pub use board::{Board, BoardBuilder};
pub use board_index::BoardIndex;
pub use error::BoardError;
pub use phases::Outcome;
pub use position::Position;
pub use search::{SearchOutcome, best_move, exhaustive, search};
pub use types::{
    BoardId, Coord, GLOBAL_SIDE, INFINITY, NEG_INFINITY, Occupant, Player, SIDE, Score,
};
