//! Game rules for a 3x3 sub-board.
//!
//! Pure functions over [`Board`](crate::Board) storage. Nothing here is
//! cached; every call rescans the nine cells.

pub mod win;

pub use win::{WIN_LINES, check_winner, is_winner};
