//! Drivers for ultimate tic-tac-toe.
//!
//! # Architecture
//!
//! - **Config**: search depths and starting options from TOML
//! - **Console**: a human X against the engine on one sub-board
//! - **Judge**: line-protocol adapter for an automated judge
//! - **Self-play**: the engine against itself

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;
mod judge;
mod selfplay;

pub use config::{ConfigError, ConfigErrorKind, GameConfig};
pub use console::ConsoleGame;
pub use judge::{JudgeAdapter, ProtocolError, select_active_cell};
pub use selfplay::self_play;
