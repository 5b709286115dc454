//! Command-line interface for ultimate_games.

use clap::{Parser, Subcommand};
use ultimate_tictactoe::Player;

/// Ultimate tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "ultimate_games")]
#[command(about = "Ultimate tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "ultimate_games.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the AI on a single sub-board
    Play {
        /// Starting level (AI search depth)
        #[arg(short, long)]
        level: Option<u32>,
    },

    /// Answer an automated judge over stdin/stdout
    Judge {
        /// Search depth
        #[arg(short, long)]
        depth: Option<u32>,
    },

    /// Watch the AI play itself on a single sub-board
    SelfPlay {
        /// Search depth for X
        #[arg(long)]
        depth_x: Option<u32>,

        /// Search depth for O
        #[arg(long)]
        depth_o: Option<u32>,

        /// Player that moves first (x or o)
        #[arg(long)]
        first: Option<Player>,
    },
}
