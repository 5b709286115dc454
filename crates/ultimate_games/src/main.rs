//! Ultimate Games - console, judge and self-play drivers.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ultimate_games::{ConsoleGame, GameConfig, JudgeAdapter, self_play};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = GameConfig::load(&cli.config)?;

    match cli.command {
        Command::Play { level } => run_play(config, level),
        Command::Judge { depth } => run_judge(config, depth),
        Command::SelfPlay {
            depth_x,
            depth_o,
            first,
        } => {
            let mut config = config;
            if let Some(depth) = depth_x {
                config = config.with_depth_x(depth);
            }
            if let Some(depth) = depth_o {
                config = config.with_depth_o(depth);
            }
            if let Some(player) = first {
                config = config.with_first_player(player);
            }
            run_self_play(config)
        }
    }
}

/// Run the interactive console game
#[instrument(skip(config))]
fn run_play(config: GameConfig, level: Option<u32>) -> Result<()> {
    let level = level.unwrap_or(*config.start_level());
    info!(level, "Starting console game");

    let mut game = ConsoleGame::new(io::stdin().lock(), io::stdout().lock(), level);
    let outcomes = game.run()?;

    info!(games = outcomes.len(), final_level = game.level(), "Console session ended");
    Ok(())
}

/// Run the judge adapter on stdin/stdout
#[instrument(skip(config))]
fn run_judge(config: GameConfig, depth: Option<u32>) -> Result<()> {
    let depth = depth.unwrap_or(*config.judge_depth());
    info!(depth, "Starting judge adapter");

    let mut adapter = JudgeAdapter::new(depth).context("Failed to build board index")?;
    let turns = adapter.run(io::stdin().lock(), io::stdout().lock())?;

    info!(turns, "Judge session ended");
    Ok(())
}

/// Run a self-play game and print it to stdout
#[instrument(skip_all)]
fn run_self_play(config: GameConfig) -> Result<()> {
    info!(
        depth_x = *config.depth_x(),
        depth_o = *config.depth_o(),
        first = %config.first_player(),
        "Starting self-play"
    );
    let outcome = self_play(
        &mut io::stdout().lock(),
        *config.depth_x(),
        *config.depth_o(),
        *config.first_player(),
    )?;
    info!(%outcome, "Self-play ended");
    Ok(())
}

/// Logs go to stderr; stdout belongs to the game.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
