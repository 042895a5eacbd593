//! Terminal chess front end.
//!
//! Thin wrapper over the engine: renders the board, reads line-oriented
//! commands, and persists games as move lists.

mod command;
mod config;
mod render;
mod save;
mod session;

use clap::{Parser, Subcommand};
use config::CliConfig;
use gambit_engine::Game;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gambit")]
#[command(about = "Play chess in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game
    New,
    /// Load a saved game and continue playing
    Load {
        /// Path to the save file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = CliConfig::load().unwrap_or_default();

    let game = match cli.command {
        Some(Commands::Load { file }) => {
            tracing::info!("Loading game from {}", file.display());
            save::load_game(&file)?
        }
        Some(Commands::New) | None => Game::new(),
    };

    session::run(game, &config)
}
