//! Chess CLI - terminal front end for the chess rule engine
//!
//! Commands:
//! - play: Two players at one terminal
//! - show: Draw a saved board
//! - hints: List where a piece on a saved board can go

mod clock;
mod command;
mod inspect;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play(play::PlayArgs),
    /// Draw a saved board
    Show(inspect::ShowArgs),
    /// List the valid moves of one piece on a saved board
    Hints(inspect::HintsArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never land inside the drawn board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Show(args) => inspect::run_show(args),
        Commands::Hints(args) => inspect::run_hints(args),
    }
}
