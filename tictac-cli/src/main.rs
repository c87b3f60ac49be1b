//! TICTAC CLI - Command-line interface
//!
//! Commands:
//! - play: Play a single demo match
//! - evaluate: Run one tournament pass over a random population

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod evaluate;
mod play;

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "TICTAC tournament fitness evaluator")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single demo match
    Play(play::PlayArgs),
    /// Run one round-robin evaluation pass
    Evaluate(evaluate::EvaluateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Evaluate(args) => evaluate::run(args, cli.seed),
    }
}
