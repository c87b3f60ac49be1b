//! Play command - one demo match between two seats
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_policy(), report_outcome()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tictac_core::{DecisionFunction, Network, DEFAULT_MAX_TRACKED_ROUNDS};
use tictac_tournament::{play_standalone, GameOutcome, StandaloneConfig, StrategyKind};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SeatArg {
    /// Decision function from --genome
    Policy,
    /// Uniform random empty cell
    Random,
}

impl From<SeatArg> for StrategyKind {
    fn from(seat: SeatArg) -> Self {
        match seat {
            SeatArg::Policy => StrategyKind::Policy,
            SeatArg::Random => StrategyKind::Random,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Strategy for the X seat (identity 0)
    #[arg(long, value_enum, default_value = "random")]
    pub x: SeatArg,

    /// Strategy for the O seat (identity 1)
    #[arg(long, value_enum, default_value = "policy")]
    pub o: SeatArg,

    /// Genome JSON file used by policy seats (random network if omitted)
    #[arg(long, value_name = "FILE")]
    pub genome: Option<PathBuf>,

    /// Hidden layer sizes for a generated network
    #[arg(long, value_delimiter = ',')]
    pub hidden: Vec<usize>,

    /// Round count the scoring formula is weighted against
    #[arg(long, default_value_t = DEFAULT_MAX_TRACKED_ROUNDS)]
    pub max_tracked_rounds: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = StandaloneConfig {
        seats: vec![args.x.into(), args.o.into()],
        max_tracked_rounds: args.max_tracked_rounds,
        seed,
    };

    let policy = if config.needs_policy() {
        Some(load_policy(&args, seed)?)
    } else {
        None
    };

    tracing::info!("Playing {:?} vs {:?}", args.x, args.o);

    let outcome = play_standalone(&config, policy.as_ref().map(|n| n as &dyn DecisionFunction))
        .context("Match failed")?;

    report_outcome(&outcome, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the genome, or generate one when no file was given
fn load_policy(args: &PlayArgs, seed: Option<u64>) -> Result<Network> {
    match &args.genome {
        Some(path) => {
            tracing::info!("Playing genome: {}", path.display());
            Network::load(path)
        }
        None => {
            let mut rng = create_rng(seed);
            tracing::info!("No genome given, using a random network");
            Ok(Network::random_for_board(&args.hidden, &mut rng).with_name("random"))
        }
    }
}

/// Print the final board and scores
fn report_outcome(outcome: &GameOutcome, json: bool) -> Result<()> {
    if json {
        #[derive(serde::Serialize)]
        struct JsonOutput {
            result: String,
            rounds: u32,
            first_player: u8,
            scores: Vec<f64>,
            moves: Vec<(u8, usize)>,
        }

        let output = JsonOutput {
            result: format_result(outcome),
            rounds: outcome.rounds,
            first_player: outcome.first_player.0,
            scores: outcome.scores.clone(),
            moves: outcome.moves.iter().map(|&(p, c)| (p.0, c)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", outcome.board);
        println!();
        println!("Result:       {}", format_result(outcome));
        println!("First player: {}", outcome.first_player);
        println!("Rounds:       {}", outcome.rounds);
        for (i, score) in outcome.scores.iter().enumerate() {
            println!("Score seat {}: {:+}", i, score);
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn format_result(outcome: &GameOutcome) -> String {
    match outcome.winner() {
        Some(winner) => format!("{} wins", winner),
        None => "tie".to_string(),
    }
}
