//! Evaluate command - one tournament pass over a random population
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_population(), save_fittest(), report_results()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tictac_core::{Network, DEFAULT_MAX_TRACKED_ROUNDS};
use tictac_tournament::{evaluate_population, standings, EvalConfig, Genome, PassReport};

use crate::play::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct EvaluateArgs {
    /// Population size
    #[arg(long, default_value = "50")]
    pub population: usize,

    /// Matches played by every pair of genomes
    #[arg(long, default_value = "3")]
    pub matches_per_pair: usize,

    /// Hidden layer sizes for generated networks
    #[arg(long, value_delimiter = ',')]
    pub hidden: Vec<usize>,

    /// Round count the scoring formula is weighted against
    #[arg(long, default_value_t = DEFAULT_MAX_TRACKED_ROUNDS)]
    pub max_tracked_rounds: u32,

    /// Evaluate pairs on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Number of standings to print
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Write the fittest genome to this JSON file
    #[arg(long, value_name = "FILE")]
    pub save_fittest: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evaluate command
///
/// 1. Generate a random population
/// 2. Run one evaluation pass
/// 3. Report standings and optionally export the fittest genome
pub fn run(args: EvaluateArgs, seed: Option<u64>) -> Result<()> {
    let mut population = build_population(&args, seed);

    let mut config = EvalConfig::new(args.matches_per_pair)
        .with_max_tracked_rounds(args.max_tracked_rounds)
        .with_population_size(args.population);
    config.seed = seed;
    if args.sequential {
        config = config.sequential();
    }

    tracing::info!(
        "Starting evaluation: pop={}, matches_per_pair={}",
        population.len(),
        config.matches_per_pair
    );

    let report = evaluate_population(&mut population, &config).context("Evaluation pass failed")?;

    if let Some(path) = &args.save_fittest {
        save_fittest(&population, &report, path)?;
    }

    report_results(&population, &report, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Random networks, one per member
fn build_population(args: &EvaluateArgs, seed: Option<u64>) -> Vec<Genome> {
    let mut rng = create_rng(seed);
    (0..args.population)
        .map(|i| {
            let network = Network::random_for_board(&args.hidden, &mut rng)
                .with_name(format!("genome-{}", i));
            Genome::new(network)
        })
        .collect()
}

/// Export the best genome's network
fn save_fittest(population: &[Genome], report: &PassReport, path: &Path) -> Result<()> {
    let Some(best) = report.best else {
        tracing::warn!("Empty population, nothing to export");
        return Ok(());
    };

    population[best.index]
        .network
        .save(path)
        .with_context(|| format!("Failed to export fittest genome to {}", path.display()))?;
    tracing::info!("Exporting to file: {}", path.display());
    Ok(())
}

/// Print standings
fn report_results(population: &[Genome], report: &PassReport, args: &EvaluateArgs) -> Result<()> {
    let ranked = standings(population);
    let top = &ranked[..args.top.min(ranked.len())];

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonStanding<'a> {
            rank: usize,
            name: &'a str,
            score: f64,
        }

        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            report: &'a PassReport,
            standings: Vec<JsonStanding<'a>>,
        }

        let output = JsonOutput {
            report,
            standings: top
                .iter()
                .enumerate()
                .map(|(rank, s)| JsonStanding {
                    rank: rank + 1,
                    name: &population[s.index].network.name,
                    score: s.score,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n=== Tournament Pass ===");
    println!("Pairs:          {}", report.pairs);
    println!("Matches:        {}", report.matches_played);
    println!(
        "Ties:           {} ({:.1}%)",
        report.ties,
        percent(report.ties as usize, report.matches_played)
    );
    println!("Average rounds: {:.2}", report.avg_rounds);
    println!("Average score:  {:.3}", report.average_score);
    println!();
    for (rank, standing) in top.iter().enumerate() {
        println!(
            "{:>3}. {:<12} {:+}",
            rank + 1,
            population[standing.index].network.name,
            standing.score
        );
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
