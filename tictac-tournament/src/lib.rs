//! TICTAC Tournament - Fitness evaluation through game playing
//!
//! This crate provides tournament infrastructure:
//! - Single matches between seated strategies
//! - Repeated matches for one pair of population members
//! - Round-robin evaluation passes that write scores back onto members
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: evaluate_population (orchestration)
//! - Level 2: play_pairing (phases)
//! - Level 3: play_game, play_standalone (steps)
//! - Level 4: configuration, competitors, standings

mod config;
mod error;
mod fitness;
mod game_runner;
mod pairing;
mod tournament;

pub use config::{min_tracked_rounds, EvalConfig, StandaloneConfig};
pub use error::TournamentError;
pub use fitness::{average_score, standings, Competitor, Genome, PassReport, Standing};
pub use game_runner::{play_game, play_standalone, GameOutcome};
pub use pairing::{match_seed, play_pairing, PairingResult};
pub use tournament::{evaluate_population, generate_round_robin_pairings};
pub use tictac_core::StrategyKind;
