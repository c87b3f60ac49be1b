//! TICTAC Core - Game engine and player strategies
//!
//! This crate provides the core game logic for TICTAC:
//! - Board cells, ownership and terminal-line detection
//! - Player strategies (policy-driven and random)
//! - Match state machine and per-player scoring
//! - Feed-forward network genomes usable as policies

pub mod board;
pub mod error;
pub mod player;
pub mod game;
pub mod network;

// Re-exports for convenient access
pub use board::{Board, Cell, Line, Outcome, PlayerId, CELL_COUNT, TIC_TAC_TOE_LINES};
pub use error::GameError;
pub use player::{
    encode_observation, select_move, DecisionFunction, MatchView, Player, Strategy, StrategyKind,
};
pub use game::{score, Match, MatchState, DEFAULT_MAX_TRACKED_ROUNDS};
pub use network::{Layer, Network, NUM_INPUTS, NUM_OUTPUTS};
