//! Game runner - executes single matches
//!
//! Level 3 - Step-level implementation

use tictac_core::{Board, DecisionFunction, Match, Outcome, PlayerId, Strategy, StrategyKind};

use crate::config::StandaloneConfig;
use crate::error::TournamentError;

/// Outcome of a single match
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Final result
    pub result: Outcome,
    /// Rounds counted by the engine (including the final partial round)
    pub rounds: u32,
    /// Seat that moved first
    pub first_player: PlayerId,
    /// Score per seat, in identity order
    pub scores: Vec<f64>,
    /// Move history
    pub moves: Vec<(PlayerId, usize)>,
    /// Final board
    pub board: Board,
}

impl GameOutcome {
    /// Get winner (None for tie)
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.winner()
    }

    /// Check if the match is a tie
    pub fn is_tie(&self) -> bool {
        self.result.is_tie()
    }

    /// Score of one seat
    pub fn score_of(&self, player: PlayerId) -> f64 {
        self.scores.get(player.index()).copied().unwrap_or(0.0)
    }
}

/// Play one fresh match to completion
pub fn play_game<'a>(
    seats: impl IntoIterator<Item = Strategy<'a>>,
    max_tracked_rounds: u32,
    seed: u64,
) -> Result<GameOutcome, tictac_core::GameError> {
    let mut game = Match::new(seats, max_tracked_rounds, seed)?;
    let result = game.play()?;
    let scores = game.scores().unwrap_or_default();

    Ok(GameOutcome {
        result,
        rounds: game.rounds_played(),
        first_player: game.first_player(),
        scores,
        moves: game.history().to_vec(),
        board: game.board().clone(),
    })
}

/// Play a demo match with seats chosen by strategy kind.
///
/// Every `Policy` seat uses `policy`, which must be given if any seat needs it.
pub fn play_standalone(
    config: &StandaloneConfig,
    policy: Option<&dyn DecisionFunction>,
) -> Result<GameOutcome, TournamentError> {
    config.validate()?;

    let seats = config
        .seats
        .iter()
        .map(|kind| match kind {
            StrategyKind::Random => Ok(Strategy::Random),
            StrategyKind::Policy => policy.map(Strategy::Policy).ok_or_else(|| {
                TournamentError::InvalidConfig("policy seat requires a decision function".into())
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let outcome = play_game(seats, config.max_tracked_rounds, seed)?;

    tracing::info!(
        "Winner is \"{}\" after {} rounds",
        outcome
            .winner()
            .map_or_else(|| "tie".to_string(), |p| p.to_string()),
        outcome.rounds
    );

    Ok(outcome)
}
