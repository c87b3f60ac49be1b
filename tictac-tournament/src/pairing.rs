//! Pairing play - repeated matches between two population members
//!
//! Level 2 - Phase-level implementation

use tictac_core::{DecisionFunction, GameError, PlayerId, Strategy};

use crate::game_runner::{play_game, GameOutcome};

/// Totals for one unordered pair after all of its matches.
///
/// `first` always sat as identity 0 and `second` as identity 1.
#[derive(Clone, Debug, PartialEq)]
pub struct PairingResult {
    /// Population index seated as identity 0
    pub first: usize,
    /// Population index seated as identity 1
    pub second: usize,
    /// Score accumulated by `first`
    pub first_score: f64,
    /// Score accumulated by `second`
    pub second_score: f64,
    /// Wins for `first`
    pub first_wins: u32,
    /// Wins for `second`
    pub second_wins: u32,
    /// Ties
    pub ties: u32,
    /// Total matches played
    pub games_played: u32,
    /// Rounds summed over every match
    pub total_rounds: u32,
}

impl PairingResult {
    /// Create empty result
    pub fn empty(first: usize, second: usize) -> Self {
        Self {
            first,
            second,
            first_score: 0.0,
            second_score: 0.0,
            first_wins: 0,
            second_wins: 0,
            ties: 0,
            games_played: 0,
            total_rounds: 0,
        }
    }
}

/// Seed of the `game_index`-th match of the `pair_index`-th pairing.
/// Distinct for every match of a pass.
pub fn match_seed(base_seed: u64, pair_index: usize, matches_per_pair: usize, game_index: usize) -> u64 {
    let offset = (pair_index as u64)
        .wrapping_mul(matches_per_pair as u64)
        .wrapping_add(game_index as u64);
    base_seed.wrapping_add(offset)
}

/// Play `matches` fresh matches between two members (Level 2 phase)
pub fn play_pairing(
    pair: (usize, usize),
    first: &dyn DecisionFunction,
    second: &dyn DecisionFunction,
    matches: usize,
    max_tracked_rounds: u32,
    seeds: impl Fn(usize) -> u64,
) -> Result<PairingResult, GameError> {
    let outcomes = (0..matches)
        .map(|k| {
            play_game(
                [Strategy::Policy(first), Strategy::Policy(second)],
                max_tracked_rounds,
                seeds(k),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(aggregate_outcomes(pair, &outcomes))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Sum per-match scores and outcomes into pair totals
fn aggregate_outcomes(pair: (usize, usize), outcomes: &[GameOutcome]) -> PairingResult {
    let mut result = PairingResult::empty(pair.0, pair.1);

    for outcome in outcomes {
        result.first_score += outcome.score_of(PlayerId(0));
        result.second_score += outcome.score_of(PlayerId(1));
        result.total_rounds += outcome.rounds;

        match outcome.winner() {
            Some(PlayerId(0)) => result.first_wins += 1,
            Some(_) => result.second_wins += 1,
            None => result.ties += 1,
        }
    }

    result.games_played = outcomes.len() as u32;
    result
}
