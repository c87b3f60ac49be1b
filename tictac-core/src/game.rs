//! Match state machine and scoring

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Outcome, PlayerId};
use crate::error::GameError;
use crate::player::{MatchView, Player, Strategy};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Round count the scoring formula is weighted against. Not a play limit.
pub const DEFAULT_MAX_TRACKED_ROUNDS: u32 = 5;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Match lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    InProgress,
    Finished(Outcome),
}

/// One playthrough between a fixed ordered list of players.
///
/// Player identities are positions in that list. Created fresh for every
/// match and dropped after scoring.
#[derive(Debug)]
pub struct Match<'a> {
    board: Board,
    players: Vec<Player<'a>>,
    first_player: usize,
    current: usize,
    rounds_played: u32,
    turns_played: usize,
    max_tracked_rounds: u32,
    state: MatchState,
    history: Vec<(PlayerId, usize)>,
    rng: ChaCha8Rng,
}

impl<'a> Match<'a> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New 3x3 match with a uniformly random first player
    pub fn new(
        strategies: impl IntoIterator<Item = Strategy<'a>>,
        max_tracked_rounds: u32,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_board(Board::tic_tac_toe(), strategies, max_tracked_rounds, seed)
    }

    /// New match on a custom board with a uniformly random first player
    pub fn with_board(
        board: Board,
        strategies: impl IntoIterator<Item = Strategy<'a>>,
        max_tracked_rounds: u32,
        seed: u64,
    ) -> Result<Self, GameError> {
        let players = seat_players(strategies)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let first_player = rng.gen_range(0..players.len());
        Ok(Self::assemble(board, players, first_player, 0, max_tracked_rounds, rng))
    }

    /// Resume from an existing position with `to_move` starting the next round
    pub fn from_position(
        board: Board,
        strategies: impl IntoIterator<Item = Strategy<'a>>,
        to_move: usize,
        rounds_played: u32,
        max_tracked_rounds: u32,
        seed: u64,
    ) -> Result<Self, GameError> {
        let players = seat_players(strategies)?;
        let first_player = to_move % players.len();
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(board, players, first_player, rounds_played, max_tracked_rounds, rng))
    }

    fn assemble(
        board: Board,
        players: Vec<Player<'a>>,
        first_player: usize,
        rounds_played: u32,
        max_tracked_rounds: u32,
        rng: ChaCha8Rng,
    ) -> Self {
        let state = match board.winner() {
            Some(outcome) => MatchState::Finished(outcome),
            None => MatchState::InProgress,
        };
        Self {
            board,
            players,
            first_player,
            current: first_player,
            rounds_played,
            turns_played: 0,
            max_tracked_rounds,
            state,
            history: Vec::new(),
            rng,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player<'a>] {
        &self.players
    }

    pub fn first_player(&self) -> PlayerId {
        self.players[self.first_player].id
    }

    pub fn current_player(&self) -> PlayerId {
        self.players[self.current].id
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    pub fn max_tracked_rounds(&self) -> u32 {
        self.max_tracked_rounds
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, MatchState::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            MatchState::Finished(outcome) => Some(outcome),
            MatchState::InProgress => None,
        }
    }

    /// Moves in the order they were applied
    pub fn history(&self) -> &[(PlayerId, usize)] {
        &self.history
    }

    /// Every turn claims a cell, so a match can never take more turns than
    /// the board has cells.
    pub fn max_turns(&self) -> usize {
        self.board.len()
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Let the player to move claim a cell, then check for a result
    pub fn play_turn(&mut self) -> Result<MatchState, GameError> {
        if self.is_finished() {
            return Err(GameError::AlreadyFinished);
        }
        if self.turns_played >= self.max_turns() {
            return Err(GameError::TurnLimitExceeded {
                turns: self.turns_played,
            });
        }

        let player = self.players[self.current];
        let view = MatchView {
            board: &self.board,
            me: player.id,
        };
        let cell = player.next_move(&view, &mut self.rng)?;
        self.board.claim(cell, player.id)?;
        self.turns_played += 1;
        self.history.push((player.id, cell));

        tracing::trace!(
            round = self.rounds_played,
            player = player.id.0,
            cell,
            "applied move"
        );

        match self.board.winner() {
            Some(outcome) => self.state = MatchState::Finished(outcome),
            None => self.current = (self.current + 1) % self.players.len(),
        }

        Ok(self.state)
    }

    /// One turn per player in seat order, stopping as soon as the match ends.
    /// The round counter advances even when the round is cut short.
    pub fn play_round(&mut self) -> Result<MatchState, GameError> {
        for _ in 0..self.players.len() {
            if let MatchState::Finished(_) = self.play_turn()? {
                break;
            }
        }
        self.rounds_played += 1;
        Ok(self.state)
    }

    /// Play rounds until the board reports a result
    pub fn play(&mut self) -> Result<Outcome, GameError> {
        loop {
            if let MatchState::Finished(outcome) = self.state {
                tracing::debug!(
                    ?outcome,
                    rounds = self.rounds_played,
                    "match finished\n{}",
                    self.board
                );
                return Ok(outcome);
            }
            self.play_round()?;
        }
    }

    // ========================================================================
    // SCORING
    // ========================================================================

    /// Score for `player`, or `None` while the match is in progress
    pub fn score_of(&self, player: PlayerId) -> Option<f64> {
        self.outcome()
            .map(|outcome| score(outcome, player, self.rounds_played, self.max_tracked_rounds))
    }

    /// Scores in seat order, or `None` while the match is in progress
    pub fn scores(&self) -> Option<Vec<f64>> {
        self.outcome().map(|outcome| {
            self.players
                .iter()
                .map(|p| score(outcome, p.id, self.rounds_played, self.max_tracked_rounds))
                .collect()
        })
    }
}

/// `(max_tracked_rounds - rounds_played + 1) * tie_factor * outcome_sign`
///
/// Ties score 0 for everyone. Faster wins score higher, faster losses lower.
pub fn score(outcome: Outcome, player: PlayerId, rounds_played: u32, max_tracked_rounds: u32) -> f64 {
    let rounds_remaining = max_tracked_rounds as f64 - rounds_played as f64 + 1.0;
    let tie_factor = if outcome.is_tie() { 0.0 } else { 1.0 };
    let outcome_sign = if outcome.winner() == Some(player) { 1.0 } else { -1.0 };
    rounds_remaining * tie_factor * outcome_sign
}

fn seat_players<'a>(
    strategies: impl IntoIterator<Item = Strategy<'a>>,
) -> Result<Vec<Player<'a>>, GameError> {
    let strategies: Vec<Strategy<'a>> = strategies.into_iter().collect();
    if strategies.is_empty() {
        return Err(GameError::NoPlayers);
    }

    strategies
        .into_iter()
        .enumerate()
        .map(|(i, strategy)| {
            let id = u8::try_from(i).map_err(|_| GameError::TooManyPlayers {
                count: i + 1,
                max: u8::MAX as usize + 1,
            })?;
            Ok(Player {
                id: PlayerId(id),
                strategy,
            })
        })
        .collect()
}
