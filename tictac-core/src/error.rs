//! Errors raised while playing a match

use crate::board::PlayerId;

/// A match cannot continue. None of these are retried: every operation is
/// deterministic given its inputs, so a retry reproduces the failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("player {player} tried to claim cell {cell}, already owned by {owner}")]
    InvalidMove {
        cell: usize,
        owner: PlayerId,
        player: PlayerId,
    },

    #[error("decision function returned {actual} outputs, expected {expected}")]
    MalformedOutput { expected: usize, actual: usize },

    #[error("no empty cell left for player {player}")]
    NoMoveAvailable { player: PlayerId },

    #[error("match exceeded {turns} turns without finishing")]
    TurnLimitExceeded { turns: usize },

    #[error("match already finished")]
    AlreadyFinished,

    #[error("a match needs at least one player")]
    NoPlayers,

    #[error("{count} seats exceed the {max} distinct player identities")]
    TooManyPlayers { count: usize, max: usize },
}
