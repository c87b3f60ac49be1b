//! Errors that stop an evaluation pass

use tictac_core::GameError;

#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("match between members {first} and {second} failed: {source}")]
    Match {
        first: usize,
        second: usize,
        #[source]
        source: GameError,
    },

    #[error(transparent)]
    Game(#[from] GameError),
}
