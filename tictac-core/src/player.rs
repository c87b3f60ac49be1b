//! Player strategies: policy-driven and uniform random

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, PlayerId};
use crate::error::GameError;

/// Deterministic map from an observation vector to per-cell action scores.
///
/// For a board of `n` cells the observation has `2 * n` entries and the
/// output must have `n`.
pub trait DecisionFunction: Send + Sync {
    fn decide(&self, observation: &[f64]) -> Vec<f64>;
}

impl<F> DecisionFunction for F
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn decide(&self, observation: &[f64]) -> Vec<f64> {
        self(observation)
    }
}

/// Which strategy to seat in a standalone match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    #[default]
    Policy,
    Random,
}

/// What a player is allowed to see when choosing a move
#[derive(Clone, Copy, Debug)]
pub struct MatchView<'a> {
    pub board: &'a Board,
    pub me: PlayerId,
}

/// Decision-making variant of a player
#[derive(Clone, Copy)]
pub enum Strategy<'a> {
    /// Wraps an external decision function
    Policy(&'a dyn DecisionFunction),
    /// Uniform choice among empty cells
    Random,
}

impl fmt::Debug for Strategy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Policy(_) => f.write_str("Policy"),
            Strategy::Random => f.write_str("Random"),
        }
    }
}

/// A seat in one match
#[derive(Clone, Copy, Debug)]
pub struct Player<'a> {
    pub id: PlayerId,
    pub strategy: Strategy<'a>,
}

impl<'a> Player<'a> {
    pub fn policy(id: PlayerId, decision: &'a dyn DecisionFunction) -> Self {
        Self {
            id,
            strategy: Strategy::Policy(decision),
        }
    }

    pub fn random(id: PlayerId) -> Self {
        Self {
            id,
            strategy: Strategy::Random,
        }
    }

    /// Choose a cell to claim. Only the random variant draws from `rng`.
    pub fn next_move<R: Rng + ?Sized>(
        &self,
        view: &MatchView<'_>,
        rng: &mut R,
    ) -> Result<usize, GameError> {
        match self.strategy {
            Strategy::Policy(decision) => policy_move(decision, view),
            Strategy::Random => random_move(view, rng),
        }
    }
}

/// Two indicators per cell: (1,0) owned by `me`, (0,1) owned by anyone else,
/// (0,0) empty.
pub fn encode_observation(board: &Board, me: PlayerId) -> Vec<f64> {
    let mut input = Vec::with_capacity(board.len() * 2);
    for cell in board.cells() {
        let (mine, theirs) = match *cell {
            Cell::Empty => (0.0, 0.0),
            Cell::Owned(id) if id == me => (1.0, 0.0),
            Cell::Owned(_) => (0.0, 1.0),
        };
        input.push(mine);
        input.push(theirs);
    }
    input
}

/// Lowest empty cell whose rounded output is at least 1, falling back to the
/// lowest empty cell. Cells past the end of `output` count as inactive.
pub fn select_move(board: &Board, output: &[f64]) -> Option<usize> {
    let valid = board.empty_cells();
    valid
        .iter()
        .copied()
        .find(|&cell| output.get(cell).is_some_and(|v| v.round() >= 1.0))
        .or_else(|| valid.first().copied())
}

fn policy_move(decision: &dyn DecisionFunction, view: &MatchView<'_>) -> Result<usize, GameError> {
    let input = encode_observation(view.board, view.me);
    let output = decision.decide(&input);
    if output.len() != view.board.len() {
        return Err(GameError::MalformedOutput {
            expected: view.board.len(),
            actual: output.len(),
        });
    }

    select_move(view.board, &output).ok_or(GameError::NoMoveAvailable { player: view.me })
}

fn random_move<R: Rng + ?Sized>(view: &MatchView<'_>, rng: &mut R) -> Result<usize, GameError> {
    view.board
        .empty_cells()
        .choose(rng)
        .copied()
        .ok_or(GameError::NoMoveAvailable { player: view.me })
}
