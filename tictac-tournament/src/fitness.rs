//! Population members and pass summaries
//!
//! Level 4 - Utilities

use serde::{Deserialize, Serialize};
use tictac_core::{DecisionFunction, Network};

/// A population member the evaluator can score.
///
/// `policy` must accept `2 * cells` inputs and return `cells` outputs.
pub trait Competitor: Sync {
    /// Decision function seated in every match this member plays
    fn policy(&self) -> &dyn DecisionFunction;

    /// Current accumulated score
    fn score(&self) -> f64;

    /// Overwrite the accumulated score
    fn set_score(&mut self, score: f64);

    /// Add to the accumulated score
    fn add_score(&mut self, delta: f64) {
        let score = self.score();
        self.set_score(score + delta);
    }
}

/// Network genome with its fitness accumulator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genome {
    pub network: Network,
    #[serde(default)]
    pub score: f64,
}

impl Genome {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            score: 0.0,
        }
    }
}

impl Competitor for Genome {
    fn policy(&self) -> &dyn DecisionFunction {
        &self.network
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn set_score(&mut self, score: f64) {
        self.score = score;
    }
}

/// Rank entry for one member
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Standing {
    /// Index in the population
    pub index: usize,
    /// Score after the pass
    pub score: f64,
}

/// Summary of one evaluation pass. The scores themselves live on the members.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PassReport {
    /// Unordered pairs evaluated
    pub pairs: usize,
    /// Matches played in total
    pub matches_played: usize,
    /// Matches ending in a win
    pub decisive: u32,
    /// Matches ending in a tie
    pub ties: u32,
    /// Mean match length in rounds
    pub avg_rounds: f64,
    /// Highest-scoring member
    pub best: Option<Standing>,
    /// Mean member score
    pub average_score: f64,
}

/// Members ranked by score, highest first. Equal scores keep population order.
pub fn standings<C: Competitor>(population: &[C]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = population
        .iter()
        .enumerate()
        .map(|(index, member)| Standing {
            index,
            score: member.score(),
        })
        .collect();

    standings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    standings
}

/// Mean score, 0 for an empty population
pub fn average_score<C: Competitor>(population: &[C]) -> f64 {
    if population.is_empty() {
        0.0
    } else {
        population.iter().map(|m| m.score()).sum::<f64>() / population.len() as f64
    }
}
