//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use tictac_core::{StrategyKind, CELL_COUNT, DEFAULT_MAX_TRACKED_ROUNDS};

use crate::error::TournamentError;

/// Configuration for one evaluation pass over a population
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Matches played by every unordered pair
    pub matches_per_pair: usize,
    /// Round count the scoring formula is weighted against (not a play limit)
    pub max_tracked_rounds: u32,
    /// Expected population size (informational)
    pub population_size: usize,
    /// Whether to evaluate pairs in parallel
    pub parallel: bool,
    /// Base seed for reproducible passes (None = random)
    pub seed: Option<u64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            matches_per_pair: 3,
            max_tracked_rounds: DEFAULT_MAX_TRACKED_ROUNDS,
            population_size: 300,
            parallel: true,
            seed: None,
        }
    }
}

impl EvalConfig {
    /// Create config with specified matches per pair
    pub fn new(matches_per_pair: usize) -> Self {
        Self {
            matches_per_pair,
            ..Default::default()
        }
    }

    /// Set the scoring horizon
    pub fn with_max_tracked_rounds(mut self, max_tracked_rounds: u32) -> Self {
        self.max_tracked_rounds = max_tracked_rounds;
        self
    }

    /// Set the informational population size
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Evaluate pairs on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Reject settings that would make the pass meaningless
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.matches_per_pair == 0 {
            return Err(TournamentError::InvalidConfig(
                "matches_per_pair must be positive".into(),
            ));
        }
        check_tracked_rounds(self.max_tracked_rounds, 2)
    }
}

/// Fewest tracked rounds that keep every win positive for `seats` players.
/// A match fills at most `CELL_COUNT` cells, one per seat per round.
pub fn min_tracked_rounds(seats: usize) -> u32 {
    CELL_COUNT.div_ceil(seats.max(1)) as u32
}

fn check_tracked_rounds(max_tracked_rounds: u32, seats: usize) -> Result<(), TournamentError> {
    let min = min_tracked_rounds(seats);
    if max_tracked_rounds < min {
        return Err(TournamentError::InvalidConfig(format!(
            "max_tracked_rounds must be at least {} for {} seats, got {}",
            min, seats, max_tracked_rounds
        )));
    }
    Ok(())
}

/// Configuration for a single demo match outside the tournament
#[derive(Clone, Debug)]
pub struct StandaloneConfig {
    /// Strategy for each seat, in identity order
    pub seats: Vec<StrategyKind>,
    /// Round count the scoring formula is weighted against
    pub max_tracked_rounds: u32,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for StandaloneConfig {
    fn default() -> Self {
        Self {
            seats: vec![StrategyKind::Random, StrategyKind::Policy],
            max_tracked_rounds: DEFAULT_MAX_TRACKED_ROUNDS,
            seed: None,
        }
    }
}

impl StandaloneConfig {
    /// Create config for the given seats
    pub fn new(seats: Vec<StrategyKind>) -> Self {
        Self {
            seats,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether any seat needs a decision function
    pub fn needs_policy(&self) -> bool {
        self.seats.contains(&StrategyKind::Policy)
    }

    /// Reject an empty table or a horizon shorter than the longest match
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.seats.is_empty() {
            return Err(TournamentError::InvalidConfig("no seats configured".into()));
        }
        check_tracked_rounds(self.max_tracked_rounds, self.seats.len())
    }
}
