//! Tournament execution - round-robin evaluation pass
//!
//! Level 1 - Orchestration and Level 2 - Phases

use rayon::prelude::*;

use crate::config::EvalConfig;
use crate::error::TournamentError;
use crate::fitness::{average_score, standings, Competitor, PassReport};
use crate::pairing::{match_seed, play_pairing, PairingResult};

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run one evaluation pass over a population (Level 1 orchestration)
///
/// Every member's score is reset to zero, then each unordered pair `(i, j)`
/// with `i < j` plays `config.matches_per_pair` matches with `i` seated as
/// identity 0. Both match scores are added to the two members.
///
/// The members' score fields are the result; the returned report is a
/// summary. Any failing match stops the pass and is returned as an error.
pub fn evaluate_population<C: Competitor>(
    population: &mut [C],
    config: &EvalConfig,
) -> Result<PassReport, TournamentError> {
    config.validate()?;
    if config.population_size != population.len() {
        tracing::debug!(
            "Population has {} members, configured for {}",
            population.len(),
            config.population_size
        );
    }

    reset_scores(population);

    let pairings = generate_round_robin_pairings(population.len());
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let results = execute_pairings(population, &pairings, config, base_seed)?;

    apply_results(population, &results);
    let report = summarize(population, &results);

    tracing::info!(
        "Tournament complete. Highest: {:?}, Avg: {:.3} ({} matches)",
        report.best.map(|s| s.score),
        report.average_score,
        report.matches_played
    );

    Ok(report)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Zero every accumulator before any pairing starts
fn reset_scores<C: Competitor>(population: &mut [C]) {
    for member in population.iter_mut() {
        member.set_score(0.0);
    }
}

/// Play every pairing. Members are only read here; totals come back per pair.
fn execute_pairings<C: Competitor>(
    population: &[C],
    pairings: &[(usize, usize)],
    config: &EvalConfig,
    base_seed: u64,
) -> Result<Vec<PairingResult>, TournamentError> {
    let run = |(pair_index, &(i, j)): (usize, &(usize, usize))| {
        execute_pairing(population, (i, j), pair_index, config, base_seed)
    };

    if config.parallel {
        pairings.par_iter().enumerate().map(run).collect()
    } else {
        pairings.iter().enumerate().map(run).collect()
    }
}

/// Add each pair's totals to its two members, one pair at a time
fn apply_results<C: Competitor>(population: &mut [C], results: &[PairingResult]) {
    for result in results {
        population[result.first].add_score(result.first_score);
        population[result.second].add_score(result.second_score);
        tracing::debug!(
            "Pair ({}, {}): {:+} / {:+}",
            result.first,
            result.second,
            result.first_score,
            result.second_score
        );
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Generate all unordered pairs `(i, j)` with `i < j`
pub fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

/// Play all matches of one pair
fn execute_pairing<C: Competitor>(
    population: &[C],
    (i, j): (usize, usize),
    pair_index: usize,
    config: &EvalConfig,
    base_seed: u64,
) -> Result<PairingResult, TournamentError> {
    play_pairing(
        (i, j),
        population[i].policy(),
        population[j].policy(),
        config.matches_per_pair,
        config.max_tracked_rounds,
        |k| match_seed(base_seed, pair_index, config.matches_per_pair, k),
    )
    .map_err(|source| TournamentError::Match {
        first: i,
        second: j,
        source,
    })
}

/// Build the pass summary from the updated population
fn summarize<C: Competitor>(population: &[C], results: &[PairingResult]) -> PassReport {
    let matches_played: usize = results.iter().map(|r| r.games_played as usize).sum();
    let ties = results.iter().map(|r| r.ties).sum();
    let decisive = results.iter().map(|r| r.first_wins + r.second_wins).sum();
    let total_rounds: u32 = results.iter().map(|r| r.total_rounds).sum();
    let avg_rounds = if matches_played == 0 {
        0.0
    } else {
        total_rounds as f64 / matches_played as f64
    };

    PassReport {
        pairs: results.len(),
        matches_played,
        decisive,
        ties,
        avg_rounds,
        best: standings(population).first().copied(),
        average_score: average_score(population),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_core::{DecisionFunction, GameError};

    type Policy = fn(&[f64]) -> Vec<f64>;

    struct Member {
        policy: Policy,
        score: f64,
    }

    impl Competitor for Member {
        fn policy(&self) -> &dyn DecisionFunction {
            &self.policy
        }

        fn score(&self) -> f64 {
            self.score
        }

        fn set_score(&mut self, score: f64) {
            self.score = score;
        }
    }

    fn eager(_: &[f64]) -> Vec<f64> {
        vec![1.0; 9]
    }

    fn idle(_: &[f64]) -> Vec<f64> {
        vec![0.0; 9]
    }

    /// Prefers the centre, then corners
    fn centre(input: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; 9];
        out[4] = 1.0;
        if input[8] != 0.0 || input[9] != 0.0 {
            for corner in [0, 2, 6, 8] {
                out[corner] = 1.0;
            }
        }
        out
    }

    fn broken(_: &[f64]) -> Vec<f64> {
        vec![1.0; 2]
    }

    fn population(policies: &[Policy]) -> Vec<Member> {
        policies
            .iter()
            .map(|&policy| Member {
                policy,
                score: 1000.0,
            })
            .collect()
    }

    #[test]
    fn test_generate_round_robin_pairings() {
        let pairings = generate_round_robin_pairings(4);
        assert_eq!(pairings.len(), 6); // C(4,2) = 6
        assert!(pairings.contains(&(0, 1)));
        assert!(pairings.contains(&(0, 2)));
        assert!(pairings.contains(&(0, 3)));
        assert!(pairings.contains(&(1, 2)));
        assert!(pairings.contains(&(1, 3)));
        assert!(pairings.contains(&(2, 3)));
        assert!(pairings.iter().all(|&(i, j)| i < j));
    }

    #[test]
    fn test_generate_round_robin_pairings_empty() {
        let pairings = generate_round_robin_pairings(0);
        assert!(pairings.is_empty());

        let pairings = generate_round_robin_pairings(1);
        assert!(pairings.is_empty());
    }

    #[test]
    fn test_match_count() {
        for n in 0..7 {
            let mut pop = population(&vec![eager as Policy; n]);
            let config = EvalConfig::new(3).with_seed(1).sequential();
            let report = evaluate_population(&mut pop, &config).unwrap();
            assert_eq!(report.pairs, n * n.saturating_sub(1) / 2);
            assert_eq!(report.matches_played, n * n.saturating_sub(1) / 2 * 3);
            assert_eq!(report.decisive + report.ties, report.matches_played as u32);
        }
    }

    #[test]
    fn test_scores_reset_each_pass() {
        let mut pop = population(&[eager, idle, centre, eager]);
        let config = EvalConfig::new(4).with_seed(9).sequential();

        evaluate_population(&mut pop, &config).unwrap();
        let first: Vec<f64> = pop.iter().map(|m| m.score).collect();

        // Same seed, same games: a second pass must not accumulate on top
        evaluate_population(&mut pop, &config).unwrap();
        let second: Vec<f64> = pop.iter().map(|m| m.score).collect();
        assert_eq!(first, second);

        // Every match is zero-sum, so stale scores would show up here
        let total: f64 = second.iter().sum();
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_single_member_gets_zero() {
        let mut pop = population(&[eager]);
        let report = evaluate_population(&mut pop, &EvalConfig::new(2)).unwrap();
        assert_eq!(report.matches_played, 0);
        assert_eq!(pop[0].score, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected_before_play() {
        let mut pop = population(&[eager, broken]);
        let err = evaluate_population(&mut pop, &EvalConfig::new(0)).unwrap_err();
        assert!(matches!(err, TournamentError::InvalidConfig(_)));
        // Nothing ran, nothing was touched
        assert!(pop.iter().all(|m| m.score == 1000.0));
    }

    #[test]
    fn test_short_scoring_horizon_rejected() {
        // Two eager members finish in round 4, which a horizon of 2 would score as a loss
        let mut pop = population(&[eager, eager]);
        let config = EvalConfig::new(1).with_max_tracked_rounds(2).with_seed(0);
        let err = evaluate_population(&mut pop, &config).unwrap_err();
        assert!(matches!(err, TournamentError::InvalidConfig(_)));
        assert!(pop.iter().all(|m| m.score == 1000.0));
    }

    #[test]
    fn test_broken_member_stops_pass() {
        let mut pop = population(&[eager, idle, broken]);
        let config = EvalConfig::new(2).with_seed(3);
        let err = evaluate_population(&mut pop, &config).unwrap_err();
        match err {
            TournamentError::Match { second, source, .. } => {
                assert_eq!(second, 2);
                assert_eq!(source, GameError::MalformedOutput { expected: 9, actual: 2 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let policies = [eager, idle, centre, eager, idle];
        let mut seq = population(&policies);
        let mut par = population(&policies);

        let config = EvalConfig::new(5).with_seed(77);
        let seq_report = evaluate_population(&mut seq, &config.clone().sequential()).unwrap();
        let par_report = evaluate_population(&mut par, &config).unwrap();

        assert_eq!(seq_report, par_report);
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_identical_members_scores_follow_first_moves() {
        // Identical lowest-cell policies: the first mover always wins in round 4
        let mut pop = population(&[eager, eager]);
        let config = EvalConfig::new(10).with_seed(21).sequential();
        let report = evaluate_population(&mut pop, &config).unwrap();

        assert_eq!(report.ties, 0);
        assert_eq!(report.avg_rounds, 4.0);
        assert_eq!(pop[0].score + pop[1].score, 0.0);
        assert_eq!(pop[0].score % 2.0, 0.0);
        assert_eq!(report.best.map(|s| s.score), Some(pop[0].score.max(pop[1].score)));
    }
}
