//! Integration tests for the TICTAC evaluator
//!
//! Tests the full stack: board, strategies, match engine and tournament passes

use tictac_core::{
    Board, Cell, DecisionFunction, Match, Network, Outcome, PlayerId, Strategy, StrategyKind,
    DEFAULT_MAX_TRACKED_ROUNDS,
};
use tictac_tournament::{
    evaluate_population, play_standalone, standings, Competitor, EvalConfig, Genome,
    StandaloneConfig, TournamentError,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Random network population sized for the standard board
fn random_population(size: usize, seed: u64) -> Vec<Genome> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size)
        .map(|i| Genome::new(Network::random_for_board(&[4], &mut rng).with_name(format!("g{}", i))))
        .collect()
}

/// Network that always activates every cell
fn eager_network() -> Network {
    Network {
        name: "eager".into(),
        layers: vec![tictac_core::Layer {
            weights: vec![vec![0.0; 18]; 9],
            biases: vec![10.0; 9],
        }],
    }
}

// ============================================================================
// MATCH ENGINE
// ============================================================================

#[test]
fn test_network_policy_completes_top_row() {
    let network = eager_network();
    let board = Board::from_cells(vec![
        Cell::Owned(PlayerId(0)),
        Cell::Owned(PlayerId(0)),
        Cell::Empty,
        Cell::Owned(PlayerId(1)),
        Cell::Owned(PlayerId(1)),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
    ]);

    let mut game = Match::from_position(
        board,
        [Strategy::Policy(&network), Strategy::Random],
        0,
        1,
        5,
        0,
    )
    .unwrap();

    assert_eq!(game.play().unwrap(), Outcome::Win(PlayerId(0)));
    assert_eq!(game.score_of(PlayerId(0)), Some(4.0));
    assert_eq!(game.score_of(PlayerId(1)), Some(-4.0));
}

#[test]
fn test_network_vs_random_many_seeds() {
    let population = random_population(1, 4);
    let policy = population[0].policy();

    for seed in 0..100 {
        let mut game = Match::new(
            [Strategy::Policy(policy), Strategy::Random],
            DEFAULT_MAX_TRACKED_ROUNDS,
            seed,
        )
        .unwrap();
        let outcome = game.play().unwrap();
        let scores = game.scores().unwrap();

        match outcome {
            Outcome::Tie => assert!(scores.iter().all(|&s| s == 0.0)),
            Outcome::Win(w) => {
                assert!(scores[w.index()] > 0.0);
                assert!(scores[1 - w.index()] < 0.0);
            }
        }
        assert!(game.turns_played() <= game.max_turns());
    }
}

// ============================================================================
// TOURNAMENT
// ============================================================================

#[test]
fn test_full_pass_match_count_and_zero_sum() {
    let mut population = random_population(8, 11);
    let config = EvalConfig::new(3).with_seed(5);

    let report = evaluate_population(&mut population, &config).unwrap();

    assert_eq!(report.pairs, 28);
    assert_eq!(report.matches_played, 8 * 7 / 2 * 3);
    let total: f64 = population.iter().map(|g| g.score).sum();
    assert!(total.abs() < 1e-9);
    assert_eq!(report.best.unwrap().score, standings(&population)[0].score);
}

#[test]
fn test_pass_resets_previous_scores() {
    let mut population = random_population(5, 2);
    for genome in &mut population {
        genome.score = 1e6;
    }

    let config = EvalConfig::new(2).with_seed(8).sequential();
    evaluate_population(&mut population, &config).unwrap();
    let first: Vec<f64> = population.iter().map(|g| g.score).collect();
    assert!(first.iter().all(|s| s.abs() < 1e6));

    evaluate_population(&mut population, &config).unwrap();
    let second: Vec<f64> = population.iter().map(|g| g.score).collect();
    assert_eq!(first, second);
}

#[test]
fn test_wrong_network_width_stops_pass() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut population = random_population(3, 1);
    population.push(Genome::new(Network::random(18, &[], 4, &mut rng)));

    let err = evaluate_population(&mut population, &EvalConfig::new(1).with_seed(0)).unwrap_err();
    assert!(matches!(err, TournamentError::Match { second: 3, .. }));
}

#[test]
fn test_parallel_and_sequential_agree() {
    let config = EvalConfig::new(4).with_seed(123);
    let mut par = random_population(6, 9);
    let mut seq = par.clone();

    evaluate_population(&mut par, &config).unwrap();
    evaluate_population(&mut seq, &config.clone().sequential()).unwrap();

    let par_scores: Vec<f64> = par.iter().map(|g| g.score).collect();
    let seq_scores: Vec<f64> = seq.iter().map(|g| g.score).collect();
    assert_eq!(par_scores, seq_scores);
}

// ============================================================================
// STANDALONE PLAY
// ============================================================================

#[test]
fn test_saved_genome_plays_random_opponent() {
    let mut population = random_population(4, 21);
    let report = evaluate_population(&mut population, &EvalConfig::new(2).with_seed(1)).unwrap();
    let fittest = &population[report.best.unwrap().index].network;

    let path = std::env::temp_dir().join(format!("tictac-fittest-{}.json", std::process::id()));
    fittest.save(&path).unwrap();
    let loaded = Network::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let config = StandaloneConfig::new(vec![StrategyKind::Random, StrategyKind::Policy]).with_seed(4);
    let policy: &dyn DecisionFunction = &loaded;
    let outcome = play_standalone(&config, Some(policy)).unwrap();

    assert_eq!(outcome.board.winner(), Some(outcome.result));
    assert_eq!(outcome.scores.len(), 2);
}
