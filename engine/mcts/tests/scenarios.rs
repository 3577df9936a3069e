//! End-to-end searches on chess positions with known answers.

use engine_core::{GameState, Side, StepClock};
use games_chess::ChessGame;
use mcts::{run_mcts, MaterialEvaluator, MctsConfig, MctsSearch, SearchError, SearchResult};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// One clock step per iteration, so the budget is an iteration count.
fn search(
    fen: &str,
    iterations: u64,
    seed: u64,
) -> (ChessGame, SearchResult<<ChessGame as GameState>::Move>) {
    let mut game = ChessGame::from_fen(fen).unwrap();
    let evaluator = MaterialEvaluator::new();
    let config = MctsConfig::default().with_time_budget_ms(iterations);
    let clock = StepClock::new(1);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let result = run_mcts(&mut game, &evaluator, config, &clock, &mut rng).unwrap();
    (game, result)
}

#[test]
fn test_finds_back_rank_mate() {
    let fen = "6k1/5ppp/8/8/8/8/8/R6K w - - 0 1";
    let (game, result) = search(fen, 200, 42);

    assert_eq!(result.action, game.parse_move("a1a8").unwrap());
    assert!(result.value > 0.99);
    assert_eq!(game.fen(), ChessGame::from_fen(fen).unwrap().fen());
}

#[test]
fn test_finds_mate_for_black() {
    let fen = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";
    let (game, result) = search(fen, 200, 42);

    assert_eq!(game.side_to_move(), Side::Black);
    assert_eq!(result.action, game.parse_move("a8a1").unwrap());
    assert_eq!(result.value, 1.0);
}

#[test]
fn test_captures_hanging_queen() {
    let fen = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";
    let (game, result) = search(fen, 2000, 42);

    assert_eq!(result.action, game.parse_move("d2d5").unwrap());
    assert!(result.value > 0.0);
}

#[test]
fn test_single_legal_move_returns_after_one_iteration() {
    // The only legal move is taking the checking queen
    let mut game = ChessGame::from_fen("k7/8/8/8/8/8/6q1/7K w - - 0 1").unwrap();
    let evaluator = MaterialEvaluator::new();
    let config = MctsConfig::default().with_time_budget_ms(0);
    let clock = StepClock::new(1);
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    let result = run_mcts(&mut game, &evaluator, config, &clock, &mut rng).unwrap();

    assert_eq!(result.action, game.parse_move("h1g2").unwrap());
    assert_eq!(result.iterations, 1);
    // Bare kings are a dead draw
    assert_eq!(result.value, 0.0);
}

#[test]
fn test_stalemate_has_no_legal_moves() {
    let fen = "k7/8/8/8/8/8/5q2/7K w - - 0 1";
    let mut game = ChessGame::from_fen(fen).unwrap();
    let before = game.clone();
    let evaluator = MaterialEvaluator::new();
    let clock = StepClock::new(1);
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    let result = run_mcts(&mut game, &evaluator, MctsConfig::default(), &clock, &mut rng);

    assert!(matches!(result, Err(SearchError::NoLegalMoves)));
    assert_eq!(game, before);
}

#[test]
fn test_checkmated_side_has_no_legal_moves() {
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let mut game = ChessGame::from_fen(fen).unwrap();
    let evaluator = MaterialEvaluator::new();
    let clock = StepClock::new(1);
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    let result = run_mcts(&mut game, &evaluator, MctsConfig::default(), &clock, &mut rng);
    assert!(matches!(result, Err(SearchError::NoLegalMoves)));
}

#[test]
fn test_start_position_search_restores_state() {
    let mut game = ChessGame::new();
    let before = game.clone();
    let evaluator = MaterialEvaluator::new();
    let config = MctsConfig::default().with_time_budget_ms(1000);
    let clock = StepClock::new(1);
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    let mut search = MctsSearch::new(&game, &evaluator, config).unwrap();
    let result = search.run(&mut game, &clock, &mut rng).unwrap();

    assert_eq!(result.iterations, 1000);
    assert!(game.legal_moves().contains(&result.action));
    assert_eq!(result.root_children.len(), 20);
    assert_eq!(search.stats().root_visits, 1001);
    assert_eq!(game, before);

    // No opening move hangs a piece; the reply must not be a capture
    let mut after = game.clone();
    after.apply(&result.action);
    for reply in after.legal_moves() {
        assert!(after.board().piece_on(reply.get_dest()).is_none());
    }
}

#[test]
fn test_mid_game_search_keeps_history() {
    // Searching after some moves must not disturb the game's own history
    let mut game = ChessGame::new();
    for text in ["e2e4", "e7e5", "g1f3"] {
        let mv = game.parse_move(text).unwrap();
        game.apply(&mv);
    }
    let before = game.clone();

    let evaluator = MaterialEvaluator::new();
    let config = MctsConfig::for_testing().with_time_budget_ms(300);
    let clock = StepClock::new(1);
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let result = run_mcts(&mut game, &evaluator, config, &clock, &mut rng).unwrap();

    assert!(game.legal_moves().contains(&result.action));
    assert_eq!(game, before);
    assert_eq!(game.ply_count(), 3);
}

#[test]
fn test_same_seed_same_search() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let (_, a) = search(fen, 400, 9);
    let (_, b) = search(fen, 400, 9);

    assert_eq!(a.action, b.action);
    assert_eq!(a.root_children, b.root_children);
    assert_eq!(a.iterations, b.iterations);
}

#[test]
fn test_root_children_are_ranked_by_mean() {
    let (_, result) = search(games_chess::START_FEN, 300, 1);

    for pair in result.root_children.windows(2) {
        assert!(pair[0].mean_value >= pair[1].mean_value);
    }
    assert_eq!(result.action, result.root_children[0].action);
    assert_eq!(result.value, result.root_children[0].mean_value);
}
