use super::*;
use chess_core::{legal_moves, ordered_moves, Move, Position, MATE_SCORE};

const WHITE_MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
const BLACK_MATE_IN_ONE: &str = "4q1k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";
const CHECKMATED: &str = "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1";
const STALEMATED: &str = "k7/8/1Q6/8/8/8/8/1K6 b - - 0 1";
// Ra8# and Rb8# both mate.
const TWO_MATES_IN_ONE: &str = "7k/6pp/8/8/8/8/8/RR4K1 w - - 0 1";
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn search(strategy: &mut dyn Strategy, fen: &str) -> SearchResult {
    let mut pos = Position::from_fen(fen);
    let side = pos.side_to_move;
    strategy.select_move(&mut pos, side)
}

#[test]
fn test_minimax_start_position_depth_one() {
    let mut pos = Position::startpos();
    let mut engine = MinimaxEngine::with_depth(1);
    let result = engine.select_move(&mut pos, Color::White);

    let mv = result.best_move.expect("start position has moves");
    assert!(legal_moves(&pos).contains(&mv));
    assert_eq!(result.depth, 1);
    // Root plus its 20 children.
    assert_eq!(result.nodes, 21);
}

#[test]
fn test_finds_mate_in_one_for_white() {
    let mating = Move::new(4, 60); // e1e8
    for depth in [1, 2] {
        let r = search(&mut MinimaxEngine::with_depth(depth), WHITE_MATE_IN_ONE);
        assert_eq!(r.best_move, Some(mating), "minimax depth {depth}");
        assert_eq!(r.score, MATE_SCORE);

        let r = search(&mut NegamaxEngine::with_depth(depth), WHITE_MATE_IN_ONE);
        assert_eq!(r.best_move, Some(mating), "negamax depth {depth}");
        assert_eq!(r.score, MATE_SCORE);
    }
    let r = search(&mut GreedyEngine::new(), WHITE_MATE_IN_ONE);
    assert_eq!(r.best_move, Some(mating));
}

#[test]
fn test_finds_mate_in_one_for_black() {
    let mating = Move::new(60, 4); // e8e1
    for depth in [1, 2] {
        let r = search(&mut MinimaxEngine::with_depth(depth), BLACK_MATE_IN_ONE);
        assert_eq!(r.best_move, Some(mating), "minimax depth {depth}");
        assert_eq!(r.score, MATE_SCORE);

        let r = search(&mut NegamaxEngine::with_depth(depth), BLACK_MATE_IN_ONE);
        assert_eq!(r.best_move, Some(mating), "negamax depth {depth}");
        assert_eq!(r.score, MATE_SCORE);
    }
}

#[test]
fn test_ties_keep_first_move() {
    let mut pos = Position::from_fen(TWO_MATES_IN_ONE);
    let mates: Vec<Move> = ordered_moves(&mut pos)
        .into_iter()
        .filter(|&mv| pos.play(mv).is_checkmate())
        .collect();
    assert_eq!(mates, vec![Move::new(0, 56), Move::new(1, 57)]);

    for depth in [1, 2] {
        let r = search(&mut MinimaxEngine::with_depth(depth), TWO_MATES_IN_ONE);
        assert_eq!(r.best_move, Some(mates[0]), "minimax depth {depth}");
        assert_eq!(r.score, MATE_SCORE);

        let r = search(&mut NegamaxEngine::with_depth(depth), TWO_MATES_IN_ONE);
        assert_eq!(r.best_move, Some(mates[0]), "negamax depth {depth}");
        assert_eq!(r.score, MATE_SCORE);
    }
    let r = search(&mut GreedyEngine::new(), TWO_MATES_IN_ONE);
    assert_eq!(r.best_move, Some(mates[0]));
}

#[test]
fn test_no_move_when_game_is_over() {
    let strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(MinimaxEngine::with_depth(2)),
        Box::new(NegamaxEngine::with_depth(2)),
        Box::new(GreedyEngine::new()),
    ];
    for mut strategy in strategies {
        for fen in [CHECKMATED, STALEMATED] {
            let r = search(strategy.as_mut(), fen);
            assert!(r.best_move.is_none(), "{} on {fen}", strategy.name());
        }
    }
}

#[test]
fn test_minimax_and_negamax_agree() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        KIWIPETE,
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        "4k3/1p4p1/8/P2P4/8/8/5PP1/4K3 w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let a = search(&mut MinimaxEngine::with_depth(2), fen);
        let b = search(&mut NegamaxEngine::with_depth(2), fen);
        assert_eq!(a.best_move, b.best_move, "best move differs on {fen}");
        assert_eq!(a.score, b.score, "score differs on {fen}");
    }
}

#[test]
fn test_searches_restore_position() {
    let strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(MinimaxEngine::with_depth(2)),
        Box::new(NegamaxEngine::with_depth(2)),
        Box::new(GreedyEngine::new()),
    ];
    for mut strategy in strategies {
        let mut pos = Position::from_fen(KIWIPETE);
        let before = pos.clone();
        let r = strategy.select_move(&mut pos, Color::White);
        assert!(r.best_move.is_some());
        assert_eq!(pos, before, "{} left the position modified", strategy.name());
    }
}

#[test]
fn test_greedy_takes_hanging_queen() {
    let r = search(&mut GreedyEngine::new(), "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(r.best_move, Some(Move::new(28, 35))); // e4d5
    assert_eq!(r.depth, 1);
}

#[test]
fn test_minimax_takes_hanging_queen() {
    let r = search(&mut MinimaxEngine::with_depth(2), "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(r.best_move, Some(Move::new(28, 35)));
    assert!(r.score > 0);
}

// =============================================================================
// Transposition table
// =============================================================================

#[test]
fn test_negamax_reuses_table_across_calls() {
    let mut engine = NegamaxEngine::with_depth(2);
    let mut pos = Position::startpos();

    let first = engine.select_move(&mut pos, Color::White);
    let second = engine.select_move(&mut pos, Color::White);

    // Every root child is answered from the table on the second call.
    assert_eq!(second.nodes, 1);
    assert!(first.nodes > second.nodes);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);

    engine.new_game();
    assert!(engine.table().is_empty());
    let third = engine.select_move(&mut pos, Color::White);
    assert_eq!(third.nodes, first.nodes);
}

#[test]
fn test_deeper_search_recomputes_shallow_entries() {
    let fen = "4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1";
    let mut engine = NegamaxEngine::with_depth(2);
    let mut pos = Position::from_fen(fen);

    let shallow = engine.select_move(&mut pos, Color::White);
    let child_keys: Vec<u64> = legal_moves(&pos)
        .into_iter()
        .map(|mv| engine.hasher().key(&pos.play(mv)))
        .collect();
    for &key in &child_keys {
        assert_eq!(engine.table().entry(key).map(|e| e.depth), Some(1));
    }

    engine.set_depth(4);
    let deep = engine.select_move(&mut pos, Color::White);

    // The depth-1 entries could not answer a depth-3 query, so every root
    // child was searched again and its entry replaced.
    for &key in &child_keys {
        assert_eq!(engine.table().entry(key).map(|e| e.depth), Some(3));
    }
    assert!(deep.nodes > child_keys.len() as u64);
    assert!(deep.best_move.is_some());
    assert_ne!(shallow.depth, deep.depth);

    let root = engine.hasher().key(&pos);
    assert_eq!(engine.table().entry(root).map(|e| e.depth), Some(4));
}

#[test]
fn test_prefer_deeper_policy_keeps_root_entry() {
    let mut engine = NegamaxEngine::new(NegamaxConfig {
        depth: 3,
        replacement: ReplacementPolicy::PreferDeeper,
    });
    let mut pos = Position::from_fen("4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1");
    engine.select_move(&mut pos, Color::White);

    engine.set_depth(1);
    engine.select_move(&mut pos, Color::White);

    let root = engine.hasher().key(&pos);
    assert_eq!(engine.table().entry(root).map(|e| e.depth), Some(3));
    assert_eq!(engine.table().policy(), ReplacementPolicy::PreferDeeper);
}

#[test]
fn test_negamax_score_reported_for_requested_side() {
    let mut engine = NegamaxEngine::with_depth(1);
    let mut pos = Position::from_fen(WHITE_MATE_IN_ONE);
    // Asking on behalf of the side not to move flips the sign.
    let r = engine.select_move(&mut pos, Color::Black);
    assert_eq!(r.score, -MATE_SCORE);
}
