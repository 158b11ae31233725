use super::*;
use chess_core::legal_moves;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let mut pos = Position::startpos();
    let before = pos.clone();

    let result = engine.select_move(&mut pos, Color::White);

    let mv = result.best_move.expect("start position has moves");
    assert!(legal_moves(&pos).contains(&mv));
    assert_eq!(pos, before);
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::new();
    let mut pos =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");

    let result = engine.select_move(&mut pos, Color::Black);

    assert!(result.best_move.is_none());
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::new();
    let mut pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");

    let result = engine.select_move(&mut pos, Color::Black);

    assert!(result.best_move.is_none());
}

#[test]
fn seeded_engines_agree() {
    let mut a = RandomEngine::with_seed(7);
    let mut b = RandomEngine::with_seed(7);
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");

    for _ in 0..10 {
        let ma = a.select_move(&mut pos, Color::White).best_move;
        let mb = b.select_move(&mut pos, Color::White).best_move;
        assert_eq!(ma, mb);
    }
}

#[test]
fn random_engine_covers_many_moves() {
    let mut engine = RandomEngine::with_seed(1);
    let mut pos = Position::startpos();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        if let Some(mv) = engine.select_move(&mut pos, Color::White).best_move {
            seen.insert(mv);
        }
    }
    // 200 uniform draws over 20 moves miss one with probability far below 1e-8.
    assert!(seen.len() > 15);
}
