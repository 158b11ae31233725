use super::*;
use crate::movegen::legal_moves;

#[test]
fn test_zobrist_keys_unique() {
    // Verify that piece keys are unique (no collisions in small sample)
    let z = ZobristHasher::default();
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                let key = z.pieces[color][piece][sq];
                assert!(seen.insert(key), "Duplicate Zobrist key found");
            }
        }
    }

    assert!(seen.insert(z.side_to_move), "Side to move key collision");

    for i in 0..4 {
        assert!(seen.insert(z.castling[i]), "Castling key collision");
    }

    for i in 0..8 {
        assert!(seen.insert(z.en_passant[i]), "En passant key collision");
    }
}

#[test]
fn test_zobrist_piece_key() {
    let z = ZobristHasher::default();
    let piece = Piece {
        color: Color::White,
        kind: PieceKind::Pawn,
    };
    assert_ne!(z.piece_key(piece, 0), z.piece_key(piece, 1));
}

#[test]
fn same_seed_same_keys() {
    let a = ZobristHasher::new(7);
    let b = ZobristHasher::new(7);
    let c = ZobristHasher::new(8);
    let pos = Position::startpos();
    assert_eq!(a.key(&pos), b.key(&pos));
    assert_ne!(a.key(&pos), c.key(&pos));
    assert_eq!(a.seed(), 7);
}

#[test]
fn key_is_stable_for_unchanged_position() {
    let z = ZobristHasher::default();
    let pos = Position::startpos();
    assert_eq!(z.key(&pos), z.key(&pos));
}

#[test]
fn apply_then_undo_restores_key() {
    let z = ZobristHasher::default();
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let before = z.key(&pos);
    for mv in legal_moves(&pos) {
        let after = {
            let child = pos.play(mv);
            z.key(&child)
        };
        assert_ne!(after, before, "{mv} should change the key");
        assert_eq!(z.key(&pos), before, "{mv} was not undone");
    }
}

#[test]
fn counters_do_not_affect_key() {
    let z = ZobristHasher::default();
    let a = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let b = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 37 90");
    assert_eq!(z.key(&a), z.key(&b));
}

#[test]
fn side_castling_and_en_passant_change_key() {
    let z = ZobristHasher::default();
    let base = z.key(&Position::from_fen(
        "r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq - 0 1",
    ));
    let black = z.key(&Position::from_fen(
        "r3k2r/8/8/3pP3/8/8/8/R3K2R b KQkq - 0 1",
    ));
    let no_castle = z.key(&Position::from_fen(
        "r3k2r/8/8/3pP3/8/8/8/R3K2R w Kkq - 0 1",
    ));
    let ep = z.key(&Position::from_fen(
        "r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1",
    ));
    assert_ne!(base, black);
    assert_ne!(base, no_castle);
    assert_ne!(base, ep);

    // Each feature contributes exactly its own constant.
    assert_eq!(base ^ black, z.side_key());
    assert_eq!(base ^ no_castle, z.castling_key(1));
    assert_eq!(base ^ ep, z.ep_key(3));
}

#[test]
fn transposed_move_orders_share_a_key() {
    let z = ZobristHasher::default();
    let play = |moves: &[(u8, u8)]| {
        let mut pos = Position::startpos();
        for &(from, to) in moves {
            pos.make_move(Move::new(from, to));
        }
        z.key(&pos)
    };
    // 1. Nf3 Nf6 2. Nc3 vs 1. Nc3 Nf6 2. Nf3
    let a = play(&[(6, 21), (62, 45), (1, 18)]);
    let b = play(&[(1, 18), (62, 45), (6, 21)]);
    assert_eq!(a, b);
}
