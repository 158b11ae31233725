use super::*;
use crate::movegen::legal_moves;

#[test]
fn fen_round_trips_startpos() {
    let parsed = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(parsed, Position::startpos());
}

#[test]
fn try_from_fen_reports_errors() {
    assert_eq!(
        Position::try_from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(
        Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -"),
        Err(FenError::SideToMove("x".to_string()))
    );
    assert_eq!(
        Position::try_from_fen("rnbqkbnr/ppppXppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
        Err(FenError::PieceChar('X'))
    );
    assert_eq!(
        Position::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
        Err(FenError::RankLength(1))
    );
    assert!(matches!(
        Position::try_from_fen("8/8"),
        Err(FenError::MissingFields(1))
    ));
}

#[test]
fn make_unmake_restores_every_move() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
        "4k3/1P6/8/8/8/8/6p1/4K3 b - - 0 1",
    ];
    for fen in fens {
        let mut pos = Position::from_fen(fen);
        let before = pos.clone();
        for mv in legal_moves(&pos) {
            let undo = pos.make_move(mv);
            pos.unmake_move(mv, undo);
            assert_eq!(pos, before, "{mv} not restored in {fen}");
        }
    }
}

#[test]
fn move_guard_undoes_on_drop() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    {
        let child = pos.play(Move::new(12, 28)); // e2e4
        assert_eq!(child.side_to_move, Color::Black);
        assert_eq!(child.en_passant, Some(20));
        assert_eq!(child.mv().to_string(), "e2e4");
    }
    assert_eq!(pos, before);
}

#[test]
fn nested_guards_unwind_in_order() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    {
        let mut a = pos.play(Move::new(12, 28)); // e2e4
        let b = a.play(Move::new(51, 35)); // d7d5
        assert!(b.is_capture(Move::new(28, 35)));
    }
    assert_eq!(pos, before);
}

#[test]
fn pass_turn_is_reversible() {
    let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let before = pos.clone();
    {
        let passed = pos.pass_turn();
        assert_eq!(passed.side_to_move, Color::Black);
        assert_eq!(passed.en_passant, None);
    }
    assert_eq!(pos, before);
}

#[test]
fn castling_moves_rook_and_clears_rights() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mut castle = Move::new(4, 6);
    castle.is_castle = true;
    let child = pos.play(castle);
    assert_eq!(
        child.piece_at(5),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Rook
        })
    );
    assert!(child.piece_at(7).is_none());
    assert!(!child.castling.wk && !child.castling.wq);
    assert!(child.castling.bk && child.castling.bq);
}

#[test]
fn mirrored_twice_is_identity() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K1R1 b Qk - 4 9");
    assert_eq!(pos.mirrored().mirrored(), pos);
    let m = pos.mirrored();
    assert_eq!(m.side_to_move, Color::White);
    assert!(m.castling.wk && !m.castling.wq && !m.castling.bk && m.castling.bq);
}

#[test]
fn pieces_lists_squares_of_kind() {
    let pos = Position::startpos();
    let knights: Vec<u8> = pos.pieces(Color::White, PieceKind::Knight).collect();
    assert_eq!(knights, vec![1, 6]);
    assert_eq!(pos.king_sq(Color::Black), Some(60));
}
