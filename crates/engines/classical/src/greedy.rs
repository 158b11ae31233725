//! One-ply lookahead: play each move and keep the one the evaluator likes best.

use chess_core::{evaluate_for, legal_moves, Color, Move, Position};

pub fn pick_best_move(pos: &mut Position, side: Color, nodes: &mut u64) -> Option<(Move, i32)> {
    let mut best: Option<(Move, i32)> = None;

    for mv in legal_moves(pos) {
        *nodes += 1;
        let score = evaluate_for(&mut pos.play(mv), side);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    best
}
