//! Static position evaluation.
//!
//! Scores are in centipawns from White's point of view: positive favours
//! White. Callers that search for Black negate the result (see
//! [`evaluate_for`]).
//!
//! The score is the sum of four independent terms:
//! - material plus piece-square bonuses,
//! - mobility (difference in legal-move counts),
//! - pawn structure (doubled, isolated and passed pawns),
//! - a bonus for the side giving check.
//!
//! A checkmated position short-circuits to [`MATE_SCORE`].

use crate::{board::Position, movegen::legal_moves_into, types::*};

/// Score of a forced win. Larger than any sum of ordinary terms, so mates
/// compare correctly against material at every depth.
pub const MATE_SCORE: i32 = 10_000;

/// Added for the side that has just given check.
pub const CHECK_BONUS: i32 = 25;

/// Centipawns per legal move of difference between the two sides.
pub const MOBILITY_WEIGHT: i32 = 2;

pub const DOUBLED_PAWN_PENALTY: i32 = 15;
pub const ISOLATED_PAWN_PENALTY: i32 = 15;

/// Passed-pawn bonus indexed by rank as seen from the pawn's own side.
pub const PASSED_PAWN_BONUS: [i32; 8] = [0, 10, 20, 35, 60, 100, 180, 0];

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

// Piece-square tables from White's side, a1 = index 0 ... h8 = index 63.
// Black reads them through `mirror_sq`.
#[rustfmt::skip]
const PST_PAWN: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5, -5,  0,  0, -5, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];
#[rustfmt::skip]
const PST_KNIGHT: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];
#[rustfmt::skip]
const PST_BISHOP: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];
#[rustfmt::skip]
const PST_ROOK: [i32; 64] = [
     0,  0,  5, 10, 10,  5,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];
#[rustfmt::skip]
const PST_QUEEN: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];
#[rustfmt::skip]
const PST_KING: [i32; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];

const PST: [&[i32; 64]; 6] = [
    &PST_PAWN,
    &PST_KNIGHT,
    &PST_BISHOP,
    &PST_ROOK,
    &PST_QUEEN,
    &PST_KING,
];

/// Evaluates the position from White's perspective.
///
/// Takes the position mutably only to count the opponent's moves behind a
/// passed turn; it is returned unchanged.
pub fn evaluate(pos: &mut Position) -> i32 {
    if pos.is_checkmate() {
        // The side to move has been mated.
        return -MATE_SCORE * pos.side_to_move.sign();
    }

    material_pst(pos) + mobility(pos) + pawn_structure(pos) + check_bonus(pos)
}

/// [`evaluate`] adapted to `side`'s point of view.
pub fn evaluate_for(pos: &mut Position, side: Color) -> i32 {
    evaluate(pos) * side.sign()
}

/// Material plus piece-square bonus, White minus Black.
pub fn material_pst(pos: &Position) -> i32 {
    let mut score = 0;
    for (i, pc) in pos.board.iter().enumerate() {
        let Some(pc) = pc else { continue };
        let k = pc.kind.idx();
        let sq = i as u8;
        score += match pc.color {
            Color::White => PIECE_VALUES[k] + PST[k][sq as usize],
            Color::Black => -(PIECE_VALUES[k] + PST[k][mirror_sq(sq) as usize]),
        };
    }
    score
}

/// Legal-move count difference, White minus Black, scaled by [`MOBILITY_WEIGHT`].
///
/// The opponent's moves are counted by passing the turn; the pass is undone
/// before returning.
pub fn mobility(pos: &mut Position) -> i32 {
    let mut buf = Vec::with_capacity(64);
    let mover = pos.side_to_move;

    legal_moves_into(pos, &mut buf);
    let own = buf.len() as i32;
    let theirs = {
        let mut passed = pos.pass_turn();
        legal_moves_into(&mut passed, &mut buf);
        buf.len() as i32
    };

    MOBILITY_WEIGHT * (own - theirs) * mover.sign()
}

/// Doubled, isolated and passed pawns, White minus Black.
pub fn pawn_structure(pos: &Position) -> i32 {
    let mut files = [[0i32; 8]; 2];
    for c in Color::ALL {
        for s in pos.pieces(c, PieceKind::Pawn) {
            files[c.idx()][file_of(s) as usize] += 1;
        }
    }

    let mut score = 0;
    for c in Color::ALL {
        let counts = &files[c.idx()];
        let mut side = 0;
        for f in 0..8 {
            let n = counts[f];
            if n == 0 {
                continue;
            }
            if n > 1 {
                side -= DOUBLED_PAWN_PENALTY * (n - 1);
            }
            let left = if f > 0 { counts[f - 1] } else { 0 };
            let right = if f < 7 { counts[f + 1] } else { 0 };
            if left == 0 && right == 0 {
                side -= ISOLATED_PAWN_PENALTY;
            }
        }
        for s in pos.pieces(c, PieceKind::Pawn) {
            if is_passed(pos, s, c) {
                let rank = match c {
                    Color::White => rank_of(s),
                    Color::Black => 7 - rank_of(s),
                };
                side += PASSED_PAWN_BONUS[rank as usize];
            }
        }
        score += side * c.sign();
    }
    score
}

/// No enemy pawn ahead of `s` on its own or either adjacent file.
fn is_passed(pos: &Position, s: u8, c: Color) -> bool {
    let enemy = Piece {
        color: c.other(),
        kind: PieceKind::Pawn,
    };
    let f = file_of(s);
    let r = rank_of(s);
    let ahead: Vec<i8> = match c {
        Color::White => (r + 1..8).collect(),
        Color::Black => (0..r).collect(),
    };
    for df in [-1, 0, 1] {
        for &rr in &ahead {
            if let Some(t) = sq(f + df, rr)
                && pos.piece_at(t) == Some(enemy)
            {
                return false;
            }
        }
    }
    true
}

/// [`CHECK_BONUS`] for the side that delivered check, from White's view.
pub fn check_bonus(pos: &Position) -> i32 {
    if pos.in_check(pos.side_to_move) {
        -CHECK_BONUS * pos.side_to_move.sign()
    } else {
        0
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
