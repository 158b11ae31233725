//! Negamax search with alpha-beta pruning and a transposition table.
//!
//! Every call returns a score from the perspective of the side to move at
//! that node; the caller negates it and swaps the window.

use chess_core::{evaluate_for, ordered_moves, Move, Position, ZobristHasher};

use crate::tt::ScoreTable;
use crate::INFINITY;

/// Shared state threaded through one search.
pub struct SearchContext<'a> {
    pub hasher: &'a ZobristHasher,
    pub table: &'a mut ScoreTable,
    pub nodes: u64,
}

/// Searches the position and returns the best move with its score from the
/// side to move's perspective.
///
/// The root is always expanded so a move can be reported; its score is
/// stored in the table like any other node once the loop completes.
pub fn pick_best_move(
    pos: &mut Position,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> Option<(Move, i32)> {
    ctx.nodes += 1;
    let moves = ordered_moves(pos);
    let first = *moves.first()?;

    let depth = depth.max(1);
    let mut best = (first, -INFINITY);
    let mut alpha = -INFINITY;

    for mv in moves {
        let score = -negamax(&mut pos.play(mv), depth - 1, -INFINITY, -alpha, ctx);

        // Strict improvement: ties keep the earlier move.
        if score > best.1 {
            best = (mv, score);
        }
        alpha = alpha.max(best.1);
    }

    let key = ctx.hasher.key(pos);
    ctx.table.store(key, depth, best.1);

    Some(best)
}

fn negamax(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    let key = ctx.hasher.key(pos);
    if let Some(score) = ctx.table.probe(key, depth) {
        return score;
    }

    ctx.nodes += 1;

    if depth == 0 || pos.is_game_over() {
        let stm = pos.side_to_move;
        let score = evaluate_for(pos, stm);
        ctx.table.store(key, depth, score);
        return score;
    }

    let mut best = -INFINITY;
    for mv in ordered_moves(pos) {
        let score = -negamax(&mut pos.play(mv), depth - 1, -beta, -alpha, ctx);

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    ctx.table.store(key, depth, best);
    best
}
