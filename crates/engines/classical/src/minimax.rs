//! Two-player minimax with alpha-beta pruning.
//!
//! Every node is scored from the searching side's perspective; the searching
//! side maximises and its opponent minimises.

use chess_core::{evaluate_for, ordered_moves, Color, Move, Position};

use crate::INFINITY;

/// Searches the position and returns the best move with its score.
///
/// # Arguments
/// * `pos` - The position to search (restored before returning)
/// * `side` - The side the score is computed for
/// * `depth` - Maximum search depth in plies
/// * `nodes` - Counter for nodes searched (for statistics)
///
/// # Returns
/// `None` if there is no legal move, otherwise the first root move that
/// reached the best score.
pub fn pick_best_move(
    pos: &mut Position,
    side: Color,
    depth: u8,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    *nodes += 1;
    let moves = ordered_moves(pos);
    let first = *moves.first()?;

    let mut best = (first, -INFINITY);
    let mut alpha = -INFINITY;

    for mv in moves {
        let score = minimax(
            &mut pos.play(mv),
            side,
            depth.saturating_sub(1),
            alpha,
            INFINITY,
            false,
            nodes,
        );

        // Strict improvement: ties keep the earlier move.
        if score > best.1 {
            best = (mv, score);
        }
        alpha = alpha.max(best.1);
    }

    Some(best)
}

fn minimax(
    pos: &mut Position,
    side: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if depth == 0 || pos.is_game_over() {
        return evaluate_for(pos, side);
    }

    let moves = ordered_moves(pos);

    if maximizing {
        let mut best = -INFINITY;
        for mv in moves {
            let score = minimax(&mut pos.play(mv), side, depth - 1, alpha, beta, false, nodes);
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for mv in moves {
            let score = minimax(&mut pos.play(mv), side, depth - 1, alpha, beta, true, nodes);
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        best
    }
}
