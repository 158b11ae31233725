pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod ordering;
pub mod perft;
pub mod status;
pub mod tt;
pub mod types;
pub mod zobrist;

// Re-export the rules engine and the pieces every strategy builds on
pub use board::*;
pub use error::FenError;
pub use eval::{MATE_SCORE, evaluate, evaluate_for};
pub use movegen::*;
pub use ordering::{captures_first, ordered_moves};
pub use perft::perft;
pub use status::Outcome;
pub use tt::TranspositionTable;
pub use types::*;
pub use zobrist::{DEFAULT_ZOBRIST_SEED, ZobristHasher, ZobristKey};

// =============================================================================
// Strategy trait, implemented by every move selector
// =============================================================================

/// Result of a move selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move (None if the side to move has no legal move)
    pub best_move: Option<Move>,
    /// Score in centipawns from the searching side's perspective.
    /// Strategies without a centipawn estimate report 0.
    pub score: i32,
    /// Search depth in plies (1 for one-ply and sampling strategies)
    pub depth: u8,
    /// Number of nodes visited, for instrumentation
    pub nodes: u64,
}

impl SearchResult {
    /// The explicit "no legal move" result (checkmate or stalemate).
    pub fn no_move(depth: u8, nodes: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth,
            nodes,
        }
    }
}

/// Trait that all move-selection strategies implement.
///
/// This allows swapping between alpha-beta searches, Monte Carlo tree search
/// and the random baseline behind one call.
pub trait Strategy: Send {
    /// Choose a move for `side` in `pos`.
    ///
    /// The position is borrowed mutably so a search can explore by applying
    /// and undoing moves in place; it is identical to the input on return.
    fn select_move(&mut self, pos: &mut Position, side: Color) -> SearchResult;

    /// Returns the strategy's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear transposition tables, node arenas, etc.)
    fn new_game(&mut self) {}
}
