//! Classical search strategies
//!
//! Alpha-beta search over the shared evaluator, in three flavours:
//! - [`MinimaxEngine`]: explicit maximiser/minimiser, no caching
//! - [`NegamaxEngine`]: sign-flipping formulation backed by a transposition table
//! - [`GreedyEngine`]: one-ply lookahead, the cheapest heuristic opponent

mod greedy;
mod minimax;
mod negamax;
mod tt;

use chess_core::{Color, Position, SearchResult, Strategy, ZobristHasher};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use tt::{ReplacementPolicy, ScoreTable, TtEntry};

/// Window bound; wider than any evaluation, mate included.
pub(crate) const INFINITY: i32 = 1_000_000;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Search depth in plies
    pub depth: u8,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegamaxConfig {
    /// Search depth in plies
    pub depth: u8,
    /// How a recomputed score treats an existing table entry
    pub replacement: ReplacementPolicy,
}

impl Default for NegamaxConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            replacement: ReplacementPolicy::default(),
        }
    }
}

// =============================================================================
// Minimax
// =============================================================================

/// Depth-bounded minimax with alpha-beta pruning and captures-first ordering.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    config: MinimaxConfig,
}

impl MinimaxEngine {
    pub fn new(config: MinimaxConfig) -> Self {
        Self { config }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(MinimaxConfig { depth })
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }
}

impl Strategy for MinimaxEngine {
    fn select_move(&mut self, pos: &mut Position, side: Color) -> SearchResult {
        let depth = self.config.depth.max(1);
        let mut nodes = 0;
        let found = minimax::pick_best_move(pos, side, depth, &mut nodes);

        debug!(
            strategy = self.name(),
            depth,
            nodes,
            best_move = ?found.map(|(mv, _)| mv.to_string()),
            score = found.map_or(0, |(_, s)| s),
            "search complete"
        );

        SearchResult {
            best_move: found.map(|(mv, _)| mv),
            score: found.map_or(0, |(_, s)| s),
            depth,
            nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

// =============================================================================
// Negamax
// =============================================================================

/// Negamax with alpha-beta pruning and a Zobrist-keyed score table.
///
/// The table outlives individual searches: entries stored while choosing one
/// move are reused by the next call, until [`Strategy::new_game`] clears it.
#[derive(Debug, Clone)]
pub struct NegamaxEngine {
    config: NegamaxConfig,
    hasher: ZobristHasher,
    table: ScoreTable,
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(NegamaxConfig::default())
    }
}

impl NegamaxEngine {
    pub fn new(config: NegamaxConfig) -> Self {
        Self::with_hasher(config, ZobristHasher::default())
    }

    pub fn with_hasher(config: NegamaxConfig, hasher: ZobristHasher) -> Self {
        let table = ScoreTable::new(config.replacement);
        Self {
            config,
            hasher,
            table,
        }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(NegamaxConfig {
            depth,
            ..NegamaxConfig::default()
        })
    }

    pub fn config(&self) -> &NegamaxConfig {
        &self.config
    }

    /// Changes the depth of later searches; the table is kept.
    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    pub fn hasher(&self) -> &ZobristHasher {
        &self.hasher
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }
}

impl Strategy for NegamaxEngine {
    fn select_move(&mut self, pos: &mut Position, side: Color) -> SearchResult {
        let depth = self.config.depth.max(1);
        let mut ctx = negamax::SearchContext {
            hasher: &self.hasher,
            table: &mut self.table,
            nodes: 0,
        };
        let found = negamax::pick_best_move(pos, depth, &mut ctx);
        let nodes = ctx.nodes;

        // Scores come back from the mover's side; report them for `side`.
        let flip = if side == pos.side_to_move { 1 } else { -1 };
        let score = found.map_or(0, |(_, s)| s * flip);

        debug!(
            strategy = "Negamax",
            depth,
            nodes,
            table_entries = self.table.len(),
            best_move = ?found.map(|(mv, _)| mv.to_string()),
            score,
            "search complete"
        );

        SearchResult {
            best_move: found.map(|(mv, _)| mv),
            score,
            depth,
            nodes,
        }
    }

    fn name(&self) -> &str {
        "Negamax"
    }

    fn new_game(&mut self) {
        self.table.clear();
    }
}

// =============================================================================
// Greedy
// =============================================================================

/// Plays the move with the best static evaluation one ply ahead.
#[derive(Debug, Clone, Default)]
pub struct GreedyEngine;

impl GreedyEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for GreedyEngine {
    fn select_move(&mut self, pos: &mut Position, side: Color) -> SearchResult {
        let mut nodes = 0;
        let found = greedy::pick_best_move(pos, side, &mut nodes);

        debug!(
            strategy = self.name(),
            nodes,
            best_move = ?found.map(|(mv, _)| mv.to_string()),
            "search complete"
        );

        SearchResult {
            best_move: found.map(|(mv, _)| mv),
            score: found.map_or(0, |(_, s)| s),
            depth: 1,
            nodes,
        }
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
