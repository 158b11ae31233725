//! Monte Carlo tree search strategy.
//!
//! The design uses:
//! - UCT selection with unvisited children tried first
//! - Capture-biased random playouts capped in length, scored by the shared
//!   evaluator when they do not finish
//! - Arena-backed node storage with Zobrist-keyed reuse across calls

pub mod arena;
pub mod mcts;
pub mod node;

use chess_core::{Color, Position, SearchResult, Strategy, ZobristHasher};
use tracing::{debug, warn};

pub use mcts::{
    eval_reward, outcome_reward, pick_root_move, Mcts, MctsConfig, RootChoice, SearchOutcome,
};

/// [`Strategy`] front-end for [`Mcts`].
///
/// The node table persists across moves of one game; [`Strategy::new_game`]
/// drops it.
pub struct MctsEngine {
    mcts: Mcts,
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl MctsEngine {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            mcts: Mcts::new(config),
        }
    }

    pub fn with_hasher(config: MctsConfig, hasher: ZobristHasher) -> Self {
        Self {
            mcts: Mcts::with_hasher(config, hasher),
        }
    }

    pub fn mcts(&self) -> &Mcts {
        &self.mcts
    }

    /// Full search summary, for callers that want more than the move.
    pub fn search(&mut self, pos: &Position, side: Color) -> SearchOutcome {
        self.mcts.search(pos, side)
    }
}

impl Strategy for MctsEngine {
    fn select_move(&mut self, pos: &mut Position, side: Color) -> SearchResult {
        let outcome = self.mcts.search(pos, side);

        match outcome.choice {
            RootChoice::LegalChild(mv) => {
                warn!(chosen = %mv, "most visited root child is not legal; using best legal child")
            }
            RootChoice::Random(Some(mv)) => warn!(
                chosen = %mv,
                root_visits = outcome.root_visits,
                "no usable root child; falling back to a random legal move"
            ),
            RootChoice::MostVisited(_) | RootChoice::Random(None) => {}
        }

        debug!(
            strategy = "MCTS",
            simulations = self.mcts.config().simulations,
            nodes = outcome.nodes,
            max_depth = outcome.max_depth,
            table_entries = outcome.table_entries,
            best_move = ?outcome.choice.mv().map(|m| m.to_string()),
            "search complete"
        );

        SearchResult {
            best_move: outcome.choice.mv(),
            score: 0,
            depth: outcome.max_depth,
            nodes: outcome.nodes,
        }
    }

    fn name(&self) -> &str {
        "MCTS"
    }

    fn new_game(&mut self) {
        self.mcts.reset();
    }
}
