//! Random Move Strategy
//!
//! Selects moves uniformly at random from all legal moves.
//! Useful for:
//! - Baseline comparisons (any real strategy should easily beat this)
//! - Legality oracles in tests
//! - Stress testing move generation

use chess_core::{legal_moves_into, Color, Position, SearchResult, Strategy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// A strategy that plays random legal moves.
///
/// There is no evaluation; it simply picks one of the available legal moves.
/// Without a seed it draws from the thread-local generator; with one, the
/// sequence of choices is reproducible.
#[derive(Debug, Clone, Default)]
pub struct RandomEngine {
    rng: Option<StdRng>,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self { rng: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Strategy for RandomEngine {
    fn select_move(&mut self, pos: &mut Position, _side: Color) -> SearchResult {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);

        let best_move = match self.rng.as_mut() {
            Some(rng) => moves.choose(rng).copied(),
            None => moves.choose(&mut thread_rng()).copied(),
        };

        debug!(
            strategy = "Random",
            legal = moves.len(),
            best_move = ?best_move.map(|mv| mv.to_string()),
            "move chosen"
        );

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: 1,
        }
    }

    fn name(&self) -> &str {
        "Random"
    }
}
