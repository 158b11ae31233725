//! Strategy selection by configuration.
//!
//! Maps a serialisable [`StrategyConfig`] onto the concrete strategies of the
//! engine crates, so a session can swap minimax, negamax, MCTS and the
//! baselines without code changes.

pub mod config;
pub mod error;

pub use config::{PlayersConfig, StrategyConfig};
pub use error::ConfigError;

pub use classical_engine::{
    GreedyEngine, MinimaxConfig, MinimaxEngine, NegamaxConfig, NegamaxEngine, ReplacementPolicy,
};
pub use mcts_engine::{MctsConfig, MctsEngine};
pub use random_engine::RandomEngine;
