//! Strategy configuration schema.
//!
//! A players file names one strategy per colour:
//!
//! ```toml
//! [white]
//! kind = "negamax"
//! depth = 4
//! replacement = "prefer_deeper"
//!
//! [black]
//! kind = "mcts"
//! simulations = 400
//! seed = 7
//! ```
//!
//! Omitted fields take the defaults of the strategy's own config type.

use std::path::Path;

use chess_core::{Color, Strategy};
use classical_engine::{
    GreedyEngine, MinimaxConfig, MinimaxEngine, NegamaxConfig, NegamaxEngine,
};
use mcts_engine::{MctsConfig, MctsEngine};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// One strategy and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Uniform random legal moves.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// One-ply evaluation.
    Greedy,
    Minimax(MinimaxConfig),
    Negamax(NegamaxConfig),
    Mcts(MctsConfig),
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Negamax(NegamaxConfig::default())
    }
}

impl StrategyConfig {
    /// The `kind` tag as written in configuration files.
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyConfig::Random { .. } => "random",
            StrategyConfig::Greedy => "greedy",
            StrategyConfig::Minimax(_) => "minimax",
            StrategyConfig::Negamax(_) => "negamax",
            StrategyConfig::Mcts(_) => "mcts",
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            StrategyConfig::Minimax(MinimaxConfig { depth })
            | StrategyConfig::Negamax(NegamaxConfig { depth, .. }) => {
                if *depth == 0 {
                    return Err(ConfigError::invalid("depth", "must be at least 1"));
                }
            }
            StrategyConfig::Mcts(cfg) => {
                if !cfg.exploration.is_finite() || cfg.exploration < 0.0 {
                    return Err(ConfigError::invalid(
                        "exploration",
                        format!("must be a finite, non-negative number (got {})", cfg.exploration),
                    ));
                }
                if cfg.top_k == 0 {
                    return Err(ConfigError::invalid("top_k", "must be at least 1"));
                }
            }
            StrategyConfig::Random { .. } | StrategyConfig::Greedy => {}
        }
        Ok(())
    }

    /// Validates and constructs the strategy.
    pub fn build(&self) -> Result<Box<dyn Strategy>, ConfigError> {
        self.validate()?;
        let strategy: Box<dyn Strategy> = match self {
            StrategyConfig::Random { seed: Some(seed) } => Box::new(RandomEngine::with_seed(*seed)),
            StrategyConfig::Random { seed: None } => Box::new(RandomEngine::new()),
            StrategyConfig::Greedy => Box::new(GreedyEngine::new()),
            StrategyConfig::Minimax(cfg) => Box::new(MinimaxEngine::new(cfg.clone())),
            StrategyConfig::Negamax(cfg) => Box::new(NegamaxEngine::new(cfg.clone())),
            StrategyConfig::Mcts(cfg) => Box::new(MctsEngine::new(cfg.clone())),
        };
        Ok(strategy)
    }
}

/// Strategy assignment for both sides of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub white: StrategyConfig,
    pub black: StrategyConfig,
}

impl PlayersConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: PlayersConfig = toml::from_str(s)?;
        Ok(config)
    }

    pub fn side(&self, color: Color) -> &StrategyConfig {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.white.validate()?;
        self.black.validate()
    }

    /// Builds `(white, black)`.
    pub fn build(&self) -> Result<(Box<dyn Strategy>, Box<dyn Strategy>), ConfigError> {
        let white = self.white.build()?;
        let black = self.black.build()?;
        debug!(white = white.name(), black = black.name(), "players configured");
        Ok((white, black))
    }
}
