//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by the tile, board and rules
//! modules.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, MAX_SUPPORTED_PIP};
pub use error::{ConfigError, InvalidPlayerId, Result, RulesError};
