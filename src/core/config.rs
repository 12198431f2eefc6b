//! Game configuration.
//!
//! A `GameConfig` fixes the table rules at construction time:
//! - `max_score`: the score that ends the game (150)
//! - `hand_size`: dominoes dealt to each player per hand (7)
//! - `max_pip`: highest pip value, so the set is double-`max_pip` (6)
//! - `seed`: seed for the deterministic stock shuffle
//!
//! Configs deserialize with defaults for missing fields, so a partial JSON
//! object such as `{"max_score": 100}` is valid.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Largest supported pip value. Keeps set sizes and `DominoId`s in `u8`.
pub const MAX_SUPPORTED_PIP: u8 = 18;

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Reaching this score ends the game.
    pub max_score: u32,

    /// Dominoes dealt to each player at the start of a hand.
    pub hand_size: usize,

    /// Highest pip value in the set.
    pub max_pip: u8,

    /// Seed for the stock shuffle.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_score: 150,
            hand_size: 7,
            max_pip: 6,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Create the standard double-six configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the game-ending score.
    #[must_use]
    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self
    }

    /// Set the number of dominoes dealt per player.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the highest pip value.
    #[must_use]
    pub fn with_max_pip(mut self, max_pip: u8) -> Self {
        self.max_pip = max_pip;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of dominoes in a double-`max_pip` set.
    ///
    /// ```
    /// use rust_muggins::core::GameConfig;
    ///
    /// assert_eq!(GameConfig::new().set_size(), 28);
    /// assert_eq!(GameConfig::new().with_max_pip(9).set_size(), 55);
    /// ```
    #[must_use]
    pub fn set_size(&self) -> usize {
        let n = self.max_pip as usize + 1;
        n * (n + 1) / 2
    }

    /// Check that a game can be dealt with this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        if self.max_pip > MAX_SUPPORTED_PIP {
            return Err(ConfigError::MaxPipTooLarge {
                max_pip: self.max_pip,
            });
        }
        let set_size = self.set_size();
        if self.hand_size * 2 > set_size {
            return Err(ConfigError::StockTooSmall {
                hand_size: self.hand_size,
                set_size,
            });
        }
        Ok(())
    }
}
