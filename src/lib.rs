//! # rust-muggins
//!
//! Rules engine for two-player All-Fives ("Muggins") dominoes.
//!
//! ## Rules in brief
//!
//! 1. **Per-play scoring**: after every play the pips showing at the open
//!    ends are summed. A multiple of five scores that many points.
//!
//! 2. **Domino out**: emptying your hand scores the pips left in your
//!    opponent's hand, rounded to the nearest five.
//!
//! 3. **Blocked hand**: when neither player can play, the lighter hand
//!    scores the rounded difference.
//!
//! 4. **Game end**: the first hand that takes a player to 150 ends the game.
//!
//! ## Architecture
//!
//! - The board is two explicit runs (spine and spur) joined at the spinner,
//!   which is tracked by identity.
//! - Placements are a tagged union, so a vertical tile has no left/right.
//! - The controller is the only mutator. Presentation code drives it with
//!   `start_game`, `play_domino` and `player_is_blocked`, and listens to
//!   `GameEvent`s through an injected observer.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `tiles`: dominoes, hands, the stock
//! - `board`: spine, spur, open ends, open-end sum
//! - `rules`: scoring, events and the turn controller

pub mod core;
pub mod tiles;
pub mod board;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameRng, GameRngState, InvalidPlayerId, PlayerId, PlayerMap, Result,
    RulesError,
};

pub use crate::tiles::{Domino, DominoId, Hand, Orientation, PlacedDomino, Placement, Stock};

pub use crate::board::{Board, End};

pub use crate::rules::{
    round_to_five, Controller, Deal, EventLog, GameEvent, GameObserver, GameResult, HandResult,
    NullObserver, PlayOutcome, TurnState,
};
