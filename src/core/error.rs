//! Error types.
//!
//! Every rejected operation leaves the game untouched: the controller
//! validates the whole request before mutating anything.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::End;
use crate::tiles::DominoId;

/// Invalid table configuration.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("hand size must be at least 1")]
    ZeroHandSize,

    #[error("max score must be at least 1")]
    ZeroMaxScore,

    #[error("max pip {max_pip} exceeds the supported maximum")]
    MaxPipTooLarge { max_pip: u8 },

    #[error("cannot deal {hand_size} dominoes to each player from a set of {set_size}")]
    StockTooSmall { hand_size: usize, set_size: usize },
}

/// A seat number outside the table.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("no player at seat index {index}")]
pub struct InvalidPlayerId {
    pub index: u8,
}

/// A play or block request that breaks the rules or the caller contract.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("the game has not been started")]
    NotStarted,

    #[error("the game is over")]
    GameOver,

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("{player} does not hold domino {domino}")]
    DominoNotInHand { player: PlayerId, domino: DominoId },

    #[error("an attach point is required once the spinner is down")]
    AttachRequired,

    #[error("the first domino of a hand cannot attach to anything")]
    AttachOnEmptyBoard,

    #[error("the {end} end is not open")]
    EndNotOpen { end: End },

    #[error("domino {domino} does not match {open} on the {end} end")]
    Mismatch { domino: DominoId, end: End, open: u8 },

    #[error("{player} has a legal play and cannot declare a block")]
    HasLegalPlay { player: PlayerId },

    #[error("domino {domino} is not part of the set")]
    NotInSet { domino: DominoId },

    #[error("domino {domino} appears more than once in the deal")]
    DuplicateDomino { domino: DominoId },

    #[error("{player} was dealt no dominoes")]
    EmptyDealtHand { player: PlayerId },
}

/// Result alias for rules operations.
pub type Result<T> = std::result::Result<T, RulesError>;
