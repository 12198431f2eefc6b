//! Turn states and operation outcomes.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::tiles::DominoId;

/// Where the controller is in the game.
///
/// `HandEnded` is passed through while a finished hand is scored; the next
/// hand is dealt in the same operation unless the game is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    NotStarted,
    AwaitingPlayer1Play,
    AwaitingPlayer2Play,
    HandEnded,
    GameEnded,
}

impl TurnState {
    /// The state waiting on `player`.
    #[must_use]
    pub const fn awaiting(player: PlayerId) -> Self {
        match player.index() {
            0 => TurnState::AwaitingPlayer1Play,
            _ => TurnState::AwaitingPlayer2Play,
        }
    }

    /// The player expected to act, if any.
    #[must_use]
    pub const fn active_player(self) -> Option<PlayerId> {
        match self {
            TurnState::AwaitingPlayer1Play => Some(PlayerId::ONE),
            TurnState::AwaitingPlayer2Play => Some(PlayerId::TWO),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnState::GameEnded)
    }
}

/// How a hand finished and who scored for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandResult {
    /// `winner` played their last domino.
    DominoOut {
        winner: PlayerId,
        /// Pips left in the opponent's hand.
        opponent_pips: u32,
        award: u32,
    },
    /// Neither player could play.
    Blocked {
        /// The player holding fewer pips, `None` on a tie.
        awardee: Option<PlayerId>,
        pip_totals: PlayerMap<u32>,
        award: u32,
    },
}

impl HandResult {
    /// The player who scored for the hand.
    #[must_use]
    pub fn scorer(&self) -> Option<PlayerId> {
        match self {
            HandResult::DominoOut { winner, .. } => Some(*winner),
            HandResult::Blocked { awardee, .. } => *awardee,
        }
    }

    #[must_use]
    pub fn award(&self) -> u32 {
        match self {
            HandResult::DominoOut { award, .. } | HandResult::Blocked { award, .. } => *award,
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players finished level.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// What a successful `play_domino` or `player_is_blocked` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Points the acting player scored with this play (open ends plus any
    /// domino-out award).
    pub points: u32,

    /// Set when the operation finished the hand.
    pub hand_result: Option<HandResult>,

    /// A domino the next player was forced to draw.
    pub drawn: Option<(PlayerId, DominoId)>,

    /// State after the operation.
    pub state: TurnState,
}
