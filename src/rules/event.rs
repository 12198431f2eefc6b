//! Game events and observers.
//!
//! The controller never touches presentation state. Everything a display
//! needs (most importantly the score pair after every change) is pushed to
//! a `GameObserver` injected at construction.
//!
//! ```
//! use rust_muggins::core::GameConfig;
//! use rust_muggins::rules::{Controller, GameEvent};
//!
//! let mut last_scores = None;
//! let mut controller = Controller::with_observer(GameConfig::new(), |event: &GameEvent| {
//!     if let GameEvent::ScoreChanged { player1, player2 } = event {
//!         last_scores = Some((*player1, *player2));
//!     }
//! })
//! .unwrap();
//! controller.start_game();
//! drop(controller);
//!
//! assert_eq!(last_scores, Some((0, 0)));
//! ```

use serde::{Deserialize, Serialize};

use super::turn::{GameResult, HandResult};
use crate::board::End;
use crate::core::PlayerId;
use crate::tiles::DominoId;

/// Something that happened at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Scores were reset for a new game.
    GameStarted,

    /// A hand was dealt.
    HandStarted { hand: u32, opener: PlayerId },

    /// A domino went onto the board.
    Played {
        player: PlayerId,
        domino: DominoId,
        attach: Option<End>,
        open_end_sum: u32,
    },

    /// Either score changed. Carries both totals for display.
    ScoreChanged { player1: u32, player2: u32 },

    /// A player with no playable domino drew from the stock.
    Drew { player: PlayerId, domino: DominoId },

    /// A player could not play.
    Blocked { player: PlayerId },

    HandEnded { result: HandResult },

    GameEnded { result: GameResult },
}

/// Receives game events from the controller.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Records every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score pairs in the order they were reported.
    pub fn score_changes(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::ScoreChanged { player1, player2 } => Some((*player1, *player2)),
            _ => None,
        })
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
