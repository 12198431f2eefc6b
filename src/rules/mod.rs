//! Rules of two-player All-Fives.
//!
//! - `scoring`: per-play and end-of-hand points
//! - `turn`: turn states, hand and game results
//! - `event`: events and the observer seam for presentation code
//! - `controller`: the state machine that ties them together

pub mod scoring;
pub mod turn;
pub mod event;
pub mod controller;

pub use scoring::{block_award, domino_out_points, play_points, round_to_five};
pub use turn::{GameResult, HandResult, PlayOutcome, TurnState};
pub use event::{EventLog, GameEvent, GameObserver, NullObserver};
pub use controller::{Controller, Deal};
