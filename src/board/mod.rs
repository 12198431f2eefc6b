//! The board: played dominoes, open ends and the open-end sum.
//!
//! The board is two explicit runs, the horizontal spine and the vertical
//! spur, joined at the spinner. The spinner is tracked by `DominoId` so
//! repeated pip values never confuse the junction check.

pub mod layout;

pub use layout::{Board, End};
