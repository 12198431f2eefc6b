//! All-Fives scoring.
//!
//! Two kinds of points:
//! - **Per play**: the open-end sum, awarded only when it is already a
//!   multiple of five.
//! - **End of hand**: the pips left in the loser's hand (domino out) or the
//!   difference between the two hands (mutual block), rounded to the
//!   nearest five with `round_to_five`.

use crate::core::{PlayerId, PlayerMap};
use crate::tiles::Hand;

/// Round to a multiple of five: remainders 0-2 round down, 3-4 round up.
///
/// ```
/// use rust_muggins::rules::round_to_five;
///
/// assert_eq!(round_to_five(22), 20);
/// assert_eq!(round_to_five(23), 25);
/// assert_eq!(round_to_five(25), 25);
/// ```
#[must_use]
pub const fn round_to_five(points: u32) -> u32 {
    let rem = points % 5;
    if rem < 3 {
        points - rem
    } else {
        points + (5 - rem)
    }
}

/// Points for a play leaving `open_end_sum` showing.
///
/// No rounding: a sum of 13 scores nothing.
#[must_use]
pub const fn play_points(open_end_sum: u32) -> u32 {
    if open_end_sum % 5 == 0 {
        open_end_sum
    } else {
        0
    }
}

/// Points for going out while the opponent still holds `opponent_hand`.
#[must_use]
pub fn domino_out_points(opponent_hand: &Hand) -> u32 {
    round_to_five(opponent_hand.pip_total())
}

/// Award for a hand ending with both players blocked.
///
/// The player holding fewer pips scores the rounded difference. Returns
/// `None` when the totals are equal.
#[must_use]
pub fn block_award(pip_totals: &PlayerMap<u32>) -> Option<(PlayerId, u32)> {
    let one = pip_totals[PlayerId::ONE];
    let two = pip_totals[PlayerId::TWO];
    match one.cmp(&two) {
        std::cmp::Ordering::Less => Some((PlayerId::ONE, round_to_five(two - one))),
        std::cmp::Ordering::Greater => Some((PlayerId::TWO, round_to_five(one - two))),
        std::cmp::Ordering::Equal => None,
    }
}
