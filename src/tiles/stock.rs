//! The shared stock (boneyard).
//!
//! Shuffling replenishes the stock with a complete set before reordering
//! it, so every hand is dealt from all of the dominoes. Draws come off the
//! end of the vec.

use serde::{Deserialize, Serialize};

use super::domino::Domino;
use super::hand::Hand;
use crate::core::GameRng;

/// Undealt dominoes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    max_pip: u8,
    dominoes: Vec<Domino>,
}

impl Stock {
    /// Create an empty stock for a double-`max_pip` set.
    ///
    /// Call `shuffle` before dealing.
    #[must_use]
    pub fn new(max_pip: u8) -> Self {
        Self {
            max_pip,
            dominoes: Vec::new(),
        }
    }

    /// Create a stock with a fixed draw order (top = end of vec).
    #[must_use]
    pub fn from_dominoes(max_pip: u8, dominoes: Vec<Domino>) -> Self {
        Self { max_pip, dominoes }
    }

    /// Replenish with the full set and shuffle.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        self.dominoes = Domino::full_set(self.max_pip);
        rng.shuffle(&mut self.dominoes);
    }

    /// Take the top domino, or `None` when the stock is exhausted.
    pub fn draw(&mut self) -> Option<Domino> {
        self.dominoes.pop()
    }

    /// Draw up to `count` dominoes into `hand`.
    ///
    /// Returns the number actually dealt.
    pub fn deal(&mut self, hand: &mut Hand, count: usize) -> usize {
        let mut dealt = 0;
        while dealt < count {
            let Some(domino) = self.draw() else {
                break;
            };
            hand.add(domino);
            dealt += 1;
        }
        dealt
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dominoes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dominoes.is_empty()
    }

    /// Remaining dominoes, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &Domino> {
        self.dominoes.iter()
    }
}
