//! A player's hand.
//!
//! Order is irrelevant; dominoes are looked up by `DominoId`. Storage is
//! inline for the usual deal of seven plus a forced draw.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::domino::{Domino, DominoId};
use crate::board::Board;

/// The dominoes one player holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    dominoes: SmallVec<[Domino; 8]>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding the given dominoes.
    #[must_use]
    pub fn from_dominoes(dominoes: impl IntoIterator<Item = Domino>) -> Self {
        Self {
            dominoes: dominoes.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dominoes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dominoes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Domino> {
        self.dominoes.iter()
    }

    #[must_use]
    pub fn contains(&self, id: DominoId) -> bool {
        self.dominoes.iter().any(|d| d.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: DominoId) -> Option<&Domino> {
        self.dominoes.iter().find(|d| d.id() == id)
    }

    /// Add a drawn or dealt domino.
    pub fn add(&mut self, domino: Domino) {
        self.dominoes.push(domino);
    }

    /// Remove a domino by identity.
    ///
    /// Returns the removed domino, or `None` if it was not held.
    pub fn remove(&mut self, id: DominoId) -> Option<Domino> {
        let pos = self.dominoes.iter().position(|d| d.id() == id)?;
        Some(self.dominoes.remove(pos))
    }

    /// Drop every domino (hand reset).
    pub fn clear(&mut self) {
        self.dominoes.clear();
    }

    /// Sum of both pip values of every held domino.
    #[must_use]
    pub fn pip_total(&self) -> u32 {
        self.dominoes.iter().map(Domino::pip_total).sum()
    }

    /// Can any held domino be played on `board`?
    ///
    /// On an empty board any domino opens the hand.
    #[must_use]
    pub fn has_playable(&self, board: &Board) -> bool {
        if board.is_empty() {
            return !self.is_empty();
        }
        self.dominoes.iter().any(|d| board.accepts(d))
    }
}
