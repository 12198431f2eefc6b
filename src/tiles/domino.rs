//! Dominoes and their placement on the board.
//!
//! A `Domino` is an immutable pip pair with a stable identity. Two dominoes
//! are told apart by `DominoId`, never by pips. When a domino lands on the
//! board it becomes a `PlacedDomino`, whose `Placement` says which way it
//! lies and which pip faces which side.
//!
//! `Placement` is a tagged union: `left/right` only exist on a horizontal
//! tile and `upper/lower` only on a vertical one, so there is no way to
//! read the wrong pair.

use serde::{Deserialize, Serialize};

/// Identity of a domino within its set (index in canonical set order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DominoId(pub u8);

impl DominoId {
    /// Create a new domino ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for DominoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An unordered pair of pip values.
///
/// ```
/// use rust_muggins::tiles::{Domino, DominoId};
///
/// let d = Domino::new(DominoId::new(0), 5, 3);
/// assert!(d.matches(3));
/// assert_eq!(d.other_side(3), Some(5));
/// assert_eq!(d.pip_total(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domino {
    id: DominoId,
    a: u8,
    b: u8,
}

impl Domino {
    /// Create a domino with the given identity and pips.
    #[must_use]
    pub const fn new(id: DominoId, a: u8, b: u8) -> Self {
        Self { id, a, b }
    }

    /// Build the full double-`max_pip` set in canonical order.
    ///
    /// `[0|0], [0|1], .., [0|max], [1|1], .., [max|max]`, with IDs
    /// numbered from 0 in that order.
    #[must_use]
    pub fn full_set(max_pip: u8) -> Vec<Domino> {
        let mut set = Vec::new();
        let mut next = 0u8;
        for a in 0..=max_pip {
            for b in a..=max_pip {
                set.push(Domino::new(DominoId(next), a, b));
                next = next.wrapping_add(1);
            }
        }
        set
    }

    #[must_use]
    pub const fn id(&self) -> DominoId {
        self.id
    }

    /// Both pip values, in construction order.
    #[must_use]
    pub const fn pips(&self) -> (u8, u8) {
        (self.a, self.b)
    }

    #[must_use]
    pub const fn is_double(&self) -> bool {
        self.a == self.b
    }

    /// Sum of both pip values.
    #[must_use]
    pub const fn pip_total(&self) -> u32 {
        self.a as u32 + self.b as u32
    }

    /// Does either side show `value`?
    #[must_use]
    pub const fn matches(&self, value: u8) -> bool {
        self.a == value || self.b == value
    }

    /// The pip value opposite a side showing `value`.
    #[must_use]
    pub const fn other_side(&self, value: u8) -> Option<u8> {
        if self.a == value {
            Some(self.b)
        } else if self.b == value {
            Some(self.a)
        } else {
            None
        }
    }

    /// Same pip pair, ignoring order and identity.
    #[must_use]
    pub fn same_pips(&self, other: &Domino) -> bool {
        (self.a, self.b) == (other.a, other.b) || (self.a, self.b) == (other.b, other.a)
    }
}

impl std::fmt::Display for Domino {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.a, self.b)
    }
}

/// Which way a placed domino lies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Orientation together with the pip on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    Horizontal { left: u8, right: u8 },
    Vertical { upper: u8, lower: u8 },
}

impl Placement {
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        match self {
            Placement::Horizontal { .. } => Orientation::Horizontal,
            Placement::Vertical { .. } => Orientation::Vertical,
        }
    }

    /// Sum of both sides, whichever way the tile lies.
    #[must_use]
    pub const fn pip_total(&self) -> u32 {
        match *self {
            Placement::Horizontal { left, right } => left as u32 + right as u32,
            Placement::Vertical { upper, lower } => upper as u32 + lower as u32,
        }
    }
}

/// A domino on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedDomino {
    pub domino: Domino,
    pub placement: Placement,
}

impl PlacedDomino {
    #[must_use]
    pub const fn new(domino: Domino, placement: Placement) -> Self {
        Self { domino, placement }
    }

    #[must_use]
    pub const fn id(&self) -> DominoId {
        self.domino.id()
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.placement.orientation()
    }
}

impl std::fmt::Display for PlacedDomino {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.placement {
            Placement::Horizontal { left, right } => write!(f, "[{}|{}]", left, right),
            Placement::Vertical { upper, lower } => write!(f, "[{}/{}]", upper, lower),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set_double_six() {
        let set = Domino::full_set(6);

        assert_eq!(set.len(), 28);
        assert_eq!(set.iter().filter(|d| d.is_double()).count(), 7);
        assert_eq!(set[0].pips(), (0, 0));
        assert_eq!(set[27].pips(), (6, 6));

        // IDs follow canonical order
        for (i, d) in set.iter().enumerate() {
            assert_eq!(d.id(), DominoId::new(i as u8));
        }

        // Every pair appears once
        for (i, d) in set.iter().enumerate() {
            assert!(!set[i + 1..].iter().any(|o| o.same_pips(d)));
        }
    }

    #[test]
    fn test_full_set_pip_total() {
        // Each value 0..=6 appears 8 times in a double-six set
        let total: u32 = Domino::full_set(6).iter().map(Domino::pip_total).sum();
        assert_eq!(total, 168);
    }

    #[test]
    fn test_other_side() {
        let d = Domino::new(DominoId::new(3), 2, 6);

        assert_eq!(d.other_side(2), Some(6));
        assert_eq!(d.other_side(6), Some(2));
        assert_eq!(d.other_side(4), None);
        assert!(!d.matches(4));
    }

    #[test]
    fn test_same_pips_ignores_order_and_identity() {
        let a = Domino::new(DominoId::new(1), 3, 5);
        let b = Domino::new(DominoId::new(9), 5, 3);

        assert!(a.same_pips(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_placement_orientation() {
        let h = Placement::Horizontal { left: 5, right: 3 };
        let v = Placement::Vertical { upper: 6, lower: 6 };

        assert_eq!(h.orientation(), Orientation::Horizontal);
        assert_eq!(v.orientation(), Orientation::Vertical);
        assert_eq!(h.pip_total(), 8);
        assert_eq!(v.pip_total(), 12);
    }

    #[test]
    fn test_display() {
        let d = Domino::new(DominoId::new(4), 1, 4);
        assert_eq!(d.to_string(), "[1|4]");
        assert_eq!(d.id().to_string(), "#4");

        let placed = PlacedDomino::new(d, Placement::Vertical { upper: 4, lower: 1 });
        assert_eq!(placed.to_string(), "[4/1]");
    }
}
