//! Board layout: the spine, the spur and the spinner between them.
//!
//! ```text
//!                 [4/3]          <- spur top (Up end)
//!   [5|3] [3/3]* [3|1]           <- spine, Left end .. Right end
//!                 [3/0]          <- spur bottom (Down end)
//! ```
//!
//! The spinner (`*`) is the first domino of the hand. It always sits on
//! the spine; once the spur is started it is also the spur's junction
//! member. Up and Down only open when the spinner is a double and both of
//! its spine sides have been played on.
//!
//! Doubles are laid crosswise to the run they join (vertical on the spine,
//! horizontal on the spur) and expose both pips at an end. Other tiles lie
//! along their run with the matched pip facing inward.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Result, RulesError};
use crate::tiles::{Domino, DominoId, PlacedDomino, Placement};

/// An open end of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    Left,
    Right,
    Up,
    Down,
}

impl End {
    /// All ends in the order legal plays are listed.
    pub const ALL: [End; 4] = [End::Left, End::Right, End::Up, End::Down];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            End::Left => "left",
            End::Right => "right",
            End::Up => "up",
            End::Down => "down",
        }
    }

    /// Is this end on the spur?
    #[must_use]
    pub fn is_spur(self) -> bool {
        matches!(self, End::Up | End::Down)
    }
}

impl std::fmt::Display for End {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Played dominoes for the current hand.
///
/// Backed by `im::Vector`, so cloning a board for inspection is O(1) and
/// both runs grow cheaply at either end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Left end first.
    spine: Vector<PlacedDomino>,
    /// Top end first. Empty until a tile is played on Up or Down.
    spur: Vector<PlacedDomino>,
    spinner: Option<DominoId>,
    /// Dominoes in the order they were played.
    history: Vector<DominoId>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spine.is_empty()
    }

    /// Number of dominoes on the board. The spinner counts once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Remove every domino (hand reset).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The spine, left to right.
    pub fn spine(&self) -> impl Iterator<Item = &PlacedDomino> {
        self.spine.iter()
    }

    /// The spur, top to bottom, including the spinner once started.
    pub fn spur(&self) -> impl Iterator<Item = &PlacedDomino> {
        self.spur.iter()
    }

    #[must_use]
    pub fn spinner(&self) -> Option<DominoId> {
        self.spinner
    }

    /// Dominoes in the order they were played.
    pub fn history(&self) -> impl Iterator<Item = DominoId> + '_ {
        self.history.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, id: DominoId) -> bool {
        self.history.contains(&id)
    }

    fn spinner_tile(&self) -> Option<&PlacedDomino> {
        let spinner = self.spinner?;
        self.spine.iter().find(|p| p.id() == spinner)
    }

    fn is_spinner(&self, placed: &PlacedDomino) -> bool {
        self.spinner == Some(placed.id())
    }

    /// Up and Down are playable: the spinner is a double flanked on both
    /// spine sides.
    #[must_use]
    pub fn spur_open(&self) -> bool {
        let Some(spinner) = self.spinner else {
            return false;
        };
        let Some(tile) = self.spinner_tile() else {
            return false;
        };
        if !tile.domino.is_double() {
            return false;
        }
        match self.spine.iter().position(|p| p.id() == spinner) {
            Some(pos) => pos > 0 && pos + 1 < self.spine.len(),
            None => false,
        }
    }

    /// Pip value a domino must match to attach at `end`.
    ///
    /// `None` if the end is not open.
    #[must_use]
    pub fn open_end(&self, end: End) -> Option<u8> {
        match end {
            End::Left => self.spine.front().map(|p| match p.placement {
                Placement::Horizontal { left, .. } => left,
                Placement::Vertical { upper, .. } => upper,
            }),
            End::Right => self.spine.back().map(|p| match p.placement {
                Placement::Horizontal { right, .. } => right,
                Placement::Vertical { lower, .. } => lower,
            }),
            End::Up | End::Down => {
                if !self.spur_open() {
                    return None;
                }
                let tail = if end == End::Up {
                    self.spur.front()
                } else {
                    self.spur.back()
                };
                match tail {
                    Some(p) if !self.is_spinner(p) => Some(match (end, p.placement) {
                        (End::Up, Placement::Vertical { upper, .. }) => upper,
                        (_, Placement::Vertical { lower, .. }) => lower,
                        (End::Up, Placement::Horizontal { left, .. }) => left,
                        (_, Placement::Horizontal { right, .. }) => right,
                    }),
                    _ => self.spinner_tile().map(|p| p.domino.pips().0),
                }
            }
        }
    }

    /// Every open end with the pip value it shows.
    #[must_use]
    pub fn open_ends(&self) -> SmallVec<[(End, u8); 4]> {
        End::ALL
            .iter()
            .filter_map(|&end| self.open_end(end).map(|v| (end, v)))
            .collect()
    }

    /// Can `domino` be played anywhere?
    #[must_use]
    pub fn accepts(&self, domino: &Domino) -> bool {
        self.is_empty() || self.open_ends().iter().any(|&(_, v)| domino.matches(v))
    }

    /// Attach points where `domino` may be played.
    ///
    /// On an empty board the only option is `None` (the domino becomes the
    /// spinner).
    #[must_use]
    pub fn legal_attachments(&self, domino: &Domino) -> SmallVec<[Option<End>; 4]> {
        if self.is_empty() {
            let mut only = SmallVec::new();
            only.push(None);
            return only;
        }
        self.open_ends()
            .iter()
            .filter(|&&(_, v)| domino.matches(v))
            .map(|&(end, _)| Some(end))
            .collect()
    }

    /// Check that `domino` may attach at `attach` without changing anything.
    ///
    /// Returns the placement the domino would receive.
    pub fn placement_for(&self, domino: &Domino, attach: Option<End>) -> Result<Placement> {
        let Some(end) = attach else {
            if !self.is_empty() {
                return Err(RulesError::AttachRequired);
            }
            let (a, b) = domino.pips();
            return Ok(if domino.is_double() {
                Placement::Vertical { upper: a, lower: b }
            } else {
                Placement::Horizontal { left: a, right: b }
            });
        };

        if self.is_empty() {
            return Err(RulesError::AttachOnEmptyBoard);
        }
        let open = self.open_end(end).ok_or(RulesError::EndNotOpen { end })?;
        let other = domino.other_side(open).ok_or(RulesError::Mismatch {
            domino: domino.id(),
            end,
            open,
        })?;

        let crosswise = domino.is_double();
        Ok(match end {
            End::Left if crosswise => Placement::Vertical { upper: open, lower: open },
            End::Left => Placement::Horizontal { left: other, right: open },
            End::Right if crosswise => Placement::Vertical { upper: open, lower: open },
            End::Right => Placement::Horizontal { left: open, right: other },
            End::Up if crosswise => Placement::Horizontal { left: open, right: open },
            End::Up => Placement::Vertical { upper: other, lower: open },
            End::Down if crosswise => Placement::Horizontal { left: open, right: open },
            End::Down => Placement::Vertical { upper: open, lower: other },
        })
    }

    /// Play `domino` at `attach`.
    ///
    /// `None` is only valid for the first domino of a hand. On error the
    /// board is unchanged.
    pub fn append(&mut self, domino: Domino, attach: Option<End>) -> Result<PlacedDomino> {
        let placement = self.placement_for(&domino, attach)?;
        let placed = PlacedDomino::new(domino, placement);

        match attach {
            None => {
                self.spine.push_back(placed);
                self.spinner = Some(domino.id());
            }
            Some(End::Left) => self.spine.push_front(placed),
            Some(End::Right) => self.spine.push_back(placed),
            Some(end @ (End::Up | End::Down)) => {
                if self.spur.is_empty() {
                    let spinner = self.spinner_tile().copied();
                    debug_assert!(spinner.is_some(), "spur opened without a spinner");
                    if let Some(spinner) = spinner {
                        self.spur.push_back(spinner);
                    }
                }
                if end == End::Up {
                    self.spur.push_front(placed);
                } else {
                    self.spur.push_back(placed);
                }
            }
        }
        self.history.push_back(domino.id());

        Ok(placed)
    }

    /// Sum of the pips showing at the open ends, for per-play scoring.
    ///
    /// - a lone domino counts both pips
    /// - a spine end counts its outer pip, or both pips if laid crosswise
    /// - spur ends count only once the spur has a tile besides the
    ///   spinner, and the spinner itself is never counted there
    #[must_use]
    pub fn open_end_sum(&self) -> u32 {
        let (Some(first), Some(last)) = (self.spine.front(), self.spine.back()) else {
            return 0;
        };
        if self.len() == 1 {
            return first.placement.pip_total();
        }

        let mut sum = match first.placement {
            Placement::Horizontal { left, .. } => left as u32,
            vertical => vertical.pip_total(),
        };
        sum += match last.placement {
            Placement::Horizontal { right, .. } => right as u32,
            vertical => vertical.pip_total(),
        };

        if self.spur.len() > 1 {
            if let Some(top) = self.spur.front().filter(|p| !self.is_spinner(p)) {
                sum += match top.placement {
                    Placement::Vertical { upper, .. } => upper as u32,
                    horizontal => horizontal.pip_total(),
                };
            }
            if let Some(bottom) = self.spur.back().filter(|p| !self.is_spinner(p)) {
                sum += match bottom.placement {
                    Placement::Vertical { lower, .. } => lower as u32,
                    horizontal => horizontal.pip_total(),
                };
            }
        }
        sum
    }
}
