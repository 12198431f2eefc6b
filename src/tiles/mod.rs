//! Dominoes, hands and the shared stock.

pub mod domino;
pub mod hand;
pub mod stock;

pub use domino::{Domino, DominoId, Orientation, PlacedDomino, Placement};
pub use hand::Hand;
pub use stock::Stock;
