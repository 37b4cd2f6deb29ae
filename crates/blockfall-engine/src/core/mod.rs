//! Core data structures: the grid of locked cells and the pieces that fall onto it.
//!
//! - [`Grid`] - Row-major board of [`Cell`]s with locking and line clearing
//! - [`Piece`] - A piece kind at a rotation and anchor position
//! - [`Shape`] - The occupied-cell matrix of a piece in one rotation

pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;
