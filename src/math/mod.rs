//! Integer lattice math

pub mod direction;
pub mod grid_box;

pub use direction::Direction;
pub use grid_box::GridBox;
