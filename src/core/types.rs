//! Core type aliases and re-exports

pub use glam::IVec3;

/// Integer coordinate of one cell of the voxel lattice
pub type GridCoord = IVec3;

/// Standard Result type for the editor
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
