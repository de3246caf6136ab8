//! Voxedit - voxel grid editing engine
//!
//! A sparse, coordinate-keyed voxel store with selection, bulk area fill,
//! collision-checked drag moves and snapshot undo. Rendering and input
//! hit-testing live outside this crate; they drive the [`voxel::Editor`]
//! and drain its change notifications.

pub mod core;
pub mod math;
pub mod voxel;
pub mod remote;
