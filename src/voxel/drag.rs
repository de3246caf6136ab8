//! Moving the selection by an integer offset.

use crate::core::types::IVec3;
use super::history::History;
use super::selection::Selection;
use super::store::VoxelStore;

/// Check that every selected voxel can shift by `delta`.
///
/// Only voxels outside the selection block a move; selected voxels may pass
/// through or trade places with each other.
pub fn can_move(store: &VoxelStore, selection: &Selection, delta: IVec3) -> bool {
    selection.iter().all(|p| {
        let target = p + delta;
        !store.occupied_at(target) || selection.contains(target)
    })
}

/// Shift every selected voxel by `delta` as one atomic step.
///
/// Either every voxel moves and history is saved once, or nothing changes.
/// A zero offset or an empty selection changes nothing and returns false.
pub fn move_by(
    store: &mut VoxelStore,
    selection: &mut Selection,
    history: &mut History,
    delta: IVec3,
) -> bool {
    if delta == IVec3::ZERO || selection.is_empty() {
        return false;
    }
    if !can_move(store, selection, delta) {
        log::debug!("Move by {} blocked by unselected voxels", delta);
        return false;
    }

    let moves: Vec<(IVec3, IVec3)> = selection.iter().map(|p| (p, p + delta)).collect();
    store.relocate(&moves, selection);
    history.save(store.snapshot());

    log::debug!("Moved {} voxels by {}", moves.len(), delta);
    true
}

/// In-progress voxel drag.
///
/// Tracks the total offset since the drag started; nothing is written until
/// `commit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragSession {
    offset: IVec3,
    valid: bool,
}

impl DragSession {
    pub fn new() -> Self {
        Self {
            offset: IVec3::ZERO,
            valid: true,
        }
    }

    /// Record the offset of the latest input sample. Returns whether the
    /// selection could be dropped there.
    pub fn update(&mut self, store: &VoxelStore, selection: &Selection, offset: IVec3) -> bool {
        self.offset = offset;
        self.valid = can_move(store, selection, offset);
        self.valid
    }

    /// Apply the drag. Returns true if the voxels moved.
    pub fn commit(
        self,
        store: &mut VoxelStore,
        selection: &mut Selection,
        history: &mut History,
    ) -> bool {
        move_by(store, selection, history, self.offset)
    }

    pub fn offset(&self) -> IVec3 {
        self.offset
    }

    /// Whether the last sampled offset is free of collisions
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
