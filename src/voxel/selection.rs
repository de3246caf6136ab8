//! Voxel selection: single toggle, by color, connected component.

use std::collections::{HashSet, VecDeque};

use crate::core::types::IVec3;
use crate::math::Direction;
use super::history::History;
use super::store::VoxelStore;
use super::voxel::Color;

/// Highlight change for the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(IVec3),
    Deselected(IVec3),
    /// Every highlight was dropped at once
    Cleared,
}

/// Set of selected voxels, keyed by grid coordinate.
///
/// Entries always refer to filled cells: the store evicts a coordinate when
/// it removes the voxel there.
#[derive(Debug, Default)]
pub struct Selection {
    selected: HashSet<IVec3>,
    changes: Vec<SelectionChange>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the voxel at `position`. Returns true if it is now selected.
    pub fn toggle_single(&mut self, store: &VoxelStore, position: IVec3) -> bool {
        if !store.occupied_at(position) {
            return false;
        }
        if self.selected.remove(&position) {
            self.changes.push(SelectionChange::Deselected(position));
            false
        } else {
            self.insert(position);
            true
        }
    }

    /// Select every voxel sharing the color of the voxel at `position`.
    ///
    /// Returns the new selection size; a no-op on an empty cell.
    pub fn select_by_color(&mut self, store: &VoxelStore, position: IVec3) -> usize {
        let Some(color) = store.get(position).cloned() else {
            return 0;
        };
        self.clear();
        let matching: Vec<IVec3> = store
            .iter()
            .filter(|(_, c)| **c == color)
            .map(|(p, _)| p)
            .collect();
        for p in matching {
            self.insert(p);
        }
        log::debug!("Selected {} voxels with color {}", self.selected.len(), color);
        self.selected.len()
    }

    /// Select the face-connected component containing `position`.
    ///
    /// Returns the new selection size; a no-op on an empty cell.
    pub fn select_connected(&mut self, store: &VoxelStore, position: IVec3) -> usize {
        if !store.occupied_at(position) {
            return 0;
        }
        self.clear();
        for p in connected_component(store, position) {
            self.insert(p);
        }
        log::debug!("Selected connected component of {} voxels", self.selected.len());
        self.selected.len()
    }

    /// Select every voxel in the store
    pub fn select_all(&mut self, store: &VoxelStore) -> usize {
        self.clear();
        let all: Vec<IVec3> = store.iter().map(|(p, _)| p).collect();
        for p in all {
            self.insert(p);
        }
        self.selected.len()
    }

    /// Drop every selected entry
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.changes.push(SelectionChange::Cleared);
        }
    }

    /// Remove every selected voxel from the store, then save history once.
    ///
    /// Returns the number of voxels removed.
    pub fn delete_selected(&mut self, store: &mut VoxelStore, history: &mut History) -> usize {
        let targets: Vec<IVec3> = self.selected.iter().copied().collect();
        let mut removed = 0;
        for p in targets {
            if store.remove(p, self).is_some() {
                removed += 1;
            }
        }
        self.clear();

        if removed > 0 {
            history.save(store.snapshot());
            log::debug!("Deleted {} selected voxels", removed);
        }
        removed
    }

    /// Paint every selected voxel, saving history once if any color changed.
    pub fn recolor_selected(
        &self,
        color: &Color,
        store: &mut VoxelStore,
        history: &mut History,
    ) -> usize {
        let changed = self
            .selected
            .iter()
            .filter(|&&p| store.set_color(p, color.clone()).is_some())
            .count();

        if changed > 0 {
            history.save(store.snapshot());
        }
        changed
    }

    pub fn contains(&self, position: IVec3) -> bool {
        self.selected.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate selected coordinates in no particular order
    pub fn iter(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.selected.iter().copied()
    }

    /// Drain pending highlight changes
    pub fn take_changes(&mut self) -> Vec<SelectionChange> {
        std::mem::take(&mut self.changes)
    }

    fn insert(&mut self, position: IVec3) {
        if self.selected.insert(position) {
            self.changes.push(SelectionChange::Selected(position));
        }
    }

    /// Forget a coordinate whose voxel was removed
    pub(crate) fn evict(&mut self, position: IVec3) {
        if self.selected.remove(&position) {
            self.changes.push(SelectionChange::Deselected(position));
        }
    }

    /// Follow selected voxels through a batch move
    pub(crate) fn remap(&mut self, moves: &[(IVec3, IVec3)]) {
        let mut moved = Vec::new();
        for &(from, to) in moves {
            if self.selected.remove(&from) {
                self.changes.push(SelectionChange::Deselected(from));
                moved.push(to);
            }
        }
        for to in moved {
            self.insert(to);
        }
    }
}

/// Breadth-first flood fill over face-adjacent filled cells.
///
/// Returns the maximal connected component containing `seed`, or an empty
/// set if `seed` is not filled.
pub fn connected_component(store: &VoxelStore, seed: IVec3) -> HashSet<IVec3> {
    let mut visited = HashSet::new();
    if !store.occupied_at(seed) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(seed);
    queue.push_back(seed);

    while let Some(p) = queue.pop_front() {
        for n in Direction::neighbors(p) {
            if store.occupied_at(n) && visited.insert(n) {
                queue.push_back(n);
            }
        }
    }

    visited
}
