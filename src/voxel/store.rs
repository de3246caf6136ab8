//! Sparse voxel store - the single source of truth for filled cells.

use std::collections::HashMap;

use crate::core::types::IVec3;
use super::history::Snapshot;
use super::records::VoxelRecord;
use super::selection::Selection;
use super::voxel::{Color, Voxel};

/// Change notification for the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A voxel was created
    Added(Voxel),
    /// A voxel was destroyed
    Removed(Voxel),
    /// An existing voxel was repainted
    Recolored {
        position: IVec3,
        old: Color,
        new: Color,
    },
    /// A voxel changed cell as part of a batch move
    Moved { from: IVec3, to: IVec3 },
    /// Every voxel was removed at once
    Cleared,
}

/// Coordinate-keyed voxel map.
///
/// Removal paths take the active `Selection` so a removed voxel can never
/// stay selected.
#[derive(Debug, Default)]
pub struct VoxelStore {
    voxels: HashMap<IVec3, Color>,
    /// Notifications not yet drained by the renderer
    events: Vec<StoreEvent>,
}

impl VoxelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a voxel. Returns None without side effects if the cell is filled.
    pub fn add(&mut self, position: IVec3, color: impl Into<Color>) -> Option<Voxel> {
        if self.voxels.contains_key(&position) {
            return None;
        }
        let voxel = Voxel::new(position, color);
        self.voxels.insert(position, voxel.color.clone());
        self.events.push(StoreEvent::Added(voxel.clone()));
        Some(voxel)
    }

    /// Remove the voxel at `position`, evicting it from the selection.
    pub fn remove(&mut self, position: IVec3, selection: &mut Selection) -> Option<Voxel> {
        let color = self.voxels.remove(&position)?;
        selection.evict(position);
        let voxel = Voxel::new(position, color);
        self.events.push(StoreEvent::Removed(voxel.clone()));
        Some(voxel)
    }

    /// Repaint an existing voxel. Returns the previous color if it changed.
    pub fn set_color(&mut self, position: IVec3, color: impl Into<Color>) -> Option<Color> {
        let color = color.into();
        let slot = self.voxels.get_mut(&position)?;
        if *slot == color {
            return None;
        }
        let old = std::mem::replace(slot, color.clone());
        self.events.push(StoreEvent::Recolored {
            position,
            old: old.clone(),
            new: color,
        });
        Some(old)
    }

    /// Check if a cell is filled
    pub fn occupied_at(&self, position: IVec3) -> bool {
        self.voxels.contains_key(&position)
    }

    /// Color of the voxel at `position`
    pub fn get(&self, position: IVec3) -> Option<&Color> {
        self.voxels.get(&position)
    }

    /// Remove every voxel, emitting a single `Cleared` event.
    pub fn clear(&mut self, selection: &mut Selection) {
        self.voxels.clear();
        selection.clear();
        self.events.push(StoreEvent::Cleared);
    }

    /// Iterate `(position, color)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &Color)> {
        self.voxels.iter().map(|(p, c)| (*p, c))
    }

    /// All voxels as owned values
    pub fn all(&self) -> Vec<Voxel> {
        self.iter().map(|(p, c)| Voxel::new(p, c.clone())).collect()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Move voxels in one batch.
    ///
    /// All sources are lifted before any target is written, so moved voxels
    /// may trade cells with each other. The caller guarantees no target is
    /// held by a voxel outside the batch; such a voxel would be overwritten.
    pub fn relocate(&mut self, moves: &[(IVec3, IVec3)], selection: &mut Selection) {
        let lifted: Vec<(IVec3, IVec3, Color)> = moves
            .iter()
            .filter_map(|&(from, to)| self.voxels.remove(&from).map(|c| (from, to, c)))
            .collect();

        for (from, to, color) in lifted {
            self.voxels.insert(to, color);
            self.events.push(StoreEvent::Moved { from, to });
        }

        selection.remap(moves);
    }

    /// Capture the full content as an immutable snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_records(
            self.iter()
                .map(|(p, c)| VoxelRecord::new(p, c.clone()))
                .collect(),
        )
    }

    /// Replace the content with a snapshot. Used by undo; never touches history.
    pub fn restore(&mut self, snapshot: &Snapshot, selection: &mut Selection) {
        self.clear(selection);
        for record in snapshot.records() {
            self.add(record.position(), record.color.clone());
        }
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}
