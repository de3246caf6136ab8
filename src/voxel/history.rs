//! Linear undo history of full store snapshots.

use std::sync::Arc;

use super::records::VoxelRecord;

/// Immutable record of the full store content at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot(Arc<[VoxelRecord]>);

impl Snapshot {
    pub fn from_records(records: Vec<VoxelRecord>) -> Self {
        Self(records.into())
    }

    pub fn records(&self) -> &[VoxelRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Snapshot history with a current index.
///
/// Saving after an undo truncates everything past the current index, so the
/// structure stays redo-capable without exposing redo.
#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    /// Index of the snapshot matching the store; meaningless while empty
    current: usize,
    /// Maximum retained snapshots
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` snapshots, dropping the oldest.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Record a new snapshot as the current state.
    pub fn save(&mut self, snapshot: Snapshot) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.current + 1);
        }
        self.snapshots.push(snapshot);

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }

        self.current = self.snapshots.len() - 1;
        log::debug!("History saved: {} snapshots, index {}", self.snapshots.len(), self.current);
    }

    /// Step back one snapshot and return it. No-op at the start of history.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        self.snapshots.get(self.current).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Snapshot the store currently matches
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;
    use crate::voxel::voxel::Color;

    fn snapshot(n: i32) -> Snapshot {
        Snapshot::from_records(
            (0..n)
                .map(|i| VoxelRecord::new(IVec3::new(i, 0, 0), Color::from("#fff")))
                .collect(),
        )
    }

    #[test]
    fn test_undo_walks_back_to_first_save() {
        let mut history = History::new();
        history.save(snapshot(1));
        history.save(snapshot(2));
        history.save(snapshot(3));
        assert_eq!(history.current_index(), 2);

        assert_eq!(history.undo(), Some(snapshot(2)));
        assert_eq!(history.undo(), Some(snapshot(1)));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current_index(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_save_after_undo_truncates() {
        let mut history = History::new();
        history.save(snapshot(1));
        history.save(snapshot(2));
        history.save(snapshot(3));

        history.undo();
        history.undo();
        history.save(snapshot(4));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&snapshot(4)));
        assert_eq!(history.undo(), Some(snapshot(1)));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        history.save(snapshot(1));
        history.save(snapshot(2));
        history.save(snapshot(3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current_index(), 1);
        assert_eq!(history.undo(), Some(snapshot(2)));
        assert_eq!(history.undo(), None);
    }
}
