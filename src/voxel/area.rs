//! Rectangular area editing: bulk fill, one-step expand/contract, and
//! handle-drag resize.

use std::collections::HashMap;

use crate::core::types::IVec3;
use crate::math::{Direction, GridBox};
use super::history::History;
use super::selection::Selection;
use super::store::VoxelStore;
use super::voxel::Color;

/// The active bulk-edit region
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Area {
    pub bounds: GridBox,
    pub color: Color,
}

/// Cells a fill would create, computed without touching the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaPreview {
    pub bounds: GridBox,
    pub color: Color,
    /// Empty cells inside `bounds`
    pub cells: Vec<IVec3>,
}

/// Net effect of a committed resize gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub added: usize,
    pub removed: usize,
}

impl ResizeOutcome {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Planned change to one cell of a resize overlay
#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingCell {
    /// Empty cell newly covered by the box
    Fill(Color),
    /// Filled cell uncovered by the box
    Clear,
    /// Filled cell uncovered on an earlier frame and covered again since
    Refill(Color),
}

/// Pending resize state, applied to the store only on commit.
#[derive(Debug)]
struct ResizeSession {
    /// Box of the immediately prior frame
    current: GridBox,
    /// Overlay over the store
    pending: HashMap<IVec3, PendingCell>,
}

impl ResizeSession {
    fn occupied(&self, store: &VoxelStore, p: IVec3) -> bool {
        match self.pending.get(&p) {
            Some(PendingCell::Clear) => false,
            Some(_) => true,
            None => store.occupied_at(p),
        }
    }

    /// Diff `next` against the prior frame's box and fold it into the overlay.
    fn step(&mut self, store: &VoxelStore, next: GridBox, color: &Color) {
        let prev = self.current;

        for p in next.cells_outside(&prev) {
            if self.occupied(store, p) {
                continue;
            }
            let cell = match self.pending.get(&p) {
                Some(PendingCell::Clear) => PendingCell::Refill(color.clone()),
                _ => PendingCell::Fill(color.clone()),
            };
            self.pending.insert(p, cell);
        }

        for p in prev.cells_outside(&next) {
            match self.pending.get(&p) {
                Some(PendingCell::Fill(_)) => {
                    self.pending.remove(&p);
                }
                Some(PendingCell::Refill(_)) => {
                    self.pending.insert(p, PendingCell::Clear);
                }
                Some(PendingCell::Clear) => {}
                None => {
                    if store.occupied_at(p) {
                        self.pending.insert(p, PendingCell::Clear);
                    }
                }
            }
        }

        self.current = next;
    }
}

/// Overlay of an in-progress resize, for rendering
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResizePreview {
    pub bounds: Option<GridBox>,
    /// Cells that will be filled on commit
    pub fill: Vec<IVec3>,
    /// Cells that will be cleared on commit
    pub clear: Vec<IVec3>,
}

/// Owns the active area, its fill preview and any resize in progress.
#[derive(Debug, Default)]
pub struct AreaEngine {
    active: Option<Area>,
    preview: Option<AreaPreview>,
    resize: Option<ResizeSession>,
}

fn fill_cells(store: &mut VoxelStore, bounds: &GridBox, color: &Color) -> usize {
    bounds
        .cells()
        .filter(|&p| store.add(p, color.clone()).is_some())
        .count()
}

impl AreaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every empty cell of the box spanning `start` and `end`.
    ///
    /// Filled cells are left untouched. The box becomes the active area.
    /// Returns the number of voxels added; history is saved once if any were.
    pub fn fill(
        &mut self,
        store: &mut VoxelStore,
        history: &mut History,
        start: IVec3,
        end: IVec3,
        color: Color,
    ) -> usize {
        let bounds = GridBox::from_corners(start, end);
        let added = fill_cells(store, &bounds, &color);

        self.active = Some(Area { bounds, color });
        self.preview = None;
        self.resize = None;

        if added > 0 {
            history.save(store.snapshot());
        }
        log::debug!("Filled {:?}: {} of {} cells added", bounds, added, bounds.volume());
        added
    }

    /// Grow the active area one cell toward `dir`, filling the new slab.
    ///
    /// Returns None when there is no active area or a resize is in progress.
    pub fn expand(
        &mut self,
        dir: Direction,
        store: &mut VoxelStore,
        history: &mut History,
    ) -> Option<usize> {
        if self.resize.is_some() {
            return None;
        }
        let area = self.active.as_mut()?;
        let next = area.bounds.expanded(dir);

        let added = next
            .cells_outside(&area.bounds)
            .filter(|&p| store.add(p, area.color.clone()).is_some())
            .count();
        area.bounds = next;

        if added > 0 {
            history.save(store.snapshot());
        }
        log::debug!("Expanded area {}: {} voxels added", dir, added);
        Some(added)
    }

    /// Shrink the active area one cell from the `dir` face, removing the
    /// voxels in the dropped slab.
    ///
    /// Returns None, leaving everything unchanged, when there is no active
    /// area, a resize is in progress, or the area is one cell thick there.
    pub fn contract(
        &mut self,
        dir: Direction,
        store: &mut VoxelStore,
        selection: &mut Selection,
        history: &mut History,
    ) -> Option<usize> {
        if self.resize.is_some() {
            return None;
        }
        let area = self.active.as_mut()?;
        let Some(next) = area.bounds.contracted(dir) else {
            log::debug!("Rejected contract {}: area would invert", dir);
            return None;
        };

        let dropped: Vec<IVec3> = area.bounds.cells_outside(&next).collect();
        let removed = dropped
            .into_iter()
            .filter(|&p| store.remove(p, selection).is_some())
            .count();
        area.bounds = next;

        if removed > 0 {
            history.save(store.snapshot());
        }
        log::debug!("Contracted area {}: {} voxels removed", dir, removed);
        Some(removed)
    }

    /// Compute which empty cells a fill of `start..=end` would create.
    ///
    /// Does not touch the store or history; safe to call every frame.
    pub fn preview(
        &mut self,
        store: &VoxelStore,
        start: IVec3,
        end: IVec3,
        color: Color,
    ) -> &AreaPreview {
        let bounds = GridBox::from_corners(start, end);
        let cells = bounds.cells().filter(|&p| !store.occupied_at(p)).collect();
        self.preview.insert(AreaPreview {
            bounds,
            color,
            cells,
        })
    }

    /// Start a handle-drag resize of the active area.
    pub fn begin_resize(&mut self) -> bool {
        let Some(area) = &self.active else {
            return false;
        };
        self.resize = Some(ResizeSession {
            current: area.bounds,
            pending: HashMap::new(),
        });
        true
    }

    /// Apply one frame of a resize drag.
    ///
    /// The candidate is clamped so no axis inverts, then diffed against the
    /// previous frame's box. Only the overlay changes; the store is written
    /// by `finish_resize`. Returns the clamped box.
    pub fn resize(&mut self, candidate: GridBox, store: &VoxelStore) -> Option<GridBox> {
        let color = self.active.as_ref()?.color.clone();
        let session = self.resize.as_mut()?;

        let next = GridBox::clamped_from(&session.current, candidate);
        session.step(store, next, &color);
        Some(next)
    }

    /// Commit the resize overlay to the store with a single history save.
    pub fn finish_resize(
        &mut self,
        store: &mut VoxelStore,
        selection: &mut Selection,
        history: &mut History,
    ) -> Option<ResizeOutcome> {
        let session = self.resize.take()?;
        let area = self.active.as_mut()?;

        let mut outcome = ResizeOutcome::default();
        for (p, cell) in session.pending {
            // The store may have changed since the overlay was computed;
            // fills never overwrite a voxel that appeared meanwhile.
            match cell {
                PendingCell::Fill(color) => {
                    if store.add(p, color).is_some() {
                        outcome.added += 1;
                    }
                }
                PendingCell::Clear => {
                    if store.remove(p, selection).is_some() {
                        outcome.removed += 1;
                    }
                }
                PendingCell::Refill(color) => {
                    if store.remove(p, selection).is_some() {
                        outcome.removed += 1;
                    }
                    if store.add(p, color).is_some() {
                        outcome.added += 1;
                    }
                }
            }
        }
        area.bounds = session.current;

        if outcome.changed() {
            history.save(store.snapshot());
        }
        log::debug!(
            "Resized area to {:?}: {} added, {} removed",
            area.bounds, outcome.added, outcome.removed
        );
        Some(outcome)
    }

    /// Drop an in-progress resize; the area keeps its pre-drag bounds.
    pub fn cancel_resize(&mut self) {
        self.resize = None;
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Overlay of the in-progress resize
    pub fn resize_preview(&self) -> ResizePreview {
        let Some(session) = &self.resize else {
            return ResizePreview::default();
        };
        let mut preview = ResizePreview {
            bounds: Some(session.current),
            ..Default::default()
        };
        for (p, cell) in &session.pending {
            match cell {
                PendingCell::Clear => preview.clear.push(*p),
                PendingCell::Fill(_) | PendingCell::Refill(_) => preview.fill.push(*p),
            }
        }
        preview
    }

    /// Discard the active area and all preview state.
    pub fn clear(&mut self) {
        self.active = None;
        self.preview = None;
        self.resize = None;
    }

    /// Drop only the fill preview
    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    pub fn active(&self) -> Option<&Area> {
        self.active.as_ref()
    }

    pub fn current_preview(&self) -> Option<&AreaPreview> {
        self.preview.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        store: VoxelStore,
        selection: Selection,
        history: History,
        area: AreaEngine,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: VoxelStore::new(),
                selection: Selection::new(),
                history: History::new(),
                area: AreaEngine::new(),
            }
        }

        fn fill(&mut self, start: IVec3, end: IVec3, color: &str) -> usize {
            self.area
                .fill(&mut self.store, &mut self.history, start, end, Color::from(color))
        }

        fn bounds(&self) -> GridBox {
            self.area.active().unwrap().bounds
        }

        fn color_at(&self, p: IVec3) -> Option<&str> {
            self.store.get(p).map(Color::as_str)
        }
    }

    #[test]
    fn test_fill_two_cells() {
        let mut f = Fixture::new();
        let added = f.fill(IVec3::ZERO, IVec3::X, "#0000ff");

        assert_eq!(added, 2);
        assert_eq!(f.store.len(), 2);
        assert_eq!(f.color_at(IVec3::ZERO), Some("#0000ff"));
        assert_eq!(f.color_at(IVec3::X), Some("#0000ff"));
        assert_eq!(f.history.len(), 1);
    }

    #[test]
    fn test_fill_never_overwrites() {
        let mut f = Fixture::new();
        f.store.add(IVec3::new(1, 1, 1), "#ff0000");

        let added = f.fill(IVec3::splat(2), IVec3::ZERO, "#00ff00");
        assert_eq!(added, 26);
        assert_eq!(f.color_at(IVec3::ONE), Some("#ff0000"));
        assert_eq!(f.bounds(), GridBox::from_corners(IVec3::ZERO, IVec3::splat(2)));
    }

    #[test]
    fn test_fill_without_additions_does_not_save() {
        let mut f = Fixture::new();
        f.store.add(IVec3::ZERO, "#ff0000");

        assert_eq!(f.fill(IVec3::ZERO, IVec3::ZERO, "#00ff00"), 0);
        assert!(f.history.is_empty());
        assert_eq!(f.bounds(), GridBox::single(IVec3::ZERO));
    }

    #[test]
    fn test_expand_fills_new_slab() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(1, 1, 0), "#fff");

        let added = f.area.expand(Direction::PosZ, &mut f.store, &mut f.history);
        assert_eq!(added, Some(4));
        assert_eq!(f.store.len(), 8);
        assert_eq!(f.bounds().max.z, 1);
        assert_eq!(f.history.len(), 2);
    }

    #[test]
    fn test_expand_without_area() {
        let mut f = Fixture::new();
        assert_eq!(f.area.expand(Direction::PosX, &mut f.store, &mut f.history), None);
    }

    #[test]
    fn test_contract_removes_dropped_slab() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(2, 0, 0), "#fff");
        f.selection.select_all(&f.store);

        let removed = f.area.contract(Direction::NegX, &mut f.store, &mut f.selection, &mut f.history);
        assert_eq!(removed, Some(1));
        assert!(!f.store.occupied_at(IVec3::ZERO));
        assert!(!f.selection.contains(IVec3::ZERO));
        assert_eq!(f.bounds().min.x, 1);
    }

    #[test]
    fn test_contract_rejects_inversion() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(1, 0, 0), "#fff");
        let saves = f.history.len();

        let result = f.area.contract(Direction::PosY, &mut f.store, &mut f.selection, &mut f.history);
        assert_eq!(result, None);
        assert_eq!(f.bounds(), GridBox::from_corners(IVec3::ZERO, IVec3::X));
        assert_eq!(f.store.len(), 2);
        assert_eq!(f.history.len(), saves);
    }

    #[test]
    fn test_bounds_stay_valid_under_mixed_steps() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::ZERO, "#fff");

        for (i, dir) in Direction::ALL.iter().cycle().take(40).enumerate() {
            if i % 3 == 0 {
                f.area.expand(*dir, &mut f.store, &mut f.history);
            } else {
                f.area.contract(*dir, &mut f.store, &mut f.selection, &mut f.history);
            }
            assert!(f.bounds().is_valid());
        }
    }

    #[test]
    fn test_preview_is_pure_and_idempotent() {
        let mut f = Fixture::new();
        f.store.add(IVec3::ZERO, "#fff");
        f.store.take_events();

        let first = f.area.preview(&f.store, IVec3::ZERO, IVec3::new(2, 0, 0), Color::from("#000")).clone();
        let second = f.area.preview(&f.store, IVec3::ZERO, IVec3::new(2, 0, 0), Color::from("#000")).clone();

        assert_eq!(first, second);
        assert_eq!(first.cells.len(), 2);
        assert!(!first.cells.contains(&IVec3::ZERO));
        assert_eq!(f.store.len(), 1);
        assert!(!f.store.has_events());
        assert!(f.history.is_empty());
    }

    #[test]
    fn test_resize_commits_once() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(1, 0, 0), "#fff");
        let saves = f.history.len();

        assert!(f.area.begin_resize());
        let frames = [
            GridBox::from_corners(IVec3::ZERO, IVec3::new(2, 0, 0)),
            GridBox::from_corners(IVec3::ZERO, IVec3::new(3, 0, 0)),
            GridBox::from_corners(IVec3::ZERO, IVec3::new(3, 1, 0)),
        ];
        for frame in frames {
            f.area.resize(frame, &f.store);
            // Nothing is written until the gesture completes
            assert_eq!(f.store.len(), 2);
        }

        let outcome = f.area.finish_resize(&mut f.store, &mut f.selection, &mut f.history).unwrap();
        assert_eq!(outcome, ResizeOutcome { added: 6, removed: 0 });
        assert_eq!(f.store.len(), 8);
        assert_eq!(f.history.len(), saves + 1);
        assert_eq!(f.bounds(), frames[2]);
    }

    #[test]
    fn test_resize_diffs_against_prior_frame() {
        let mut f = Fixture::new();
        f.store.add(IVec3::new(2, 0, 0), "#keep");
        f.fill(IVec3::ZERO, IVec3::new(2, 0, 0), "#area");

        f.area.begin_resize();
        // Shrink past x=2, then grow back over it
        f.area.resize(GridBox::from_corners(IVec3::ZERO, IVec3::X), &f.store);
        f.area.resize(GridBox::from_corners(IVec3::ZERO, IVec3::new(2, 0, 0)), &f.store);
        f.area.finish_resize(&mut f.store, &mut f.selection, &mut f.history);

        // The recovered cell was refilled with the area color
        assert_eq!(f.color_at(IVec3::new(2, 0, 0)), Some("#area"));
        assert_eq!(f.store.len(), 3);
    }

    #[test]
    fn test_resize_shrink_removes_voxels() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(3, 0, 0), "#fff");

        f.area.begin_resize();
        f.area.resize(GridBox::from_corners(IVec3::ZERO, IVec3::X), &f.store);
        let preview = f.area.resize_preview();
        assert_eq!(preview.clear.len(), 2);
        assert!(preview.fill.is_empty());

        let outcome = f.area.finish_resize(&mut f.store, &mut f.selection, &mut f.history).unwrap();
        assert_eq!(outcome.removed, 2);
        assert_eq!(f.store.len(), 2);
    }

    #[test]
    fn test_resize_clamps_inverted_candidate() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(3, 0, 0), "#fff");

        f.area.begin_resize();
        let clamped = f
            .area
            .resize(GridBox { min: IVec3::ZERO, max: IVec3::new(-5, 0, 0) }, &f.store)
            .unwrap();
        assert!(clamped.is_valid());
        assert_eq!(clamped, GridBox::single(IVec3::ZERO));
    }

    #[test]
    fn test_cancel_resize_discards_overlay() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::X, "#fff");
        let before = f.bounds();

        f.area.begin_resize();
        f.area.resize(GridBox::from_corners(IVec3::ZERO, IVec3::new(5, 5, 5)), &f.store);
        f.area.cancel_resize();

        assert_eq!(f.bounds(), before);
        assert_eq!(f.store.len(), 2);
        assert!(f.area.resize_preview().fill.is_empty());
    }

    #[test]
    fn test_clear_drops_state_without_mutation() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::X, "#fff");
        f.area.preview(&f.store, IVec3::ZERO, IVec3::ONE, Color::from("#000"));

        f.area.clear();
        assert!(f.area.active().is_none());
        assert!(f.area.current_preview().is_none());
        assert_eq!(f.store.len(), 2);
    }

    #[test]
    fn test_resize_commit_keeps_voxels_placed_mid_drag() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::X, "#area");

        f.area.begin_resize();
        f.area.resize(GridBox::from_corners(IVec3::ZERO, IVec3::new(3, 0, 0)), &f.store);
        f.store.add(IVec3::new(3, 0, 0), "#user");

        let outcome = f.area.finish_resize(&mut f.store, &mut f.selection, &mut f.history).unwrap();
        assert_eq!(outcome, ResizeOutcome { added: 1, removed: 0 });
        assert_eq!(f.color_at(IVec3::new(3, 0, 0)), Some("#user"));
        assert_eq!(f.color_at(IVec3::new(2, 0, 0)), Some("#area"));
    }

    #[test]
    fn test_resize_commit_skips_cells_emptied_mid_drag() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::new(2, 0, 0), "#area");

        f.area.begin_resize();
        f.area.resize(GridBox::single(IVec3::ZERO), &f.store);
        f.store.remove(IVec3::new(2, 0, 0), &mut f.selection);

        let outcome = f.area.finish_resize(&mut f.store, &mut f.selection, &mut f.history).unwrap();
        assert_eq!(outcome, ResizeOutcome { added: 0, removed: 1 });
        assert_eq!(f.store.len(), 1);
    }

    #[test]
    fn test_bounds_stay_valid_across_resize_frames() {
        let mut f = Fixture::new();
        f.fill(IVec3::ZERO, IVec3::splat(2), "#area");

        assert!(f.area.begin_resize());
        let frames = [
            // x and y inverted at once
            GridBox { min: IVec3::ZERO, max: IVec3::new(-3, -1, 5) },
            // min dragged past max on every axis
            GridBox { min: IVec3::new(4, 4, 1), max: IVec3::new(1, 1, 1) },
            // both bounds crossed on x and z
            GridBox { min: IVec3::new(3, -2, 6), max: IVec3::new(-4, 2, 0) },
            GridBox { min: IVec3::splat(-2), max: IVec3::splat(3) },
            GridBox { min: IVec3::splat(5), max: IVec3::splat(-5) },
            GridBox { min: IVec3::new(-1, 0, -1), max: IVec3::new(2, 1, 2) },
        ];
        for frame in frames {
            let clamped = f.area.resize(frame, &f.store).unwrap();
            assert!(clamped.is_valid(), "frame {:?} clamped to {:?}", frame, clamped);
        }

        f.area.finish_resize(&mut f.store, &mut f.selection, &mut f.history).unwrap();
        let bounds = f.bounds();
        assert!(bounds.is_valid());
        assert!(bounds.cells().all(|p| f.store.occupied_at(p)));
        assert_eq!(f.store.len() as u64, bounds.volume());
    }
}
