//! Editor: owns the voxel store and every engine that edits it.
//!
//! Each method that changes the store as one user action ends with at most
//! one history save. Undo replaces the store with the previous snapshot
//! without saving.

use serde_json::Value;

use crate::core::config::EditorConfig;
use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use crate::math::{Direction, GridBox};
use super::area::{AreaEngine, AreaPreview, ResizeOutcome, ResizePreview};
use super::drag::{self, DragSession};
use super::gesture::{Gesture, SelectMode};
use super::history::History;
use super::records::{self, ImportReport, VoxelRecord};
use super::selection::{Selection, SelectionChange};
use super::store::{StoreEvent, VoxelStore};
use super::voxel::Color;

/// Counts shown in the status bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorStatus {
    pub voxel_count: usize,
    pub selection_count: usize,
    pub can_undo: bool,
}

pub struct Editor {
    config: EditorConfig,
    paint_color: Color,
    store: VoxelStore,
    selection: Selection,
    area: AreaEngine,
    history: History,
    gesture: Gesture,
}

impl Editor {
    /// Create an empty editor. The empty scene is recorded as the first
    /// snapshot so the first edit can be undone.
    pub fn new(config: EditorConfig) -> Self {
        let store = VoxelStore::new();
        let mut history = History::with_limit(config.history_limit);
        history.save(store.snapshot());

        Self {
            paint_color: Color::from(config.paint_color.as_str()),
            config,
            store,
            selection: Selection::new(),
            area: AreaEngine::new(),
            history,
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn area(&self) -> &AreaEngine {
        &self.area
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn paint_color(&self) -> &Color {
        &self.paint_color
    }

    pub fn set_paint_color(&mut self, color: impl Into<Color>) {
        self.paint_color = color.into();
    }

    fn save(&mut self) {
        self.history.save(self.store.snapshot());
    }

    // --- single-cell edits ---

    /// Place a voxel with the current paint color.
    pub fn place(&mut self, position: IVec3) -> bool {
        let color = self.paint_color.clone();
        self.place_with(position, color)
    }

    /// Place a voxel. Returns false if the cell is already filled.
    pub fn place_with(&mut self, position: IVec3, color: impl Into<Color>) -> bool {
        if self.store.add(position, color).is_none() {
            return false;
        }
        self.save();
        true
    }

    /// Remove the voxel at `position`. Returns false if the cell is empty.
    pub fn remove_at(&mut self, position: IVec3) -> bool {
        if self.store.remove(position, &mut self.selection).is_none() {
            return false;
        }
        self.save();
        true
    }

    /// Repaint the voxel at `position` with the current paint color.
    pub fn paint_at(&mut self, position: IVec3) -> bool {
        if self.store.set_color(position, self.paint_color.clone()).is_none() {
            return false;
        }
        self.save();
        true
    }

    // --- selection ---

    pub fn toggle_select(&mut self, position: IVec3) -> bool {
        self.selection.toggle_single(&self.store, position)
    }

    pub fn select_by_color(&mut self, position: IVec3) -> usize {
        self.selection.select_by_color(&self.store, position)
    }

    pub fn select_connected(&mut self, position: IVec3) -> usize {
        self.selection.select_connected(&self.store, position)
    }

    pub fn select_all(&mut self) -> usize {
        self.selection.select_all(&self.store)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn delete_selected(&mut self) -> usize {
        self.selection.delete_selected(&mut self.store, &mut self.history)
    }

    /// Paint every selected voxel with the current paint color.
    pub fn recolor_selected(&mut self) -> usize {
        self.selection
            .recolor_selected(&self.paint_color, &mut self.store, &mut self.history)
    }

    // --- area ---

    /// Fill the box spanning `start` and `end` with the paint color.
    pub fn fill(&mut self, start: IVec3, end: IVec3) -> usize {
        let color = self.paint_color.clone();
        self.area.fill(&mut self.store, &mut self.history, start, end, color)
    }

    pub fn expand_area(&mut self, dir: Direction) -> Option<usize> {
        self.area.expand(dir, &mut self.store, &mut self.history)
    }

    pub fn contract_area(&mut self, dir: Direction) -> Option<usize> {
        self.area
            .contract(dir, &mut self.store, &mut self.selection, &mut self.history)
    }

    pub fn preview_fill(&mut self, start: IVec3, end: IVec3) -> &AreaPreview {
        let color = self.paint_color.clone();
        self.area.preview(&self.store, start, end, color)
    }

    pub fn resize_preview(&self) -> ResizePreview {
        self.area.resize_preview()
    }

    pub fn clear_area(&mut self) {
        self.area.clear();
    }

    // --- moving ---

    pub fn can_move_selection(&self, delta: IVec3) -> bool {
        drag::can_move(&self.store, &self.selection, delta)
    }

    pub fn move_selection(&mut self, delta: IVec3) -> bool {
        drag::move_by(&mut self.store, &mut self.selection, &mut self.history, delta)
    }

    // --- history and scene ---

    /// Restore the previous snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.cancel_gesture();
        self.area.clear();
        self.store.restore(&snapshot, &mut self.selection);
        log::debug!("Undo: restored {} voxels", snapshot.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Remove every voxel. Saves once if the scene was not already empty.
    pub fn clear_scene(&mut self) {
        self.cancel_gesture();
        self.area.clear();
        let was_empty = self.store.is_empty();
        self.store.clear(&mut self.selection);
        if !was_empty {
            self.save();
        }
    }

    /// Replace the scene with a batch of raw records, saving once.
    pub fn load_model(&mut self, values: &[Value]) -> ImportReport {
        self.cancel_gesture();
        self.area.clear();
        self.store.clear(&mut self.selection);
        let report = records::import_values(&mut self.store, values);
        self.save();
        log::info!(
            "Loaded model: {} voxels ({} skipped)",
            report.applied, report.skipped
        );
        report
    }

    /// Merge a batch of raw records into the scene, saving once if any applied.
    pub fn import(&mut self, values: &[Value]) -> ImportReport {
        let report = records::import_values(&mut self.store, values);
        if report.applied > 0 {
            self.save();
        }
        report
    }

    pub fn export(&self) -> Vec<VoxelRecord> {
        records::export_records(&self.store)
    }

    // --- status and notifications ---

    pub fn voxel_count(&self) -> usize {
        self.store.len()
    }

    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    pub fn status(&self) -> EditorStatus {
        EditorStatus {
            voxel_count: self.voxel_count(),
            selection_count: self.selection_count(),
            can_undo: self.can_undo(),
        }
    }

    pub fn take_store_events(&mut self) -> Vec<StoreEvent> {
        self.store.take_events()
    }

    pub fn take_selection_changes(&mut self) -> Vec<SelectionChange> {
        self.selection.take_changes()
    }

    // --- gestures ---

    pub fn begin_select(&mut self, mode: SelectMode) -> Result<()> {
        self.gesture.begin(Gesture::Selecting(mode))
    }

    /// Apply the active select mode to the voxel at `position`.
    /// Returns the selection size afterwards.
    pub fn click(&mut self, position: IVec3) -> Result<usize> {
        let Gesture::Selecting(mode) = self.gesture else {
            return Err(self.gesture.mismatch("selecting"));
        };
        match mode {
            SelectMode::Single => {
                self.toggle_select(position);
            }
            SelectMode::Color => {
                self.select_by_color(position);
            }
            SelectMode::Connected => {
                self.select_connected(position);
            }
        }
        Ok(self.selection.len())
    }

    pub fn end_select(&mut self) -> Result<()> {
        if !matches!(self.gesture, Gesture::Selecting(_)) {
            return Err(self.gesture.mismatch("selecting"));
        }
        self.gesture.end();
        Ok(())
    }

    pub fn begin_area_drag(&mut self, start: IVec3) -> Result<&AreaPreview> {
        self.gesture.begin(Gesture::DraggingArea { start, current: start })?;
        Ok(self.preview_fill(start, start))
    }

    pub fn update_area_drag(&mut self, current: IVec3) -> Result<&AreaPreview> {
        let Gesture::DraggingArea { start, .. } = self.gesture else {
            return Err(self.gesture.mismatch("dragging area"));
        };
        self.gesture = Gesture::DraggingArea { start, current };
        Ok(self.preview_fill(start, current))
    }

    /// Fill the dragged box. Returns the number of voxels added.
    pub fn finish_area_drag(&mut self) -> Result<usize> {
        let Gesture::DraggingArea { start, current } = self.gesture else {
            return Err(self.gesture.mismatch("dragging area"));
        };
        self.gesture.end();
        Ok(self.fill(start, current))
    }

    pub fn begin_handle_resize(&mut self) -> Result<()> {
        if !self.gesture.is_idle() {
            return Err(self.gesture.mismatch("idle"));
        }
        if !self.area.begin_resize() {
            return Err(Error::Gesture("no active area to resize".into()));
        }
        self.gesture.begin(Gesture::ResizingHandle)
    }

    /// Feed one drag sample. Returns the clamped box.
    pub fn update_handle_resize(&mut self, candidate: GridBox) -> Result<GridBox> {
        if self.gesture != Gesture::ResizingHandle {
            return Err(self.gesture.mismatch("resizing handle"));
        }
        self.area
            .resize(candidate, &self.store)
            .ok_or_else(|| self.gesture.mismatch("an active area"))
    }

    pub fn finish_handle_resize(&mut self) -> Result<ResizeOutcome> {
        if self.gesture != Gesture::ResizingHandle {
            return Err(self.gesture.mismatch("resizing handle"));
        }
        self.gesture.end();
        self.area
            .finish_resize(&mut self.store, &mut self.selection, &mut self.history)
            .ok_or_else(|| Error::Gesture("resize lost its area".into()))
    }

    pub fn begin_voxel_drag(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            return Err(Error::Gesture("nothing selected to drag".into()));
        }
        self.gesture.begin(Gesture::DraggingVoxels(DragSession::new()))
    }

    /// Feed one drag sample with the total offset since the drag began.
    /// Returns whether the selection could be dropped there.
    pub fn update_voxel_drag(&mut self, offset: IVec3) -> Result<bool> {
        let Gesture::DraggingVoxels(session) = &mut self.gesture else {
            return Err(self.gesture.mismatch("dragging voxels"));
        };
        Ok(session.update(&self.store, &self.selection, offset))
    }

    /// Drop the selection at the last sampled offset. Returns true if it moved.
    pub fn finish_voxel_drag(&mut self) -> Result<bool> {
        let Gesture::DraggingVoxels(session) = self.gesture else {
            return Err(self.gesture.mismatch("dragging voxels"));
        };
        self.gesture.end();
        Ok(session.commit(&mut self.store, &mut self.selection, &mut self.history))
    }

    /// Abandon the current gesture without touching the store.
    pub fn cancel_gesture(&mut self) {
        match self.gesture.end() {
            Gesture::ResizingHandle => self.area.cancel_resize(),
            Gesture::DraggingArea { .. } => self.area.clear_preview(),
            _ => {}
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
