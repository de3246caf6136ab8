//! Voxel grid editing: store, selection, area, drag-move and undo history

pub mod voxel;
pub mod store;
pub mod selection;
pub mod area;
pub mod drag;
pub mod history;
pub mod records;
pub mod gesture;
pub mod editor;

pub use voxel::{Color, Voxel};
pub use store::{StoreEvent, VoxelStore};
pub use selection::{Selection, SelectionChange, connected_component};
pub use area::{Area, AreaEngine, AreaPreview, ResizeOutcome, ResizePreview};
pub use drag::{DragSession, can_move, move_by};
pub use history::{History, Snapshot};
pub use records::{ImportReport, VoxelRecord};
pub use gesture::{Gesture, SelectMode};
pub use editor::{Editor, EditorStatus};
