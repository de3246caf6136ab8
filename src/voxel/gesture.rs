//! Interaction state machine for pointer gestures.

use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use super::drag::DragSession;

/// How a click inside a selecting gesture picks voxels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectMode {
    /// Toggle the clicked voxel
    #[default]
    Single,
    /// Every voxel with the clicked voxel's color
    Color,
    /// The clicked voxel's face-connected component
    Connected,
}

/// Current interaction state. Exactly one gesture is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Selecting(SelectMode),
    DraggingArea { start: IVec3, current: IVec3 },
    ResizingHandle,
    DraggingVoxels(DragSession),
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Selecting(_) => "selecting",
            Gesture::DraggingArea { .. } => "dragging area",
            Gesture::ResizingHandle => "resizing handle",
            Gesture::DraggingVoxels(_) => "dragging voxels",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Enter `next`. Only allowed from `Idle`.
    pub fn begin(&mut self, next: Gesture) -> Result<()> {
        if !self.is_idle() {
            return Err(Error::Gesture(format!(
                "cannot start {} while {}",
                next.name(),
                self.name()
            )));
        }
        log::debug!("Gesture: {} -> {}", self.name(), next.name());
        *self = next;
        Ok(())
    }

    /// Leave the current gesture, returning it.
    pub fn end(&mut self) -> Gesture {
        std::mem::take(self)
    }

    /// Error for an operation that needs a different gesture
    pub fn mismatch(&self, expected: &str) -> Error {
        Error::Gesture(format!("expected {}, but {}", expected, self.name()))
    }
}
