//! Remote protocol - JSON command/response definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer grid coordinate on the wire
pub type Cell = [i32; 3];

/// Commands sent by a remote client, one JSON object per line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum EditCommand {
    /// Place a voxel (paint color when `color` is omitted)
    Place {
        x: i32,
        y: i32,
        z: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Remove the voxel at a cell
    Remove { x: i32, y: i32, z: i32 },
    /// Repaint the voxel at a cell with the paint color
    Paint { x: i32, y: i32, z: i32 },
    /// Change the paint color used by later edits
    SetPaintColor { color: String },
    /// Toggle one voxel in the selection
    SelectSingle { x: i32, y: i32, z: i32 },
    /// Select every voxel with the color of the voxel at a cell
    SelectByColor { x: i32, y: i32, z: i32 },
    /// Select the face-connected component containing a cell
    SelectConnected { x: i32, y: i32, z: i32 },
    SelectAll,
    ClearSelection,
    DeleteSelected,
    /// Paint every selected voxel with the paint color
    RecolorSelected,
    /// Fill the box spanning two corners with the paint color
    Fill { start: Cell, end: Cell },
    /// Report which cells a fill would create
    PreviewFill { start: Cell, end: Cell },
    /// Grow the active area one cell ("+x", "-y", ...)
    ExpandArea { direction: String },
    /// Shrink the active area one cell ("+x", "-y", ...)
    ContractArea { direction: String },
    /// Resize the active area to a new box as one completed handle drag
    ResizeArea { min: Cell, max: Cell },
    /// Drop the active area
    ClearArea,
    /// Move the selection by an offset
    MoveSelection { dx: i32, dy: i32, dz: i32 },
    Undo,
    ClearScene,
    /// Merge raw records into the scene
    Import { records: Vec<serde_json::Value> },
    /// Replace the scene with raw records
    Load { records: Vec<serde_json::Value> },
    /// Dump every voxel
    Export,
    /// Voxel and selection counts
    GetStatus,
    /// Ping (health check)
    Ping,
}

/// Responses sent back, one JSON object per line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum EditResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    Pong { message: String },
    /// Whether the command changed the scene
    Applied { changed: bool },
    /// Number of voxels affected (or selected)
    Count { count: usize },
    Preview { cells: Vec<Cell> },
    Area { min: Cell, max: Cell },
    Import {
        applied: usize,
        skipped: usize,
        conflicts: usize,
    },
    Export { records: Vec<RecordData> },
    Status {
        voxel_count: usize,
        selection_count: usize,
        can_undo: bool,
    },
}

/// One voxel in an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordData {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
}

/// Failure to decode a command line
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,
    #[error("Invalid command JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode one command line.
pub fn parse_command(line: &str) -> Result<EditCommand, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Encode a response as a single newline-terminated line.
pub fn encode_response(response: &EditResponse) -> String {
    let mut json = serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            "{{\"status\":\"error\",\"message\":\"Serialize error: {}\"}}",
            e
        )
    });
    json.push('\n');
    json
}

impl EditResponse {
    pub fn ok(data: ResponseData) -> Self {
        Self::Ok { data }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error {
            message: msg.into(),
        }
    }

    pub fn pong() -> Self {
        Self::ok(ResponseData::Pong {
            message: "pong".into(),
        })
    }

    pub fn none() -> Self {
        Self::ok(ResponseData::None)
    }

    pub fn applied(changed: bool) -> Self {
        Self::ok(ResponseData::Applied { changed })
    }

    pub fn count(count: usize) -> Self {
        Self::ok(ResponseData::Count { count })
    }
}
