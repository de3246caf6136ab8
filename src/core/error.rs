//! Error types for the voxel editor

use thiserror::Error;

/// Main error type for the editor.
///
/// Edit operations report recoverable conditions (occupied cells, rejected
/// area steps, invalid import records) through their return values; this
/// type only covers failures the caller has to act on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Gesture error: {0}")]
    Gesture(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
