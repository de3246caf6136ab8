//! Voxel data type

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::types::IVec3;

/// Voxel color as entered by the user (typically `#rrggbb`).
///
/// Colors compare by exact string equality; no normalization is applied.
/// Clones share the underlying string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Arc<str>);

impl Color {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Arc::from(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A filled grid cell
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    /// Integer grid coordinate
    pub position: IVec3,
    /// Paint color
    pub color: Color,
}

impl Voxel {
    pub fn new(position: IVec3, color: impl Into<Color>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }
}
