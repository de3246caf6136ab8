//! The six face directions of the voxel lattice

use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;
use crate::core::types::IVec3;

/// One of the six axis-aligned directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    /// All six directions, in `+x,-x,+y,-y,+z,-z` order
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Unit step along this direction
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::PosX => IVec3::X,
            Direction::NegX => IVec3::NEG_X,
            Direction::PosY => IVec3::Y,
            Direction::NegY => IVec3::NEG_Y,
            Direction::PosZ => IVec3::Z,
            Direction::NegZ => IVec3::NEG_Z,
        }
    }

    /// Axis index (0 = x, 1 = y, 2 = z)
    pub fn axis(self) -> usize {
        match self {
            Direction::PosX | Direction::NegX => 0,
            Direction::PosY | Direction::NegY => 1,
            Direction::PosZ | Direction::NegZ => 2,
        }
    }

    /// True for `+x`, `+y`, `+z`
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::PosX | Direction::PosY | Direction::PosZ)
    }

    /// Face-adjacent neighbors of `pos`
    pub fn neighbors(pos: IVec3) -> impl Iterator<Item = IVec3> {
        Self::ALL.into_iter().map(move |dir| pos + dir.offset())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::PosX => "+x",
            Direction::NegX => "-x",
            Direction::PosY => "+y",
            Direction::NegY => "-y",
            Direction::PosZ => "+z",
            Direction::NegZ => "-z",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Accepts `+x` / `x+` style names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let dir = match normalized.as_str() {
            "+x" | "x+" | "x" => Direction::PosX,
            "-x" | "x-" => Direction::NegX,
            "+y" | "y+" | "y" => Direction::PosY,
            "-y" | "y-" => Direction::NegY,
            "+z" | "z+" | "z" => Direction::PosZ,
            "-z" | "z-" => Direction::NegZ,
            _ => return Err(Error::Parse(format!("unknown direction: {s:?}"))),
        };
        Ok(dir)
    }
}
