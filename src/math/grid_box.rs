//! Inclusive axis-aligned integer box

use serde::{Deserialize, Serialize};

use crate::core::types::IVec3;
use super::direction::Direction;

/// Axis-aligned integer box with inclusive bounds.
///
/// Constructors always produce `min <= max` on every axis; a box spanning a
/// single cell has `min == max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl GridBox {
    /// Box spanning two arbitrary corners (component-wise min/max)
    pub fn from_corners(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// One-cell box
    pub fn single(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    /// Check the `min <= max` invariant
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Number of cells along each axis
    pub fn size(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    /// Total number of cells
    pub fn volume(&self) -> u64 {
        let size = self.size();
        size.x as u64 * size.y as u64 * size.z as u64
    }

    /// Check if a cell lies inside the box
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Iterate every cell of the box
    pub fn cells(&self) -> impl Iterator<Item = IVec3> + use<> {
        let GridBox { min, max } = *self;
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y).flat_map(move |y| {
                (min.z..=max.z).map(move |z| IVec3::new(x, y, z))
            })
        })
    }

    /// Cells of this box that lie outside `other`
    pub fn cells_outside<'a>(&self, other: &'a GridBox) -> impl Iterator<Item = IVec3> + 'a {
        self.cells().filter(move |p| !other.contains(*p))
    }

    /// Box grown by one cell on the face facing `dir`
    pub fn expanded(&self, dir: Direction) -> GridBox {
        let mut out = *self;
        if dir.is_positive() {
            out.max += dir.offset();
        } else {
            out.min += dir.offset();
        }
        out
    }

    /// Box shrunk by one cell on the face facing `dir`.
    ///
    /// Returns `None` when the box is a single cell thick along that axis.
    pub fn contracted(&self, dir: Direction) -> Option<GridBox> {
        let axis = dir.axis();
        if self.min[axis] >= self.max[axis] {
            return None;
        }
        let mut out = *self;
        if dir.is_positive() {
            out.max[axis] -= 1;
        } else {
            out.min[axis] += 1;
        }
        Some(out)
    }

    /// Clamp a candidate box produced by dragging a handle of `prev`.
    ///
    /// On any axis where the candidate is inverted, the bound that moved is
    /// pinned to the bound that stayed, leaving a one-cell slab.
    pub fn clamped_from(prev: &GridBox, candidate: GridBox) -> GridBox {
        let mut out = candidate;
        for axis in 0..3 {
            if out.min[axis] > out.max[axis] {
                if candidate.min[axis] != prev.min[axis] {
                    out.min[axis] = out.max[axis];
                } else {
                    out.max[axis] = out.min[axis];
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_bounds() {
        let b = GridBox::from_corners(IVec3::new(3, -1, 2), IVec3::new(0, 4, 2));
        assert_eq!(b.min, IVec3::new(0, -1, 2));
        assert_eq!(b.max, IVec3::new(3, 4, 2));
        assert!(b.is_valid());
    }

    #[test]
    fn test_single_cell() {
        let b = GridBox::from_corners(IVec3::ONE, IVec3::ONE);
        assert_eq!(b, GridBox::single(IVec3::ONE));
        assert_eq!(b.volume(), 1);
        assert_eq!(b.cells().collect::<Vec<_>>(), vec![IVec3::ONE]);
    }

    #[test]
    fn test_cells_and_volume() {
        let b = GridBox::from_corners(IVec3::ZERO, IVec3::new(1, 2, 3));
        assert_eq!(b.volume(), 24);
        let cells: Vec<IVec3> = b.cells().collect();
        assert_eq!(cells.len(), 24);
        assert!(cells.iter().all(|c| b.contains(*c)));
    }

    #[test]
    fn test_expand_and_contract() {
        let b = GridBox::from_corners(IVec3::ZERO, IVec3::new(1, 0, 0));

        let grown = b.expanded(Direction::NegX);
        assert_eq!(grown.min.x, -1);
        assert_eq!(grown.max, b.max);

        let shrunk = b.contracted(Direction::PosX).unwrap();
        assert_eq!(shrunk, GridBox::single(IVec3::ZERO));

        // y is one cell thick
        assert!(b.contracted(Direction::PosY).is_none());
        assert!(shrunk.contracted(Direction::NegX).is_none());
    }

    #[test]
    fn test_cells_outside() {
        let big = GridBox::from_corners(IVec3::ZERO, IVec3::new(2, 0, 0));
        let small = GridBox::from_corners(IVec3::ZERO, IVec3::new(1, 0, 0));
        let outside: Vec<IVec3> = big.cells_outside(&small).collect();
        assert_eq!(outside, vec![IVec3::new(2, 0, 0)]);
    }

    #[test]
    fn test_clamped_from_pins_moving_bound() {
        let prev = GridBox::from_corners(IVec3::ZERO, IVec3::new(3, 3, 3));

        // max.x dragged past min.x
        let candidate = GridBox { min: IVec3::ZERO, max: IVec3::new(-2, 3, 3) };
        let clamped = GridBox::clamped_from(&prev, candidate);
        assert_eq!(clamped.min.x, 0);
        assert_eq!(clamped.max.x, 0);

        // min.y dragged past max.y
        let candidate = GridBox { min: IVec3::new(0, 7, 0), max: IVec3::new(3, 3, 3) };
        let clamped = GridBox::clamped_from(&prev, candidate);
        assert_eq!(clamped.min.y, 3);
        assert_eq!(clamped.max.y, 3);
        assert!(clamped.is_valid());
    }
}
