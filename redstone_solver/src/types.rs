// Core types shared across the solver.
//
// Defines the spatial coordinate (`VoxelCoord`) used as the identity of every
// voxel in the occupancy grid and every vertex of the path search, plus the
// block identifiers the solver places or inspects. Block types travel through
// the public API as plain strings (`minecraft:redstone_wire` etc.) because
// that is what callers hand to the game; the `blocks` module names the ones
// the solver itself knows about.
//
// See also: `grid.rs` for the occupancy grid indexed by `VoxelCoord`,
// `pathfinding.rs` which uses it as a hash key, `qc.rs` which matches on
// the piston identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 3D voxel grid. Each component is in voxel units.
///
/// Y is the vertical axis (positive = up), matching Minecraft's convention.
/// Equality and hashing are componentwise. The derived total order carries
/// no spatial meaning; the search only uses it to break ties deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance between two coordinates. Computed in 64 bits so
    /// coordinates at opposite ends of the `i32` range cannot overflow.
    pub fn manhattan_distance(self, other: Self) -> u64 {
        (i64::from(self.x) - i64::from(other.x)).unsigned_abs()
            + (i64::from(self.y) - i64::from(other.y)).unsigned_abs()
            + (i64::from(self.z) - i64::from(other.z)).unsigned_abs()
    }

    /// This coordinate shifted by `(dx, dy, dz)`, or `None` if any component
    /// leaves the `i32` range.
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The six axis-aligned unit steps, in expansion order: ±x, ±y, ±z.
pub const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

// ---------------------------------------------------------------------------
// Block identifiers
// ---------------------------------------------------------------------------

/// Namespaced block IDs the solver emits or reacts to.
pub mod blocks {
    /// Redstone dust. Every voxel of a returned path is assigned this type.
    pub const REDSTONE_WIRE: &str = "minecraft:redstone_wire";
    /// Signal repeater. Not emitted yet; see `cost::repeater_cost`.
    pub const REPEATER: &str = "minecraft:repeater";
    pub const PISTON: &str = "minecraft:piston";
    pub const STICKY_PISTON: &str = "minecraft:sticky_piston";
}

/// Highest redstone power level. Also the default `signal_strength` of a
/// `PathRequest`.
pub const MAX_SIGNAL_STRENGTH: u8 = 15;

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn voxel_coord_manhattan_distance() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(3, -4, 5);
        assert_eq!(a.manhattan_distance(b), 12);
        assert_eq!(b.manhattan_distance(a), 12);
        assert_eq!(a.manhattan_distance(a), 0);
        let lo = VoxelCoord::new(i32::MIN, i32::MIN, i32::MIN);
        let hi = VoxelCoord::new(i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(lo.manhattan_distance(hi), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn voxel_coord_hash_is_structural() {
        let mut set = FxHashSet::default();
        set.insert(VoxelCoord::new(1, 2, 3));
        assert!(set.contains(&VoxelCoord::new(1, 2, 3)));
        // Permuted components are distinct keys.
        assert!(!set.contains(&VoxelCoord::new(3, 2, 1)));
        assert!(!set.contains(&VoxelCoord::new(2, 1, 3)));
    }

    #[test]
    fn offset_and_tuple_conversion() {
        let c: VoxelCoord = (4, 5, 6).into();
        assert_eq!(c.checked_offset(-1, 2, 0), Some(VoxelCoord::new(3, 7, 6)));
        assert_eq!(c.checked_offset(1, 0, 0), Some(VoxelCoord::new(5, 5, 6)));
        assert_eq!(VoxelCoord::new(i32::MAX, 0, 0).checked_offset(1, 0, 0), None);
    }

    #[test]
    fn face_offsets_are_unit_steps() {
        for &(dx, dy, dz) in &FACE_OFFSETS {
            assert_eq!(dx.abs() + dy.abs() + dz.abs(), 1);
        }
    }

    #[test]
    fn display_format() {
        assert_eq!(VoxelCoord::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }

    #[test]
    fn serialization_roundtrip() {
        let c = VoxelCoord::new(7, 8, -9);
        let json = serde_json::to_string(&c).unwrap();
        let restored: VoxelCoord = serde_json::from_str(&json).unwrap();
        assert_eq!(c, restored);
    }
}
