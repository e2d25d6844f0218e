// Dense 3D occupancy grid.
//
// The grid is stored as a flat `Vec<u8>`, one byte per voxel, indexed by
// `x * height * depth + y * depth + z`. A zero byte is air; any nonzero byte
// is solid. This byte layout is the external data contract: callers hand the
// solver a buffer in exactly this order, and `as_bytes()` returns one.
//
// Bounds are always checked before linearization, so no coordinate (negative,
// huge, or otherwise) ever indexes outside the buffer. Out-of-bounds voxels
// read as non-walkable and non-solid; out-of-bounds writes are no-ops.
//
// `from_bytes` validates the buffer length against the declared dimensions
// and refuses mismatches instead of guessing. The dimensions are private and
// fixed at construction, so the length invariant holds for the grid's whole
// life; a different shape means building a new grid.
//
// See also: `solver.rs` which owns the active grid, `pathfinding.rs` which
// queries `is_walkable`, `qc.rs` which queries `is_solid`.

use crate::error::SolverError;
use crate::types::VoxelCoord;

/// Dense 3D solid/air field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Flat storage: index = x * height * depth + y * depth + z.
    voxels: Vec<u8>,
    width: u32,
    height: u32,
    depth: u32,
}

/// `width * height * depth`, or `GridTooLarge` if it overflows `usize`.
fn voxel_count(width: u32, height: u32, depth: u32) -> Result<usize, SolverError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(depth as usize))
        .ok_or(SolverError::GridTooLarge {
            width,
            height,
            depth,
        })
}

impl OccupancyGrid {
    /// Create a new grid filled with air.
    ///
    /// # Panics
    ///
    /// Panics if the voxel count overflows `usize`. Use `try_new` for
    /// untrusted dimensions.
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self::try_new(width, height, depth).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Create a new grid filled with air, failing on overflowing dimensions.
    pub fn try_new(width: u32, height: u32, depth: u32) -> Result<Self, SolverError> {
        let total = voxel_count(width, height, depth)?;
        Ok(Self {
            voxels: vec![0; total],
            width,
            height,
            depth,
        })
    }

    /// Build a grid from an occupancy buffer (0 = air, nonzero = solid).
    ///
    /// Fails if `data.len()` is not exactly `width * height * depth`.
    pub fn from_bytes(
        data: Vec<u8>,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<Self, SolverError> {
        let expected = voxel_count(width, height, depth)?;
        if data.len() != expected {
            return Err(SolverError::GridSizeMismatch {
                expected,
                actual: data.len(),
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            voxels: data,
            width,
            height,
            depth,
        })
    }

    /// Grid dimensions as `(width, height, depth)`.
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    /// Check whether a coordinate is within bounds.
    pub fn in_bounds(&self, coord: VoxelCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
            && (coord.z as u32) < self.depth
    }

    /// Convert a coordinate to a flat index. Returns `None` if out of bounds.
    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            let x = coord.x as usize;
            let y = coord.y as usize;
            let z = coord.z as usize;
            let h = self.height as usize;
            let d = self.depth as usize;
            Some(x * h * d + y * d + z)
        } else {
            None
        }
    }

    /// True for an in-bounds solid voxel. Out-of-bounds reads are not solid.
    pub fn is_solid(&self, coord: VoxelCoord) -> bool {
        self.index(coord).is_some_and(|i| self.voxels[i] != 0)
    }

    /// True for an in-bounds air voxel. Anything outside the grid is not
    /// walkable.
    pub fn is_walkable(&self, coord: VoxelCoord) -> bool {
        self.index(coord).is_some_and(|i| self.voxels[i] == 0)
    }

    /// Mark a voxel solid or air. No-op for out-of-bounds coordinates.
    pub fn set_solid(&mut self, coord: VoxelCoord, solid: bool) {
        if let Some(i) = self.index(coord) {
            self.voxels[i] = u8::from(solid);
        }
    }

    /// The occupancy buffer in load order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.voxels
    }

    /// Number of solid voxels.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&b| b != 0).count()
    }
}
