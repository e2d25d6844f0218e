// Quasi-connectivity (QC) constraint checks.
//
// Pistons (and sticky pistons) are powered not only by power at their own
// position but also by power reaching the position directly above them, so a
// power source up to two blocks over a piston can fire it. A router placing
// pistons near unrelated structures must avoid that.
//
// The check here is a conservative placeholder: any solid voxel within
// `range` blocks straight above a piston placement counts as a potential
// power source. The occupancy grid has no block identities, so inert stone
// and a redstone block look the same. Expect false positives, never false
// negatives for blocks in the scanned column.
//
// This is a standalone query. The path search does not consult it; callers
// filter their own placements (see `SpatialSolver::validate_placement`).
//
// See also: `grid.rs` for `is_solid`, `solver.rs` for the public entry point.

use crate::grid::OccupancyGrid;
use crate::types::{VoxelCoord, blocks};

/// Default number of voxels above a piston scanned for power sources.
pub const QC_RANGE: u32 = 2;

/// Largest range a config may set. `qc_neighbors` clamps to it, which keeps
/// the enumerated cube under five thousand positions.
pub const MAX_QC_RANGE: u32 = 8;

/// True for block types affected by quasi-connectivity.
pub fn is_qc_sensitive(block_type: &str) -> bool {
    block_type == blocks::PISTON || block_type == blocks::STICKY_PISTON
}

/// Would placing `block_type` at `position` risk unintended QC activation?
///
/// Non-piston blocks never violate. For pistons, scans `1..=range` voxels
/// straight up; voxels outside the grid are never read, so the scan stops at
/// the grid's top layer however large `range` is.
pub fn check_violation(
    grid: &OccupancyGrid,
    position: VoxelCoord,
    block_type: &str,
    range: u32,
) -> bool {
    if !is_qc_sensitive(block_type) {
        return false;
    }
    let (_, height, _) = grid.dimensions();
    let lowest = (i64::from(position.y) + 1).max(0);
    let highest = (i64::from(position.y) + i64::from(range))
        .min(i64::from(height) - 1)
        .min(i64::from(i32::MAX));
    (lowest..=highest).any(|y| {
        i32::try_from(y).is_ok_and(|y| grid.is_solid(VoxelCoord::new(position.x, y, position.z)))
    })
}

/// Every position within the cube of half-extent `range` around
/// `position`, excluding `position` itself. Ordered x, then y, then z.
///
/// `range` is clamped to `MAX_QC_RANGE`. Positions that would fall outside
/// the `i32` coordinate space are skipped.
pub fn qc_neighbors(position: VoxelCoord, range: u32) -> Vec<VoxelCoord> {
    let range = range.min(MAX_QC_RANGE);
    // Both fit in i32/usize after the clamp.
    let r = range as i32;
    let side = 2 * range as usize + 1;
    let mut out = Vec::with_capacity(side * side * side - 1);
    for dx in -r..=r {
        for dy in -r..=r {
            for dz in -r..=r {
                if (dx, dy, dz) == (0, 0, 0) {
                    continue;
                }
                if let Some(n) = position.checked_offset(dx, dy, dz) {
                    out.push(n);
                }
            }
        }
    }
    out
}
