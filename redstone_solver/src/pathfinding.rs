// A* wire routing over the occupancy grid.
//
// Implements standard A* using a `BinaryHeap` (min-heap via reversed
// ordering). Vertices are grid voxels; each voxel has six axis-aligned
// neighbors. Scores and predecessors live in `FxHashMap`s keyed by
// `VoxelCoord` because only a small fraction of a large grid is usually
// touched. All search state is local to one call.
//
// Admission rules:
// - a neighbor must be walkable (in bounds and air), except the goal itself,
//   which is always admitted so a route can end on or against an existing
//   structure;
// - the start voxel is never checked, so a route may begin inside a solid
//   block (e.g. a powered block the wire hangs off).
//
// Edge weights come from `CostModel` (vertical steps cost more). The
// heuristic is Manhattan distance times the cheapest step cost, which is
// admissible and consistent for axis-aligned moves, so the first time the
// goal is popped its cost is optimal. Ties on f are broken by lower h, then
// by coordinate order, so identical inputs give identical paths.
//
// The request's signal strength, vertical flag and delay window are carried
// through but not yet consulted; repeater insertion will use them.
//
// See also: `grid.rs` for walkability, `cost.rs` for edge weights,
// `solver.rs` which calls `find_path` against its loaded grid.

use crate::cost::CostModel;
use crate::grid::OccupancyGrid;
use crate::types::{FACE_OFFSETS, MAX_SIGNAL_STRENGTH, VoxelCoord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// One routing query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start: VoxelCoord,
    pub end: VoxelCoord,
    /// Power level the signal must arrive with (0-15).
    pub signal_strength: u8,
    /// Whether the route may change y level.
    pub allow_vertical: bool,
    /// Lower bound of the delay window, in redstone ticks.
    pub min_delay: u32,
    /// Upper bound of the delay window, in redstone ticks.
    pub max_delay: u32,
}

impl PathRequest {
    /// A request at full strength with vertical routing allowed and no delay.
    pub fn new(start: VoxelCoord, end: VoxelCoord) -> Self {
        Self {
            start,
            end,
            signal_strength: MAX_SIGNAL_STRENGTH,
            allow_vertical: true,
            min_delay: 0,
            max_delay: 0,
        }
    }
}

/// The outcome of a routing query.
///
/// `path` and `blocks` always have the same length. On failure both are
/// empty and `success` is false.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    pub success: bool,
    /// Voxels from start to end (inclusive).
    pub path: Vec<VoxelCoord>,
    /// Block ID to place at the matching `path` voxel.
    pub blocks: Vec<String>,
    /// Summed step cost of `path`.
    pub total_cost: u64,
}

impl PathResult {
    /// The empty, unsuccessful result.
    pub fn failure() -> Self {
        Self::default()
    }

    /// `(voxel, block)` pairs in placement order.
    pub fn placements(&self) -> impl Iterator<Item = (VoxelCoord, &str)> + '_ {
        self.path
            .iter()
            .copied()
            .zip(self.blocks.iter().map(String::as_str))
    }

    /// Number of voxels to place.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Counters from one search, for logging and benchmarks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Voxels moved to the closed set.
    pub expanded: usize,
    /// Entries pushed onto the open heap (including stale duplicates).
    pub pushed: usize,
}

// ---------------------------------------------------------------------------
// Open set
// ---------------------------------------------------------------------------

/// Entry in the A* open set (min-heap via reversed ordering).
#[derive(PartialEq, Eq)]
struct OpenEntry {
    node: VoxelCoord,
    f_score: u64,
    h_score: u64,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score is "greatest". Lower h wins
        // ties so the search dives toward the goal.
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.h_score.cmp(&self.h_score))
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Find a cheapest wire route for `request`, assigning `wire_block` to every
/// voxel of the result.
pub fn find_path(
    grid: &OccupancyGrid,
    request: &PathRequest,
    costs: &CostModel,
    wire_block: &str,
) -> PathResult {
    find_path_with_stats(grid, request, costs, wire_block).0
}

/// Like `find_path`, but also reports how much work the search did.
pub fn find_path_with_stats(
    grid: &OccupancyGrid,
    request: &PathRequest,
    costs: &CostModel,
    wire_block: &str,
) -> (PathResult, SearchStats) {
    let start = request.start;
    let goal = request.end;
    let mut stats = SearchStats::default();

    if start == goal {
        return (
            PathResult {
                success: true,
                path: vec![start],
                blocks: vec![wire_block.to_string()],
                total_cost: 0,
            },
            stats,
        );
    }

    let h_scale = u64::from(costs.min_step_cost());

    // g_score[node] = cost of cheapest known path from start to node.
    let mut g_score: FxHashMap<VoxelCoord, u64> = FxHashMap::default();
    // came_from[node] = predecessor on that cheapest path.
    let mut came_from: FxHashMap<VoxelCoord, VoxelCoord> = FxHashMap::default();
    let mut closed: FxHashSet<VoxelCoord> = FxHashSet::default();

    g_score.insert(start, 0);

    let mut open = BinaryHeap::new();
    let h_start = heuristic(start, goal, h_scale);
    open.push(OpenEntry {
        node: start,
        f_score: h_start,
        h_score: h_start,
    });
    stats.pushed += 1;

    while let Some(current) = open.pop() {
        let current_id = current.node;

        if closed.contains(&current_id) {
            continue;
        }

        if current_id == goal {
            let total_cost = g_score.get(&goal).copied().unwrap_or_default();
            let path = reconstruct_path(&came_from, start, goal);
            let blocks = vec![wire_block.to_string(); path.len()];
            return (
                PathResult {
                    success: true,
                    path,
                    blocks,
                    total_cost,
                },
                stats,
            );
        }

        closed.insert(current_id);
        stats.expanded += 1;

        let current_g = g_score.get(&current_id).copied().unwrap_or_default();

        for (neighbor, step) in neighbors(grid, current_id, goal, costs) {
            if closed.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g.saturating_add(step);

            let improves = g_score.get(&neighbor).is_none_or(|&g| tentative_g < g);
            if improves {
                g_score.insert(neighbor, tentative_g);
                came_from.insert(neighbor, current_id);
                let h = heuristic(neighbor, goal, h_scale);
                open.push(OpenEntry {
                    node: neighbor,
                    f_score: tentative_g.saturating_add(h),
                    h_score: h,
                });
                stats.pushed += 1;
            }
        }
    }

    (PathResult::failure(), stats) // No path found.
}

/// Admissible heuristic: Manhattan distance times the cheapest step cost.
/// Saturates at `u64::MAX` for unvalidated costs across extreme spans.
fn heuristic(from: VoxelCoord, to: VoxelCoord, scale: u64) -> u64 {
    from.manhattan_distance(to).saturating_mul(scale)
}

/// Enterable axis-aligned neighbors of `node` with their step costs.
fn neighbors(
    grid: &OccupancyGrid,
    node: VoxelCoord,
    goal: VoxelCoord,
    costs: &CostModel,
) -> SmallVec<[(VoxelCoord, u64); 6]> {
    FACE_OFFSETS
        .iter()
        .filter_map(|&(dx, dy, dz)| {
            let next = node.checked_offset(dx, dy, dz)?;
            (next == goal || grid.is_walkable(next))
                .then_some((next, u64::from(costs.step_cost(dy))))
        })
        .collect()
}

/// Walk predecessors back from `goal` and return the start-to-goal path.
fn reconstruct_path(
    came_from: &FxHashMap<VoxelCoord, VoxelCoord>,
    start: VoxelCoord,
    goal: VoxelCoord,
) -> Vec<VoxelCoord> {
    let mut nodes = Vec::new();
    let mut current = goal;

    loop {
        nodes.push(current);
        if current == start {
            break;
        }
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }

    nodes.reverse();
    nodes
}
