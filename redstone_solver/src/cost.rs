// Movement and placement costs for redstone routing.
//
// Costs are small positive integers reflecting real build effort: a plain
// wire step is the unit, a vertical step costs more because redstone can't
// run straight up and needs a staircase of support blocks, and a repeater
// costs more still because every one adds a tick of delay.
//
// The free functions below are the canonical values. `CostModel` carries the
// same three numbers as data so they can be tuned through `SolverConfig`;
// `CostModel::default()` is exactly the free functions.
//
// Every cost must be at least 1. The search heuristic is Manhattan distance
// scaled by the cheapest step, which is only admissible while that holds.
// Configured costs are also capped at `MAX_STEP_COST`; search scores
// saturate rather than wrap if a hand-built `CostModel` goes past it.
//
// See also: `pathfinding.rs` which reads edge weights from here,
// `config.rs` which validates configured costs.

use serde::{Deserialize, Serialize};

/// What a single step or placement represents, for costing purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// A step along x or z.
    Horizontal,
    /// A step along y.
    Vertical,
    /// A repeater placement. Not produced by the search yet.
    Repeater,
}

/// Largest per-step cost a config may set.
pub const MAX_STEP_COST: u32 = u16::MAX as u32;

/// Cost of one horizontal wire step.
pub const fn horizontal_cost() -> u32 {
    1
}

/// Cost of one vertical wire step.
pub const fn vertical_cost() -> u32 {
    2
}

/// Cost of inserting a repeater.
pub const fn repeater_cost() -> u32 {
    4
}

/// Classify an axis-aligned step by its offset. Any nonzero y component
/// makes it vertical.
pub const fn move_kind(dy: i32) -> MoveKind {
    if dy != 0 {
        MoveKind::Vertical
    } else {
        MoveKind::Horizontal
    }
}

/// Default cost of a step with the given y offset.
pub const fn step_cost(dy: i32) -> u32 {
    match move_kind(dy) {
        MoveKind::Vertical => vertical_cost(),
        _ => horizontal_cost(),
    }
}

/// Configured edge weights for the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    pub horizontal: u32,
    pub vertical: u32,
    pub repeater: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            horizontal: horizontal_cost(),
            vertical: vertical_cost(),
            repeater: repeater_cost(),
        }
    }
}

impl CostModel {
    pub fn cost(&self, kind: MoveKind) -> u32 {
        match kind {
            MoveKind::Horizontal => self.horizontal,
            MoveKind::Vertical => self.vertical,
            MoveKind::Repeater => self.repeater,
        }
    }

    /// Cost of a step with the given y offset.
    pub fn step_cost(&self, dy: i32) -> u32 {
        self.cost(move_kind(dy))
    }

    /// The cheapest single step the search can take. Scales the heuristic.
    pub fn min_step_cost(&self) -> u32 {
        self.horizontal.min(self.vertical)
    }
}
