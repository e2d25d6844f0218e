// redstone_solver — spatial solver for redstone wiring.
//
// Given a voxel occupancy grid (solid/air) and a start and end voxel, this
// crate finds a cheapest buildable wire route between them and reports the
// block to place at each voxel. It also answers quasi-connectivity questions
// about piston placements. It has no I/O, no rendering, and no knowledge of
// the surrounding world beyond the occupancy bytes it is handed.
//
// Module overview:
// - `solver.rs`:      `SpatialSolver` host object — load_grid / find_path / check_qc_violation.
// - `grid.rs`:        Dense 3D occupancy grid with bounds-checked queries.
// - `pathfinding.rs`: A* over the grid; `PathRequest` / `PathResult`.
// - `cost.rs`:        Step and placement costs (`CostModel`).
// - `qc.rs`:          Quasi-connectivity check for pistons.
// - `config.rs`:      `SolverConfig` — tunable costs and ranges, loaded from JSON.
// - `error.rs`:       `SolverError` for grid loading and configuration.
// - `types.rs`:       `VoxelCoord`, block identifiers.
//
// Logging goes through `tracing`; the crate never installs a subscriber.
//
// **Critical constraint: determinism.** A search is a pure function of the
// loaded grid, the configuration and the request. Open-set ties are broken by
// a fixed ordering, so identical inputs return identical paths.

pub mod config;
pub mod cost;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod qc;
pub mod solver;
pub mod types;

pub use config::SolverConfig;
pub use error::SolverError;
pub use grid::OccupancyGrid;
pub use pathfinding::{PathRequest, PathResult};
pub use solver::SpatialSolver;
pub use types::VoxelCoord;
