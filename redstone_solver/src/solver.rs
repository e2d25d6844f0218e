// The solver host: owns the active grid and configuration.
//
// `SpatialSolver` is the object a host application talks to. It exposes the
// three core operations (`load_grid`, `find_path`, `check_qc_violation`)
// plus convenience calls for the common "route a signal" and "can I place
// this block" questions, and a parallel batch router.
//
// Ownership gives the concurrency contract for free: `load_grid` takes
// `&mut self`, every query takes `&self`, so queries can run from many
// threads against one loaded grid while reloads are exclusive. A rejected
// `load_grid` leaves the previous grid in place.
//
// See also: `pathfinding.rs` for the search, `qc.rs` for the QC rule,
// `config.rs` for `SolverConfig`.

use crate::config::SolverConfig;
use crate::cost::CostModel;
use crate::error::SolverError;
use crate::grid::OccupancyGrid;
use crate::pathfinding::{self, PathRequest, PathResult};
use crate::qc;
use crate::types::VoxelCoord;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

/// Routes redstone wire through a loaded occupancy grid.
#[derive(Clone, Debug, Default)]
pub struct SpatialSolver {
    grid: OccupancyGrid,
    config: SolverConfig,
    costs: CostModel,
}

impl SpatialSolver {
    /// A solver with default configuration and an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// A solver with the given configuration and an empty grid.
    pub fn with_config(config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        let costs = config.cost_model();
        Ok(Self {
            grid: OccupancyGrid::default(),
            config,
            costs,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The currently loaded grid.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Replace the active grid with `data` (one byte per voxel, 0 = air,
    /// laid out `x * height * depth + y * depth + z`).
    pub fn load_grid(
        &mut self,
        data: impl Into<Vec<u8>>,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<(), SolverError> {
        let grid = OccupancyGrid::from_bytes(data.into(), width, height, depth).inspect_err(
            |e| warn!(width, height, depth, error = %e, "rejected occupancy grid"),
        )?;
        self.set_grid(grid);
        Ok(())
    }

    /// Replace the active grid with an already built one.
    pub fn set_grid(&mut self, grid: OccupancyGrid) {
        let (width, height, depth) = grid.dimensions();
        info!(
            width,
            height,
            depth,
            solid = grid.solid_count(),
            "loaded occupancy grid"
        );
        self.grid = grid;
    }

    /// Find a cheapest wire route for `request` through the loaded grid.
    pub fn find_path(&self, request: &PathRequest) -> PathResult {
        trace!(
            signal_strength = request.signal_strength,
            allow_vertical = request.allow_vertical,
            min_delay = request.min_delay,
            max_delay = request.max_delay,
            "request constraints are not applied by the search"
        );
        let (result, stats) = pathfinding::find_path_with_stats(
            &self.grid,
            request,
            &self.costs,
            &self.config.wire_block,
        );
        debug!(
            start = %request.start,
            end = %request.end,
            success = result.success,
            length = result.len(),
            cost = result.total_cost,
            expanded = stats.expanded,
            pushed = stats.pushed,
            "path search finished"
        );
        result
    }

    /// Route every request in parallel. Results are in request order.
    pub fn find_paths(&self, requests: &[PathRequest]) -> Vec<PathResult> {
        requests.par_iter().map(|r| self.find_path(r)).collect()
    }

    /// Would placing `block_type` at `position` risk a quasi-connectivity
    /// activation? Independent of any path search.
    pub fn check_qc_violation(&self, position: VoxelCoord, block_type: &str) -> bool {
        qc::check_violation(&self.grid, position, block_type, self.config.qc_range)
    }

    /// Route a signal between two points with vertical routing allowed and a
    /// fixed delay (both ends of the delay window set to `delay`).
    pub fn route_signal(
        &self,
        start: VoxelCoord,
        end: VoxelCoord,
        signal_strength: u8,
        delay: u32,
    ) -> PathResult {
        self.find_path(&PathRequest {
            signal_strength,
            min_delay: delay,
            max_delay: delay,
            ..PathRequest::new(start, end)
        })
    }

    /// True when `block_type` can be placed at `position` without a QC
    /// violation.
    pub fn validate_placement(&self, position: VoxelCoord, block_type: &str) -> bool {
        !self.check_qc_violation(position, block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MAX_SIGNAL_STRENGTH, blocks};

    fn air(w: u32, h: u32, d: u32) -> Vec<u8> {
        vec![0; (w * h * d) as usize]
    }

    #[test]
    fn new_solver_has_empty_grid() {
        let solver = SpatialSolver::new();
        assert_eq!(solver.grid().dimensions(), (0, 0, 0));
        assert_eq!(solver.config(), &SolverConfig::default());
    }

    #[test]
    fn load_then_route() {
        let mut solver = SpatialSolver::new();
        solver.load_grid(air(3, 3, 3), 3, 3, 3).unwrap();
        let result = solver.find_path(&PathRequest::new(
            VoxelCoord::new(0, 0, 0),
            VoxelCoord::new(2, 0, 0),
        ));
        assert!(result.success);
        assert_eq!(result.path.len(), 3);
        assert_eq!(result.total_cost, 2);
    }

    #[test]
    fn load_accepts_borrowed_slice() {
        let mut solver = SpatialSolver::new();
        let data = air(2, 2, 2);
        solver.load_grid(data.as_slice(), 2, 2, 2).unwrap();
        assert_eq!(solver.grid().as_bytes(), data.as_slice());
    }

    #[test]
    fn rejected_load_keeps_previous_grid() {
        let mut solver = SpatialSolver::new();
        solver.load_grid(air(2, 2, 2), 2, 2, 2).unwrap();
        let err = solver.load_grid(vec![0; 5], 2, 2, 2).unwrap_err();
        assert!(matches!(err, SolverError::GridSizeMismatch { .. }));
        assert_eq!(solver.grid().dimensions(), (2, 2, 2));
    }

    #[test]
    fn reload_replaces_grid_wholesale() {
        let mut solver = SpatialSolver::new();
        let mut data = air(3, 1, 1);
        data[1] = 1;
        solver.load_grid(data, 3, 1, 1).unwrap();
        let request = PathRequest::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(2, 0, 0));
        assert!(!solver.find_path(&request).success);

        solver.load_grid(air(3, 1, 1), 3, 1, 1).unwrap();
        assert!(solver.find_path(&request).success);
    }

    #[test]
    fn qc_check_uses_loaded_grid() {
        let mut grid = OccupancyGrid::new(3, 4, 3);
        grid.set_solid(VoxelCoord::new(1, 2, 1), true);
        let mut solver = SpatialSolver::new();
        solver.set_grid(grid);

        let pos = VoxelCoord::new(1, 0, 1);
        assert!(solver.check_qc_violation(pos, blocks::PISTON));
        assert!(!solver.validate_placement(pos, blocks::STICKY_PISTON));
        assert!(!solver.check_qc_violation(pos, "minecraft:stone"));
        assert!(solver.validate_placement(pos, "minecraft:stone"));
        // Solid is 2 above (1,0,1) but 3 above (1,-1,1).
        assert!(!solver.check_qc_violation(VoxelCoord::new(1, -1, 1), blocks::PISTON));
    }

    #[test]
    fn qc_range_comes_from_config() {
        let config = SolverConfig {
            qc_range: 1,
            ..SolverConfig::default()
        };
        let mut solver = SpatialSolver::with_config(config).unwrap();
        let mut grid = OccupancyGrid::new(1, 4, 1);
        grid.set_solid(VoxelCoord::new(0, 2, 0), true);
        solver.set_grid(grid);
        assert!(!solver.check_qc_violation(VoxelCoord::new(0, 0, 0), blocks::PISTON));
        assert!(solver.check_qc_violation(VoxelCoord::new(0, 1, 0), blocks::PISTON));
    }

    #[test]
    fn with_config_rejects_invalid() {
        let config = SolverConfig {
            vertical_cost: 0,
            ..SolverConfig::default()
        };
        assert!(SpatialSolver::with_config(config).is_err());
    }

    #[test]
    fn configured_wire_block_is_emitted() {
        let config = SolverConfig {
            wire_block: "custom:wire".to_string(),
            ..SolverConfig::default()
        };
        let mut solver = SpatialSolver::with_config(config).unwrap();
        solver.load_grid(air(2, 1, 1), 2, 1, 1).unwrap();
        let result = solver.find_path(&PathRequest::new(
            VoxelCoord::new(0, 0, 0),
            VoxelCoord::new(1, 0, 0),
        ));
        assert_eq!(result.blocks, vec!["custom:wire", "custom:wire"]);
    }

    #[test]
    fn route_signal_matches_find_path() {
        let mut solver = SpatialSolver::new();
        solver.load_grid(air(4, 2, 4), 4, 2, 4).unwrap();
        let (a, b) = (VoxelCoord::new(0, 0, 0), VoxelCoord::new(3, 1, 3));
        let routed = solver.route_signal(a, b, MAX_SIGNAL_STRENGTH, 2);
        let direct = solver.find_path(&PathRequest::new(a, b));
        assert_eq!(routed, direct);
    }

    #[test]
    fn batch_results_keep_request_order() {
        let mut solver = SpatialSolver::new();
        solver.load_grid(air(8, 1, 8), 8, 1, 8).unwrap();
        let requests: Vec<_> = (0..8)
            .map(|i| PathRequest::new(VoxelCoord::new(0, 0, i), VoxelCoord::new(i, 0, 0)))
            .collect();
        let results = solver.find_paths(&requests);
        assert_eq!(results.len(), requests.len());
        for (request, result) in requests.iter().zip(&results) {
            assert!(result.success);
            assert_eq!(result.path.first(), Some(&request.start));
            assert_eq!(result.path.last(), Some(&request.end));
            assert_eq!(result, &solver.find_path(request));
        }
    }

    #[test]
    fn solver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpatialSolver>();
    }
}
