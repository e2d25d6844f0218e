// Data-driven solver configuration.
//
// Tunable solver parameters live in `SolverConfig`, loaded from JSON by the
// host application. Every field has a default matching the canonical
// redstone rules, and the struct is `#[serde(default)]` so a config file only
// needs to name the values it overrides.
//
// `validate()` is called by `SpatialSolver::with_config` and by `from_json`;
// it rejects values that would break the search's guarantees (zero costs make
// the Manhattan heuristic inadmissible) or make the QC check meaningless.
//
// See also: `cost.rs` for the `CostModel` built from these values, `qc.rs`
// for what `qc_range` controls, `solver.rs` which owns the config.

use crate::cost::{self, CostModel};
use crate::error::SolverError;
use crate::qc;
use crate::types::blocks;
use serde::{Deserialize, Serialize};

/// Top-level solver configuration. Loaded once, never mutated by the solver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Cost of a step along x or z.
    pub horizontal_cost: u32,

    /// Cost of a step along y. Higher than horizontal because vertical
    /// redstone needs a staircase of supports.
    pub vertical_cost: u32,

    /// Cost of a repeater placement. Reserved until the search inserts
    /// repeaters.
    pub repeater_cost: u32,

    /// How many voxels above a piston the QC check scans.
    pub qc_range: u32,

    /// Block ID assigned to every voxel of a returned path.
    pub wire_block: String,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            horizontal_cost: cost::horizontal_cost(),
            vertical_cost: cost::vertical_cost(),
            repeater_cost: cost::repeater_cost(),
            qc_range: qc::QC_RANGE,
            wire_block: blocks::REDSTONE_WIRE.to_string(),
        }
    }
}

impl SolverConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SolverError> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SolverError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field is within its valid range.
    pub fn validate(&self) -> Result<(), SolverError> {
        for (name, value) in [
            ("horizontal_cost", self.horizontal_cost),
            ("vertical_cost", self.vertical_cost),
            ("repeater_cost", self.repeater_cost),
        ] {
            if value == 0 {
                return Err(SolverError::InvalidConfig(format!(
                    "{name} must be at least 1"
                )));
            }
            if value > cost::MAX_STEP_COST {
                return Err(SolverError::InvalidConfig(format!(
                    "{name} must be at most {}",
                    cost::MAX_STEP_COST
                )));
            }
        }
        if self.qc_range == 0 {
            return Err(SolverError::InvalidConfig(
                "qc_range must be at least 1".to_string(),
            ));
        }
        if self.qc_range > qc::MAX_QC_RANGE {
            return Err(SolverError::InvalidConfig(format!(
                "qc_range must be at most {}",
                qc::MAX_QC_RANGE
            )));
        }
        if self.wire_block.is_empty() {
            return Err(SolverError::InvalidConfig(
                "wire_block must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The edge weights the search uses.
    pub fn cost_model(&self) -> CostModel {
        CostModel {
            horizontal: self.horizontal_cost,
            vertical: self.vertical_cost,
            repeater: self.repeater_cost,
        }
    }
}
