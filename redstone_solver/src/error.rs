// Error type for solver setup.
//
// Path searches never fail with an error: an unreachable goal is an ordinary
// `PathResult` with `success == false`, and out-of-range coordinates simply
// read as non-walkable. Errors are reserved for bad inputs that would
// otherwise corrupt the solver's state: an occupancy buffer whose length does
// not match its declared dimensions, dimensions too large to address, or an
// invalid configuration.
//
// See also: `grid.rs` (`OccupancyGrid::from_bytes`), `config.rs`
// (`SolverConfig::validate`).

/// Errors raised while loading a grid or configuring the solver.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SolverError {
    /// The occupancy buffer length differs from `width * height * depth`.
    #[error(
        "occupancy buffer holds {actual} bytes but a {width}x{height}x{depth} grid needs {expected}"
    )]
    GridSizeMismatch {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
        depth: u32,
    },

    /// `width * height * depth` does not fit in `usize`.
    #[error("grid dimensions {width}x{height}x{depth} overflow the addressable size")]
    GridTooLarge { width: u32, height: u32, depth: u32 },

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_message_names_both_sizes() {
        let err = SolverError::GridSizeMismatch {
            expected: 27,
            actual: 26,
            width: 3,
            height: 3,
            depth: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("26 bytes"));
        assert!(msg.contains("3x3x3"));
        assert!(msg.contains("27"));
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SolverError = parse.into();
        assert!(matches!(err, SolverError::ConfigParse(_)));
    }
}
