use crate::foundation::error::{RippleError, RippleResult};

/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 40;
/// Default number of grid columns.
pub const DEFAULT_COLS: usize = 120;

/// Logical 0-based frame counter driving the field animation.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The next frame, saturating at `u64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Frame counter as a float for the time terms of the field equation.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Grid dimensions in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridDims {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridDims {
    /// Create validated dimensions with non-zero rows and columns.
    pub fn new(rows: usize, cols: usize) -> RippleResult<Self> {
        if rows == 0 {
            return Err(RippleError::validation("GridDims rows must be > 0"));
        }
        if cols == 0 {
            return Err(RippleError::validation("GridDims cols must be > 0"));
        }
        Ok(Self { rows, cols })
    }

    /// Total number of cells.
    pub fn cell_count(self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
