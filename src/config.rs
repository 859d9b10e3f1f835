use std::path::Path;

use crate::foundation::core::{DEFAULT_COLS, DEFAULT_ROWS, GridDims};
use crate::foundation::error::{RippleError, RippleResult};
use crate::palette::Palette;

/// Grid dimensions and palette for one animation session.
///
/// Missing JSON fields fall back to the defaults (40 x 120, the water palette).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub rows: usize,
    pub cols: usize,
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            palette: Palette::default(),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> RippleResult<()> {
        self.dims().map(|_| ())
    }

    /// Validated grid dimensions.
    pub fn dims(&self) -> RippleResult<GridDims> {
        GridDims::new(self.rows, self.cols)
    }

    pub fn from_json_str(s: &str) -> RippleResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| RippleError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> RippleResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            RippleError::Other(anyhow::Error::new(e).context(format!(
                "read field config '{}'",
                path.display()
            )))
        })?;
        let cfg = Self::from_json_str(&s)?;
        tracing::debug!(
            path = %path.display(),
            rows = cfg.rows,
            cols = cfg.cols,
            "loaded field config"
        );
        Ok(cfg)
    }
}
