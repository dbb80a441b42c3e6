//! Ray cache configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Default threshold below which a direction component counts as parallel to
/// a slab. Kept as a named constant so tests can probe the boundary.
pub const PARALLEL_EPSILON: f32 = f32::EPSILON;

/// Number of view rays in the default constellation (center + four corners).
pub const VIEW_RAY_COUNT: usize = 5;

/// Largest grid edge (rays per row or column) a [`RayPattern::Grid`] may use.
pub const MAX_GRID_AXIS: u32 = 64;

/// Which camera rays are cast each update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RayPattern {
    /// Viewport center plus the four frustum corners.
    #[default]
    CenterAndCorners,
    /// Center plus an evenly spaced `columns` x `rows` lattice spanning the
    /// frustum edge to edge (corners included).
    Grid { columns: u32, rows: u32 },
}

impl RayPattern {
    /// Number of rays the pattern emits before any are dropped.
    pub fn ray_count(&self) -> usize {
        match *self {
            RayPattern::CenterAndCorners => VIEW_RAY_COUNT,
            RayPattern::Grid { columns, rows } => (columns as usize)
                .checked_mul(rows as usize)
                .and_then(|n| n.checked_add(1))
                .unwrap_or(usize::MAX),
        }
    }

    /// Reject grids smaller than 2x2 or with an edge above [`MAX_GRID_AXIS`].
    pub fn validate(&self) -> Result<()> {
        if let RayPattern::Grid { columns, rows } = *self {
            if columns < 2 || rows < 2 {
                return Err(Error::Config(format!(
                    "grid pattern needs at least 2x2 rays, got {columns}x{rows}"
                )));
            }
            if columns > MAX_GRID_AXIS || rows > MAX_GRID_AXIS {
                return Err(Error::Config(format!(
                    "grid pattern is limited to {MAX_GRID_AXIS}x{MAX_GRID_AXIS} rays, got {columns}x{rows}"
                )));
            }
        }
        Ok(())
    }
}

/// Tunables for [`crate::raycast::RayCache`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayCacheConfig {
    /// Master switch. When false the cache never recomputes, as if the active
    /// backend did not consume it.
    pub enabled: bool,
    /// Parallel-ray threshold for the slab test.
    pub parallel_epsilon: f32,
    /// Ray constellation.
    pub pattern: RayPattern,
}

impl Default for RayCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            parallel_epsilon: PARALLEL_EPSILON,
            pattern: RayPattern::CenterAndCorners,
        }
    }
}

impl RayCacheConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded ray cache config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.parallel_epsilon.is_finite() && self.parallel_epsilon >= 0.0) {
            return Err(Error::Config(format!(
                "parallel_epsilon must be finite and non-negative, got {}",
                self.parallel_epsilon
            )));
        }
        self.pattern.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RayCacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.parallel_epsilon, f32::EPSILON);
        assert_eq!(config.pattern.ray_count(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RayCacheConfig::from_json_str(r#"{ "parallel_epsilon": 0.001 }"#).unwrap();
        assert_eq!(config.parallel_epsilon, 0.001);
        assert_eq!(config.pattern, RayPattern::CenterAndCorners);
        assert!(config.enabled);
    }

    #[test]
    fn test_grid_pattern_json() {
        let json = r#"{ "pattern": { "kind": "grid", "columns": 3, "rows": 4 } }"#;
        let config = RayCacheConfig::from_json_str(json).unwrap();
        assert_eq!(config.pattern, RayPattern::Grid { columns: 3, rows: 4 });
        assert_eq!(config.pattern.ray_count(), 13);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            RayCacheConfig::from_json_str(r#"{ "parallel_epsilon": -1.0 }"#),
            Err(Error::Config(_))
        ));
        assert!(RayCacheConfig::from_json_str(
            r#"{ "pattern": { "kind": "grid", "columns": 1, "rows": 4 } }"#
        ).is_err());
        assert!(RayCacheConfig::from_json_str(
            r#"{ "pattern": { "kind": "grid", "columns": 4, "rows": 65 } }"#
        ).is_err());
        assert!(matches!(
            RayCacheConfig::from_json_str("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_grid_size_limits() {
        let largest = RayPattern::Grid { columns: MAX_GRID_AXIS, rows: MAX_GRID_AXIS };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.ray_count(), 1 + 64 * 64);

        let huge = RayPattern::Grid { columns: u32::MAX, rows: u32::MAX };
        assert!(matches!(huge.validate(), Err(Error::Config(_))));
        assert!(huge.ray_count() > largest.ray_count());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "enabled": false }}"#).unwrap();
        let config = RayCacheConfig::load(file.path()).unwrap();
        assert!(!config.enabled);

        let missing = file.path().with_extension("missing");
        assert!(matches!(RayCacheConfig::load(missing), Err(Error::Io(_))));
    }
}
