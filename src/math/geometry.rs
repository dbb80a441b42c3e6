//! Stateless vector helpers shared by the transform and ray stages

use crate::core::error::Error;
use crate::core::types::{Mat4, Result, Vec3};

/// Direction substituted when a ray direction cannot be normalized
pub const CANONICAL_DIRECTION: Vec3 = Vec3::Z;

/// Normalize `v`, falling back to [`CANONICAL_DIRECTION`] for zero-length or
/// non-finite input.
pub fn normalize_or_canonical(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(CANONICAL_DIRECTION)
}

/// Apply a 4x4 transform to `(p, 1)` and perform the perspective divide.
///
/// Returns `None` when `w` is zero or anything along the way is non-finite.
pub fn project_point(matrix: &Mat4, p: Vec3) -> Option<Vec3> {
    let h = *matrix * p.extend(1.0);
    if h.w == 0.0 || !h.w.is_finite() {
        return None;
    }
    let projected = h.truncate() / h.w;
    projected.is_finite().then_some(projected)
}

/// Pass `v` through unchanged if every component is finite
pub fn ensure_finite(v: Vec3, what: &str) -> Result<Vec3> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::Geometry(format!("{what} is not finite: {v}")))
    }
}
