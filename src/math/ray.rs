//! Ray type and the slab intersection test

use crate::core::types::Vec3;
use super::aabb::Aabb;
use super::geometry::normalize_or_canonical;

/// A ray defined by origin and unit direction
///
/// Fields are private so the unit-length invariant cannot be broken after
/// construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized; zero-length or
    /// non-finite directions fall back to `+Z`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize_or_canonical(direction),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using the slab method.
    ///
    /// Axes whose direction component is within `epsilon` of zero are treated
    /// as parallel: the ray misses unless the origin lies between that pair of
    /// planes. Returns `Some((entry, exit))` with `entry` clamped to zero, and
    /// only when `exit >= entry`.
    pub fn intersect_aabb(&self, aabb: &Aabb, epsilon: f32) -> Option<(f32, f32)> {
        let mut entry = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if d.abs() <= epsilon {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - o) / d;
            let t1 = (hi - o) / d;
            entry = entry.max(t0.min(t1));
            exit = exit.min(t0.max(t1));

            if exit < entry {
                return None;
            }
        }

        let entry = entry.max(0.0);
        (exit >= entry).then_some((entry, exit))
    }
}
