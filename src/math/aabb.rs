//! Axis-aligned bounding box

use crate::core::types::{UVec3, Vec3};

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Physical extent of a dataset in its own frame: from the origin to
    /// `dims * spacing`.
    pub fn from_dataset(dims: UVec3, spacing: Vec3) -> Self {
        Self {
            min: Vec3::ZERO,
            max: dims.as_vec3() * spacing,
        }
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True if the box has positive, finite extent on every axis
    pub fn has_volume(&self) -> bool {
        let size = self.size();
        size.is_finite() && size.cmpgt(Vec3::ZERO).all()
    }
}
