//! Dataset snapshot consumed by the ray cache

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat4, Result, UVec3, Vec3};
use crate::math::Aabb;
use super::transform::CoordinateTransform;

/// Geometry of the active volume dataset, copied out of the host when a
/// trigger fires.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Voxel counts (width, height, depth)
    pub dims: UVec3,
    /// Physical size of one voxel per axis, in mm
    pub spacing: Vec3,
    /// World space to voxel index space
    pub world_to_voxel: Mat4,
}

impl DatasetInfo {
    pub fn new(dims: UVec3, spacing: Vec3, world_to_voxel: Mat4) -> Self {
        Self { dims, spacing, world_to_voxel }
    }

    /// Dataset whose voxel grid sits at the world origin, one voxel per world unit
    pub fn axis_aligned(dims: UVec3, spacing: Vec3) -> Self {
        Self::new(dims, spacing, Mat4::IDENTITY)
    }

    /// Physical bounding box, or `None` when the dataset has no extent
    /// (zero dimension, or non-finite/non-positive spacing).
    pub fn bounding_box(&self) -> Option<Aabb> {
        let aabb = Aabb::from_dataset(self.dims, self.spacing);
        aabb.has_volume().then_some(aabb)
    }

    pub fn transform(&self) -> Result<CoordinateTransform> {
        CoordinateTransform::new(self.world_to_voxel, self.spacing)
    }
}
