//! World space to dataset space conversion.
//!
//! Dataset space is voxel space scaled by the per-axis spacing, so one unit is
//! one millimetre of the scanned volume. Directions pick up a length change on
//! the way in; [`TransformedDirection::scale`] records it so distances measured
//! in dataset space can be turned back into world units.

use crate::core::error::Error;
use crate::core::types::{Mat4, Result, Vec3};
use crate::math::{ensure_finite, project_point};

/// A direction carried into dataset space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformedDirection {
    /// Transformed (not normalized) direction
    pub direction: Vec3,
    /// `|direction| / |world direction|`
    pub scale: f32,
}

/// World -> voxel matrix plus voxel spacing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    world_to_voxel: Mat4,
    voxel_to_world: Mat4,
    spacing: Vec3,
}

impl CoordinateTransform {
    /// Fails if the matrix is not invertible or any spacing component is not
    /// a finite positive number.
    pub fn new(world_to_voxel: Mat4, spacing: Vec3) -> Result<Self> {
        if !(spacing.is_finite() && spacing.cmpgt(Vec3::ZERO).all()) {
            return Err(Error::InvalidDataset(format!("voxel spacing {spacing} must be positive")));
        }
        let det = world_to_voxel.determinant();
        if !world_to_voxel.is_finite() || det == 0.0 || !det.is_finite() {
            return Err(Error::InvalidDataset("world-to-voxel matrix is not invertible".into()));
        }

        Ok(Self {
            world_to_voxel,
            voxel_to_world: world_to_voxel.inverse(),
            spacing,
        })
    }

    /// World point -> dataset point (perspective divide, then spacing)
    pub fn transform_point(&self, world: Vec3) -> Result<Vec3> {
        let voxel = project_point(&self.world_to_voxel, world)
            .ok_or_else(|| Error::Geometry(format!("point {world} has degenerate w after transform")))?;
        ensure_finite(voxel * self.spacing, "dataset point")
    }

    /// World direction -> dataset direction. Translation is ignored (`w = 0`).
    pub fn transform_direction(&self, world: Vec3) -> Result<TransformedDirection> {
        let world_len = world.length();
        if !(world_len.is_finite() && world_len > 0.0) {
            return Err(Error::Geometry(format!("direction {world} has no usable length")));
        }

        let voxel = (self.world_to_voxel * world.extend(0.0)).truncate();
        let direction = ensure_finite(voxel * self.spacing, "dataset direction")?;

        let scale = direction.length() / world_len;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::Geometry(format!("direction {world} collapsed under transform")));
        }
        Ok(TransformedDirection { direction, scale })
    }

    /// Dataset point -> world point (undo spacing, then inverse matrix)
    pub fn inverse_point(&self, dataset: Vec3) -> Result<Vec3> {
        project_point(&self.voxel_to_world, dataset / self.spacing)
            .ok_or_else(|| Error::Geometry(format!("dataset point {dataset} has degenerate w")))
    }
}
