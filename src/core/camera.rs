//! Camera snapshot consumed by the ray generator

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};

/// Immutable copy of the scene camera taken when a trigger fires.
///
/// The host owns the live camera; the ray cache only ever sees one of these.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// World position
    pub position: Vec3,
    /// World-space point the camera looks at
    pub target: Vec3,
    /// Approximate up vector (need not be perpendicular to the view direction)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

/// Orthonormal camera frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraState {
    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
            fov_y: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
        }
    }

    /// Set vertical field of view from degrees
    pub fn with_fov_degrees(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y = fov_y_degrees.to_radians();
        self
    }

    /// Build the orthonormal frame, re-orthogonalizing `up` against the
    /// view direction.
    pub fn basis(&self) -> Result<CameraBasis> {
        let forward = (self.target - self.position)
            .try_normalize()
            .ok_or_else(|| {
                Error::DegenerateCamera(format!(
                    "position {} coincides with target {}",
                    self.position, self.target
                ))
            })?;
        let right = forward
            .cross(self.up)
            .try_normalize()
            .ok_or_else(|| {
                Error::DegenerateCamera(format!(
                    "up {} is parallel to view direction {}",
                    self.up, forward
                ))
            })?;
        let up = right
            .cross(forward)
            .try_normalize()
            .ok_or_else(|| Error::DegenerateCamera("non-finite up vector".into()))?;

        Ok(CameraBasis { forward, right, up })
    }

    /// Half extents of the image plane at unit distance: `(half_width, half_height)`
    pub fn half_extents(&self) -> Result<(f32, f32)> {
        if !(self.fov_y.is_finite() && self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(Error::DegenerateCamera(format!("field of view {} out of range", self.fov_y)));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(Error::DegenerateCamera(format!("aspect ratio {} out of range", self.aspect)));
        }
        let half_height = (self.fov_y * 0.5).tan();
        Ok((half_height * self.aspect, half_height))
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
    }
}
