//! Camera ray generator.
//!
//! Casts a small constellation of view rays (by default the viewport center and
//! the four frustum corners) and carries them into dataset space. Five rays
//! bound where the visible part of the volume begins at a cost that does not
//! depend on viewport resolution.

use crate::core::camera::CameraState;
use crate::core::config::RayPattern;
use crate::core::types::{Result, Vec3};
use crate::math::Ray;
use crate::volume::CoordinateTransform;

/// A view ray in dataset space together with the length change its direction
/// went through on the way there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasetRay {
    pub ray: Ray,
    /// Dataset length per world length along this ray
    pub direction_scale: f32,
}

/// Emits the configured ray pattern for a camera
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRayGenerator {
    pattern: RayPattern,
}

impl CameraRayGenerator {
    pub fn new(pattern: RayPattern) -> Self {
        Self { pattern }
    }

    /// World-space view directions, center first. Corner directions are not
    /// normalized: each is `forward` offset by the image-plane half extents at
    /// unit distance. Oversized grids are rejected before anything is allocated.
    pub fn world_directions(&self, camera: &CameraState) -> Result<Vec<Vec3>> {
        self.pattern.validate()?;
        let basis = camera.basis()?;
        let (half_width, half_height) = camera.half_extents()?;
        let right = basis.right * half_width;
        let up = basis.up * half_height;
        let forward = basis.forward;

        let directions = match self.pattern {
            RayPattern::CenterAndCorners => vec![
                forward,
                forward - right + up,
                forward + right + up,
                forward - right - up,
                forward + right - up,
            ],
            RayPattern::Grid { columns, rows } => {
                let mut directions = Vec::with_capacity(self.pattern.ray_count());
                directions.push(forward);
                for row in 0..rows {
                    let v = 1.0 - 2.0 * row as f32 / rows.saturating_sub(1).max(1) as f32;
                    for column in 0..columns {
                        let u = -1.0 + 2.0 * column as f32 / columns.saturating_sub(1).max(1) as f32;
                        directions.push(forward + right * u + up * v);
                    }
                }
                directions
            }
        };
        Ok(directions)
    }

    /// View rays in dataset space.
    ///
    /// Fails only when the camera itself is unusable (degenerate basis, or its
    /// position cannot be transformed). Individual directions that do not
    /// survive the transform are dropped, so the result may be shorter than
    /// the pattern or empty.
    pub fn generate(&self, camera: &CameraState, transform: &CoordinateTransform) -> Result<Vec<DatasetRay>> {
        let directions = self.world_directions(camera)?;
        let origin = transform.transform_point(camera.position)?;

        let rays = directions
            .iter()
            .enumerate()
            .filter_map(|(index, &direction)| match transform.transform_direction(direction) {
                Ok(transformed) => Some(DatasetRay {
                    ray: Ray::new(origin, transformed.direction),
                    direction_scale: transformed.scale,
                }),
                Err(e) => {
                    log::debug!("Dropping view ray {index}: {e}");
                    None
                }
            })
            .collect();
        Ok(rays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::types::{Mat4, Vec4};

    fn scenario_camera() -> CameraState {
        let mut camera = CameraState::look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y)
            .with_fov_degrees(60.0);
        camera.aspect = 1.0;
        camera
    }

    #[test]
    fn test_center_and_corners() {
        let dirs = CameraRayGenerator::default().world_directions(&scenario_camera()).unwrap();
        assert_eq!(dirs.len(), 5);
        assert!((dirs[0] - Vec3::Z).length() < 1e-6);

        let t = 30.0_f32.to_radians().tan();
        for corner in &dirs[1..] {
            assert!((corner.x.abs() - t).abs() < 1e-5);
            assert!((corner.y.abs() - t).abs() < 1e-5);
            assert!((corner.z - 1.0).abs() < 1e-6);
        }
        // Symmetric about the center ray
        let sum: Vec3 = dirs[1..].iter().copied().sum();
        assert!((sum - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);

        // Top corners point up, left corners point to -right (= +x here)
        assert!(dirs[1].y > 0.0 && dirs[2].y > 0.0 && dirs[3].y < 0.0 && dirs[4].y < 0.0);
        assert!(dirs[1].x > 0.0 && dirs[2].x < 0.0);
    }

    #[test]
    fn test_aspect_widens_horizontal_spread() {
        let mut camera = scenario_camera();
        camera.aspect = 2.0;
        let dirs = CameraRayGenerator::default().world_directions(&camera).unwrap();
        let t = 30.0_f32.to_radians().tan();
        assert!((dirs[2].x.abs() - 2.0 * t).abs() < 1e-5);
        assert!((dirs[2].y.abs() - t).abs() < 1e-5);
    }

    #[test]
    fn test_grid_pattern_includes_corners() {
        let generator = CameraRayGenerator::new(RayPattern::Grid { columns: 3, rows: 3 });
        let dirs = generator.world_directions(&scenario_camera()).unwrap();
        assert_eq!(dirs.len(), 10);
        let corners = CameraRayGenerator::default().world_directions(&scenario_camera()).unwrap();
        // Grid order: rows top to bottom, columns left to right
        assert!((dirs[1] - corners[1]).length() < 1e-6);
        assert!((dirs[3] - corners[2]).length() < 1e-6);
        assert!((dirs[7] - corners[3]).length() < 1e-6);
        assert!((dirs[9] - corners[4]).length() < 1e-6);
        assert!((dirs[5] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_generate_moves_rays_into_dataset_space() {
        let transform = CoordinateTransform::new(
            Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0)),
            Vec3::new(1.0, 1.0, 2.0),
        ).unwrap();
        let rays = CameraRayGenerator::default().generate(&scenario_camera(), &transform).unwrap();
        assert_eq!(rays.len(), 5);
        for r in &rays {
            assert_eq!(r.ray.origin(), Vec3::new(5.0, 5.0, -10.0));
            assert!((r.ray.direction().length() - 1.0).abs() < 1e-5);
        }
        assert!((rays[0].direction_scale - 2.0).abs() < 1e-5);
        assert_eq!(rays[0].ray.direction(), Vec3::Z);
    }

    /// Invertible, but its upper 3x3 block has no z column: world z directions
    /// vanish while x/y directions survive.
    fn z_collapsing_matrix() -> Mat4 {
        Mat4::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_collapsed_direction_is_dropped() {
        let transform = CoordinateTransform::new(z_collapsing_matrix(), Vec3::ONE).unwrap();
        let rays = CameraRayGenerator::default().generate(&scenario_camera(), &transform).unwrap();

        // Center ray is pure +z and collapses; the four corners keep their x/y part
        assert_eq!(rays.len(), 4);
        let t = 30.0_f32.to_radians().tan();
        for r in &rays {
            assert_eq!(r.ray.direction().z, 0.0);
            assert!((r.direction_scale - (2.0 * t * t).sqrt() / (1.0 + 2.0 * t * t).sqrt()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_oversized_grid_fails_without_allocating() {
        let generator = CameraRayGenerator::new(RayPattern::Grid { columns: u32::MAX, rows: u32::MAX });
        assert!(matches!(generator.world_directions(&scenario_camera()), Err(Error::Config(_))));
    }

    #[test]
    fn test_degenerate_camera_fails() {
        let camera = CameraState::look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        let transform = CoordinateTransform::new(Mat4::IDENTITY, Vec3::ONE).unwrap();
        assert!(matches!(
            CameraRayGenerator::default().generate(&camera, &transform),
            Err(Error::DegenerateCamera(_))
        ));
    }

    #[test]
    fn test_untransformable_origin_fails() {
        // Projective matrix with w = z + 10, so the camera plane z = -10 has w = 0
        let mut m = Mat4::IDENTITY;
        m.z_axis.w = 1.0;
        m.w_axis.w = 10.0;
        let transform = CoordinateTransform::new(m, Vec3::ONE).unwrap();
        assert!(matches!(
            CameraRayGenerator::default().generate(&scenario_camera(), &transform),
            Err(Error::Geometry(_))
        ));
    }
}
