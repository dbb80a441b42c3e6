//! Ray/box intersection results and their GPU layout

use bytemuck::{Pod, Zeroable};

use crate::math::Ray;

/// A dataset-space ray clipped to the volume's bounding box.
///
/// Only built by [`super::AabbIntersector`], so `0 <= entry <= exit` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCastingSample {
    ray: Ray,
    entry_distance: f32,
    exit_distance: f32,
}

impl RayCastingSample {
    pub(crate) fn new(ray: Ray, entry_distance: f32, exit_distance: f32) -> Self {
        debug_assert!(entry_distance >= 0.0 && exit_distance >= entry_distance);
        Self { ray, entry_distance, exit_distance }
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Distance along the ray where it enters the box (0 if it starts inside)
    pub fn entry_distance(&self) -> f32 {
        self.entry_distance
    }

    pub fn exit_distance(&self) -> f32 {
        self.exit_distance
    }
}

/// One sample as laid out in a GPU storage buffer (must match shader struct exactly)
/// WGSL vec3 has 16-byte alignment, so each vec3 is followed by a scalar
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuRaySample {
    /// Ray origin in dataset space (12 bytes, offset 0)
    pub origin: [f32; 3],
    /// Dataset-space entry distance (4 bytes, offset 12)
    pub entry_distance: f32,
    /// Unit direction in dataset space (12 bytes, offset 16)
    pub direction: [f32; 3],
    /// Dataset-space exit distance (4 bytes, offset 28)
    pub exit_distance: f32,
    /// World-space entry distance (4 bytes, offset 32)
    pub world_entry: f32,
    /// Padding to 48 bytes (12 bytes, offset 36)
    pub _pad: [f32; 3],
}

impl GpuRaySample {
    pub fn new(sample: &RayCastingSample, world_entry: f32) -> Self {
        Self {
            origin: sample.ray.origin().to_array(),
            entry_distance: sample.entry_distance,
            direction: sample.ray.direction().to_array(),
            exit_distance: sample.exit_distance,
            world_entry,
            _pad: [0.0; 3],
        }
    }
}
