//! Camera-ray box intersection cache for GPU volume ray marching
//!
//! Each update casts a handful of view rays into dataset space, clips them
//! against the dataset's bounding box and publishes the entry/exit distances
//! as an immutable [`RaySnapshot`]. The renderer reads that snapshot to start
//! marching where the volume begins instead of at the near plane.

pub mod sample;
pub mod intersect;
pub mod generator;
pub mod backend;
pub mod cache;

pub use sample::{RayCastingSample, GpuRaySample};
pub use intersect::AabbIntersector;
pub use generator::{CameraRayGenerator, DatasetRay};
pub use backend::{RenderBackend, SceneSource};
pub use cache::{CacheUpdate, RayCache, RaySnapshot};
