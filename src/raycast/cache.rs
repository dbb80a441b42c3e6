//! Ray cache - recompute on camera/dataset triggers, publish immutable snapshots
//!
//! The cache is either Valid (a set of clipped view rays) or Empty. Every
//! trigger computes a complete new [`RaySnapshot`] before swapping it in, so a
//! render thread calling [`RayCache::snapshot`] sees the old state or the new
//! one, never a mix. Failures never reach the caller: they are logged and the
//! cache is cleared, which makes the renderer march the full volume.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::camera::CameraState;
use crate::core::config::RayCacheConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::volume::DatasetInfo;
use super::backend::{RenderBackend, SceneSource};
use super::generator::CameraRayGenerator;
use super::intersect::AabbIntersector;
use super::sample::{GpuRaySample, RayCastingSample};

/// Immutable cache contents.
///
/// `samples` and `world_entries` always have the same length; index `i` of
/// both describes the same view ray. Rays that missed the box are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RaySnapshot {
    generation: u64,
    samples: Vec<RayCastingSample>,
    world_entries: Vec<f32>,
}

impl RaySnapshot {
    /// Incremented on every publish (including clears)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dataset-space samples
    pub fn samples(&self) -> &[RayCastingSample] {
        &self.samples
    }

    /// World-space entry distance for each sample
    pub fn world_entries(&self) -> &[f32] {
        &self.world_entries
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples paired with their world-space entry distance
    pub fn iter(&self) -> impl Iterator<Item = (&RayCastingSample, f32)> + '_ {
        self.samples.iter().zip(self.world_entries.iter().copied())
    }

    /// Closest world-space distance at which any cached ray enters the volume
    pub fn nearest_world_entry(&self) -> Option<f32> {
        self.world_entries.iter().copied().reduce(f32::min)
    }

    /// Samples in storage-buffer layout
    pub fn to_gpu_samples(&self) -> Vec<GpuRaySample> {
        self.iter()
            .map(|(sample, world_entry)| GpuRaySample::new(sample, world_entry))
            .collect()
    }
}

/// What a trigger did to the cache
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheUpdate {
    /// Backend does not consume the cache (or it is disabled); nothing changed
    Skipped,
    /// Cache is now Empty
    Cleared,
    /// Cache is now Valid with this many samples
    Updated { samples: usize },
}

/// Box-intersection cache shared between the interaction thread and the renderer
pub struct RayCache {
    config: RayCacheConfig,
    generator: CameraRayGenerator,
    intersector: AabbIntersector,
    current: RwLock<Arc<RaySnapshot>>,
    generation: AtomicU64,
}

impl RayCache {
    pub fn new(config: RayCacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: CameraRayGenerator::new(config.pattern),
            intersector: AabbIntersector::new(config.parallel_epsilon),
            config,
            current: RwLock::new(Arc::new(RaySnapshot::default())),
            generation: AtomicU64::new(0),
        })
    }

    /// Current contents. Cheap; holds the read lock only to clone the `Arc`.
    pub fn snapshot(&self) -> Arc<RaySnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Camera moved during interaction
    pub fn on_camera_changed(&self, source: &impl SceneSource) -> CacheUpdate {
        self.recompute(source.backend(), &source.camera(), source.dataset().as_ref())
    }

    /// A new dataset became active (or the current one was re-applied/removed)
    pub fn on_dataset_applied(&self, source: &impl SceneSource) -> CacheUpdate {
        let dataset = source.dataset();
        log::debug!("Dataset applied: {:?}", dataset.as_ref().map(|d| d.dims));
        self.recompute(source.backend(), &source.camera(), dataset.as_ref())
    }

    /// Rebuild the cache from a scene snapshot.
    pub fn recompute(
        &self,
        backend: RenderBackend,
        camera: &CameraState,
        dataset: Option<&DatasetInfo>,
    ) -> CacheUpdate {
        if !self.config.enabled || !backend.consumes_ray_cache() {
            return CacheUpdate::Skipped;
        }

        let Some(dataset) = dataset else {
            log::debug!("No active dataset, clearing ray cache");
            self.publish(Vec::new(), Vec::new());
            return CacheUpdate::Cleared;
        };

        match self.compute(camera, dataset) {
            Ok((samples, world_entries)) => {
                let count = samples.len();
                self.publish(samples, world_entries);
                log::trace!("Ray cache updated with {count} samples");
                CacheUpdate::Updated { samples: count }
            }
            Err(e) => {
                log::warn!("Ray cache update failed, falling back to full-volume marching: {e}");
                self.publish(Vec::new(), Vec::new());
                CacheUpdate::Cleared
            }
        }
    }

    /// Force the Empty state
    pub fn invalidate(&self) {
        self.publish(Vec::new(), Vec::new());
    }

    fn compute(
        &self,
        camera: &CameraState,
        dataset: &DatasetInfo,
    ) -> Result<(Vec<RayCastingSample>, Vec<f32>)> {
        let aabb = dataset
            .bounding_box()
            .ok_or_else(|| {
                Error::InvalidDataset(format!(
                    "dataset {} with spacing {} has no extent",
                    dataset.dims, dataset.spacing
                ))
            })?;
        let transform = dataset.transform()?;

        let rays = self.generator.generate(camera, &transform)?;
        if rays.is_empty() {
            return Err(Error::Geometry("no view ray survived the dataset transform".into()));
        }

        let mut samples = Vec::with_capacity(rays.len());
        let mut world_entries = Vec::with_capacity(rays.len());
        for dataset_ray in &rays {
            match self.intersector.intersect(&dataset_ray.ray, &aabb) {
                Some(sample) => {
                    world_entries.push(sample.entry_distance() / dataset_ray.direction_scale);
                    samples.push(sample);
                }
                None => log::trace!("View ray {:?} misses the volume", dataset_ray.ray),
            }
        }
        Ok((samples, world_entries))
    }

    fn publish(&self, samples: Vec<RayCastingSample>, world_entries: Vec<f32>) {
        debug_assert_eq!(samples.len(), world_entries.len());
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *current = Arc::new(RaySnapshot { generation, samples, world_entries });
    }
}

impl Default for RayCache {
    fn default() -> Self {
        Self {
            generator: CameraRayGenerator::default(),
            intersector: AabbIntersector::default(),
            config: RayCacheConfig::default(),
            current: RwLock::new(Arc::new(RaySnapshot::default())),
            generation: AtomicU64::new(0),
        }
    }
}
