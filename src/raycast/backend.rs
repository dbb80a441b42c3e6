//! Collaborator interfaces: backend selection and the scene snapshot source

use serde::{Deserialize, Serialize};

use crate::core::camera::CameraState;
use crate::volume::DatasetInfo;

/// Volume rendering backends the host can switch between
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderBackend {
    /// View-aligned textured slices, no rays involved
    SliceStack,
    /// GPU ray marching over the full volume extent
    RayMarch,
    /// GPU ray marching that starts at the cached box entry distances
    #[default]
    RayMarchBoxSkip,
}

impl RenderBackend {
    /// Whether this backend reads the ray cache. Other backends never pay for
    /// a recompute.
    pub fn consumes_ray_cache(self) -> bool {
        matches!(self, RenderBackend::RayMarchBoxSkip)
    }
}

/// Host-side glue that can hand the cache a consistent view of the scene.
///
/// Implementations copy out of whatever the UI and render paths share; the
/// cache never holds on to the source.
pub trait SceneSource {
    /// Currently selected rendering backend
    fn backend(&self) -> RenderBackend;

    /// Current camera
    fn camera(&self) -> CameraState;

    /// Active dataset, if one is bound
    fn dataset(&self) -> Option<DatasetInfo>;
}
