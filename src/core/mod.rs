//! Core types shared by every stage of the ray cache

pub mod types;
pub mod error;
pub mod logging;
pub mod camera;
pub mod config;

pub use types::*;
pub use error::Error;
pub use camera::{CameraBasis, CameraState};
pub use config::{RayCacheConfig, RayPattern, MAX_GRID_AXIS, PARALLEL_EPSILON, VIEW_RAY_COUNT};
