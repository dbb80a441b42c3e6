//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod geometry;

pub use aabb::Aabb;
pub use ray::Ray;
pub use geometry::{CANONICAL_DIRECTION, normalize_or_canonical, project_point, ensure_finite};
