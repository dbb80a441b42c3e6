//! Volray - camera-ray box-intersection cache for GPU volume ray marching
//!
//! On camera or dataset changes a [`raycast::RayCache`] casts a few view rays
//! into dataset space, clips them against the volume's bounding box and
//! publishes the entry/exit distances for the renderer to start marching at.

pub mod core;
pub mod math;
pub mod volume;
pub mod raycast;
