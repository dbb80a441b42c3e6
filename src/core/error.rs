//! Error types for the ray cache

use thiserror::Error;

/// Main error type for the crate
///
/// None of these escape [`crate::raycast::RayCache`]: the cache logs them and
/// publishes an empty snapshot instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
