//! Dataset metadata and world <-> dataset coordinate conversion

pub mod dataset;
pub mod transform;

pub use dataset::DatasetInfo;
pub use transform::{CoordinateTransform, TransformedDirection};
