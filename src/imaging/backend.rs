//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the converter needs:
//! identify (read dimensions from the header) and convert (decode, resize,
//! normalize color, encode JPEG).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust with no system
//! dependencies.

use super::params::ConvertParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize to the exact target size and write a JPEG.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
