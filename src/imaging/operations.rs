//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ConvertParams, Quality};
use crate::config::PosterConfig;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Output filename for a source image: its stem with a `.jpg` extension.
///
/// `scans/poster.png` → `poster.jpg`, `a.b.PNG` → `a.b.jpg`. `None` when the
/// path has no stem or the stem is not valid UTF-8.
pub fn output_filename(source: &Path) -> Option<String> {
    let stem = source.file_stem()?.to_str()?;
    Some(format!("{}.jpg", stem))
}

/// Output path inside `output_dir`, built from the raw stem bytes.
fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let mut name = source.file_stem().unwrap_or_default().to_os_string();
    name.push(".jpg");
    output_dir.join(name)
}

/// Plan a conversion without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_conversion(source: &Path, output_dir: &Path, config: &PosterConfig) -> ConvertParams {
    ConvertParams {
        source: source.to_path_buf(),
        output: output_path(source, output_dir),
        width: config.width,
        height: config.height,
        quality: Quality::new(config.quality),
    }
}

/// Convert a source image into a fixed-size JPEG inside `output_dir`.
///
/// Returns the parameters that were executed.
pub fn convert_to_jpeg(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &PosterConfig,
) -> Result<ConvertParams> {
    let params = plan_conversion(source, output_dir, config);
    backend.convert(&params)?;
    Ok(params)
}
