//! Image processing in pure Rust, with no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Ratio check** | pure math in `calculations` |
//! | **Resize → JPEG** | Lanczos3 + `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for ratio math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{A4_PORTRAIT_RATIO, aspect_ratio, is_within_tolerance};
pub use operations::{convert_to_jpeg, get_dimensions, output_filename, plan_conversion};
pub use params::{ConvertParams, Quality};
pub use rust_backend::RustBackend;
