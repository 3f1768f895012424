//! Shared types used across pipeline stages.
//!
//! Gallery entries are produced by [`scan`](crate::scan), rendered by
//! [`generate`](crate::generate), and listed by [`output`](crate::output).

use crate::naming;

/// One card on the gallery page, derived from one image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Filename relative to the working directory, e.g. `__Event.jpg`.
    pub filename: String,
    /// Heading shown on the card (stem with leading underscores stripped).
    pub display_name: String,
    /// Fully-qualified public URL of the file.
    pub url: String,
}

impl GalleryEntry {
    /// Build an entry for `filename`, published under `base_url`.
    pub fn new(filename: &str, base_url: &str) -> Self {
        Self {
            filename: filename.to_string(),
            display_name: naming::display_name(filename),
            url: naming::public_url(base_url, filename),
        }
    }
}
