//! Working-directory scanning.
//!
//! Lists the files that belong on the gallery page. The scan is flat (no
//! subdirectories) and stateless: every run rebuilds the full list from
//! what is on disk.
//!
//! ## Selection rules
//!
//! - Regular files only; directories are ignored.
//! - Hidden files (leading `.`) are skipped.
//! - The extension must be in `gallery.extensions`, compared
//!   case-insensitively (`POSTER.JPG` qualifies).
//! - Filenames that are not valid UTF-8 are skipped with a warning, since
//!   they cannot be put into a URL or HTML.
//!
//! Entries are sorted lexicographically by filename (byte order), so
//! `_Zine.jpg` sorts before `apple.jpg` and `B.jpg` before `a.jpg`.

use crate::config::GalleryConfig;
use crate::types::GalleryEntry;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scan `dir` and return one entry per qualifying image, sorted by filename.
pub fn scan(
    dir: &Path,
    gallery: &GalleryConfig,
    base_url: &str,
) -> Result<Vec<GalleryEntry>, ScanError> {
    let mut filenames = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, so a linked poster still counts.
        if !entry.path().is_file() {
            continue;
        }
        let os_name = entry.file_name();
        let Some(name) = os_name.to_str() else {
            tracing::warn!(file = ?os_name, "skipping non UTF-8 filename");
            continue;
        };
        if is_listed(name, gallery) {
            filenames.push(name.to_string());
        }
    }

    filenames.sort();
    Ok(filenames
        .iter()
        .map(|name| GalleryEntry::new(name, base_url))
        .collect())
}

/// Whether a filename qualifies for the gallery.
fn is_listed(name: &str, gallery: &GalleryConfig) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| gallery.accepts_extension(ext))
}
