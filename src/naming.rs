//! Display names and public URLs for gallery entries.
//!
//! ## Display Names
//!
//! A poster's display name is its filename without the extension and
//! without any leading underscores. The underscore prefix lets a poster be
//! pushed toward the front of the (lexicographically sorted) gallery
//! without changing how its title reads:
//! - `__Event.jpg` → "Event"
//! - `Event.jpg` → "Event"
//! - `_my_poster.png` → "my_poster" (inner underscores are kept)
//!
//! ## Public URLs
//!
//! URLs are plain string concatenation of the configured base URL and the
//! filename. No separator is inserted and nothing is percent-encoded, so
//! the base URL should end with `/`.

use std::path::Path;

/// Derive the display name for an image filename.
///
/// Handles these patterns:
/// - `"__Event.jpg"` → `"Event"`
/// - `"Event.jpg"` → `"Event"`
/// - `"poster.v2.jpg"` → `"poster.v2"` (only the last extension is removed)
/// - `"___.jpg"` → `""`
pub fn display_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    stem.trim_start_matches('_').to_string()
}

/// Public URL for a published file.
pub fn public_url(base_url: &str, filename: &str) -> String {
    format!("{}{}", base_url, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_underscores() {
        assert_eq!(display_name("__Event.jpg"), "Event");
        assert_eq!(display_name("_Event.jpg"), "Event");
    }

    #[test]
    fn plain_name_unchanged() {
        assert_eq!(display_name("Event.jpg"), "Event");
    }

    #[test]
    fn inner_and_trailing_underscores_kept() {
        assert_eq!(display_name("_my_poster_.png"), "my_poster_");
    }

    #[test]
    fn only_last_extension_removed() {
        assert_eq!(display_name("poster.v2.jpg"), "poster.v2");
    }

    #[test]
    fn all_underscores_is_empty() {
        assert_eq!(display_name("___.jpg"), "");
    }

    #[test]
    fn non_ascii_name() {
        assert_eq!(display_name("_夏祭り.JPG"), "夏祭り");
    }

    #[test]
    fn public_url_concatenates() {
        assert_eq!(
            public_url("https://pandrabox.github.io/FlatMeetup/", "poster.jpg"),
            "https://pandrabox.github.io/FlatMeetup/poster.jpg"
        );
    }

    #[test]
    fn public_url_keeps_underscores_and_case() {
        assert_eq!(
            public_url("https://example.org/p/", "__Event.JPG"),
            "https://example.org/p/__Event.JPG"
        );
    }
}
