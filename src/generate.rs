//! Gallery page generation.
//!
//! Stage 2 of the poster pipeline. Scans the working directory and writes a
//! single static `index.html` listing every poster.
//!
//! ## Page structure
//!
//! ```text
//! <html lang="ja">
//!   <head> title + inline <style> </head>
//!   <body>
//!     div.container
//!       h1            page.title
//!       p.subtitle    page.subtitle
//!       div.gallery
//!         div.image-card   (one per poster, sorted by filename)
//!           h3              display name
//!           img             relative filename
//!           div.url-display public URL
//! ```
//!
//! The page is rewritten from scratch on every run; nothing from the
//! previous version is read or merged.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Display names and URLs come straight from filenames, so maud's automatic
//! escaping matters here.

use crate::config::{PageConfig, SiteConfig};
use crate::scan::{self, ScanError};
use crate::types::GalleryEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Result of regenerating the index.
#[derive(Debug, Clone)]
pub struct GalleryReport {
    pub entries: Vec<GalleryEntry>,
    pub index_path: PathBuf,
}

const CSS: &str = include_str!("../static/style.css");

/// Scan `work_dir` and overwrite its index page.
pub fn generate(work_dir: &Path, config: &SiteConfig) -> Result<GalleryReport, GenerateError> {
    let entries = scan::scan(work_dir, &config.gallery, &config.base_url)?;
    let page = render_index(&entries, &config.page);

    let index_path = work_dir.join(&config.gallery.index_file);
    fs::write(&index_path, page.into_string())?;
    tracing::debug!(path = %index_path.display(), entries = entries.len(), "wrote index");

    Ok(GalleryReport {
        entries,
        index_path,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(page: &PageConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(page.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn image_card(entry: &GalleryEntry) -> Markup {
    html! {
        div.image-card {
            h3 { (entry.display_name) }
            img src=(entry.filename) alt={ (entry.display_name) " Poster" };
            div.url-display { (entry.url) }
        }
    }
}

/// Renders the full gallery page.
pub fn render_index(entries: &[GalleryEntry], page: &PageConfig) -> Markup {
    let content = html! {
        div.container {
            h1 { (page.title) }
            p.subtitle { (page.subtitle) }
            div.gallery {
                @for entry in entries {
                    (image_card(entry))
                }
            }
        }
    };

    base_document(page, content)
}

// ============================================================================
// Tests
// ============================================================================
