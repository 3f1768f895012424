//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Each stage leads with what it produced (the poster file, the index page,
//! the commit) and shows paths and numbers as indented context lines. The
//! output reads as a summary of what changed in the working directory.
//!
//! # Output Format
//!
//! ## Convert
//!
//! ```text
//! poster.jpg (created)
//!     Source: /home/me/Downloads/poster.png
//!     1190x1684 (ratio 0.707) → 595x842
//! ```
//!
//! ## Generate
//!
//! ```text
//! index.html (2 posters)
//!     001 Event
//!         https://pandrabox.github.io/FlatMeetup/__Event.jpg
//!     002 poster
//!         https://pandrabox.github.io/FlatMeetup/poster.jpg
//! ```
//!
//! ## Publish
//!
//! ```text
//! Pushed: Add poster.jpg
//! ```
//!
//! or, when staging found nothing new:
//!
//! ```text
//! Nothing to commit, push skipped
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::convert::ConvertedPoster;
use crate::generate::GalleryReport;
use crate::pipeline::PipelineEvent;
use crate::publish::PublishOutcome;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Final path component for display, falling back to the full path.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Stage 1: Convert output
// ============================================================================

/// Format the converted poster: output file, source, and size change.
pub fn format_convert_output(poster: &ConvertedPoster) -> Vec<String> {
    vec![
        format!("{} ({})", poster.filename, poster.outcome),
        format!("{}Source: {}", indent(1), poster.source.display()),
        format!(
            "{}{} (ratio {:.3}) → {}",
            indent(1),
            poster.original,
            poster.ratio,
            poster.dimensions
        ),
    ]
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format the regenerated index: page file, then one line pair per card.
pub fn format_gallery_output(report: &GalleryReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        file_label(&report.index_path),
        plural(report.entries.len(), "poster")
    )];

    for (i, entry) in report.entries.iter().enumerate() {
        let name = if entry.display_name.is_empty() {
            format!("({})", entry.filename)
        } else {
            entry.display_name.clone()
        };
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
        lines.push(format!("{}{}", indent(2), entry.url));
    }

    lines
}

/// Print gallery output to stdout.
pub fn print_gallery_output(report: &GalleryReport) {
    for line in format_gallery_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Publish output
// ============================================================================

pub fn format_publish_output(outcome: &PublishOutcome) -> Vec<String> {
    match outcome {
        PublishOutcome::Pushed { message } => vec![format!("Pushed: {}", message)],
        PublishOutcome::NothingToCommit => vec!["Nothing to commit, push skipped".to_string()],
    }
}

// ============================================================================
// Pipeline events
// ============================================================================

/// Format a single pipeline progress event.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Converted(poster) => format_convert_output(poster),
        PipelineEvent::Generated(report) => format_gallery_output(report),
        PipelineEvent::Published(outcome) => format_publish_output(outcome),
    }
}

/// Print a pipeline progress event to stdout.
pub fn print_pipeline_event(event: &PipelineEvent) {
    for line in format_pipeline_event(event) {
        println!("{}", line);
    }
}
