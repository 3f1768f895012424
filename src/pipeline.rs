//! End-to-end orchestration: convert → generate → publish.
//!
//! ```text
//! 1. Convert   input image  →  <work_dir>/<stem>.jpg
//! 2. Generate  work_dir     →  <work_dir>/index.html
//! 3. Publish   work_dir     →  commit "Add <stem>.jpg" + push
//! ```
//!
//! Stages run strictly in order and the first failure ends the run. There
//! is no rollback, so a poster converted before a failed publish stays on
//! disk.
//!
//! A [`PipelineEvent`] is emitted as soon as each stage completes, letting
//! the CLI print progress for the stages that succeeded even when a later
//! one fails.

use crate::config::SiteConfig;
use crate::convert::{self, ConvertError, ConvertedPoster};
use crate::generate::{self, GalleryReport, GenerateError};
use crate::imaging::ImageBackend;
use crate::publish::{self, PublishError, PublishOutcome, VersionControl};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// What to run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Source image to convert.
    pub input: PathBuf,
    /// Directory holding the posters, the index and the git checkout.
    pub work_dir: PathBuf,
    /// Run the publisher after generating. Combined with `publish.enabled`.
    pub publish: bool,
}

/// Progress notification, one per completed stage.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Converted(ConvertedPoster),
    Generated(GalleryReport),
    Published(PublishOutcome),
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub poster: ConvertedPoster,
    pub gallery: GalleryReport,
    /// `None` when publishing was disabled.
    pub publish: Option<PublishOutcome>,
}

/// Run all stages for one poster.
pub fn run(
    request: &RunRequest,
    config: &SiteConfig,
    backend: &impl ImageBackend,
    vcs: &impl VersionControl,
    mut on_event: impl FnMut(&PipelineEvent),
) -> Result<RunReport, PipelineError> {
    let poster = convert::convert(backend, &request.input, &request.work_dir, &config.poster)?;
    tracing::info!(file = %poster.filename, outcome = %poster.outcome, "converted");
    on_event(&PipelineEvent::Converted(poster.clone()));

    let gallery = generate::generate(&request.work_dir, config)?;
    tracing::info!(entries = gallery.entries.len(), "generated index");
    on_event(&PipelineEvent::Generated(gallery.clone()));

    let publish = if request.publish && config.publish.enabled {
        let outcome = publish::publish(vcs, &publish::commit_message(&poster.filename))?;
        on_event(&PipelineEvent::Published(outcome.clone()));
        Some(outcome)
    } else {
        tracing::debug!("publishing disabled");
        None
    };

    Ok(RunReport {
        poster,
        gallery,
        publish,
    })
}
