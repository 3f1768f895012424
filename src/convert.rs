//! Poster validation and conversion.
//!
//! Stage 1 of the poster pipeline. Takes one source image, checks that its
//! shape is an A4 portrait page, and writes a fixed-size JPEG into the
//! working directory.
//!
//! ## Rules
//!
//! - The input must exist; otherwise [`ConvertError::SourceNotFound`].
//! - The input's file stem must be valid UTF-8, since it becomes the page
//!   title, URL and commit message; otherwise [`ConvertError::InvalidFileName`].
//! - `width / height` must be strictly within `tolerance` of `target_ratio`
//!   (defaults: 1/√2 and 0.02). Only the image header is read for this
//!   check, so a rejected input never causes a write.
//! - The output is `<work_dir>/<input stem>.jpg`, resized to exactly
//!   `poster.width`×`poster.height` with Lanczos3, JPEG quality
//!   `poster.quality`. Alpha and palette inputs become 3-channel RGB.
//! - The input file is never touched.
//!
//! ## Write outcome
//!
//! The output file is hashed (SHA-256) before and after the write so the CLI
//! can report whether the run created a new poster, replaced a different
//! one, or reproduced identical bytes. Encoding is deterministic, so
//! re-running on the same input reports [`WriteOutcome::Unchanged`].

use crate::config::PosterConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, aspect_ratio, convert_to_jpeg, get_dimensions,
    is_within_tolerance, output_filename,
};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("File not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Input filename must be valid UTF-8: {}", .0.display())]
    InvalidFileName(PathBuf),
    #[error(
        "Not an A4 ratio: {width}x{height} (ratio {ratio:.3}), expected {expected:.3} (tolerance ±{tolerance})"
    )]
    AspectRatio {
        width: u32,
        height: u32,
        ratio: f64,
        expected: f64,
        tolerance: f64,
    },
}

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// No file existed at the output path.
    Created,
    /// A file with different content was overwritten.
    Replaced,
    /// The new bytes are identical to what was already there.
    Unchanged,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "created",
            Self::Replaced => "replaced",
            Self::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

/// Report of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertedPoster {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Output filename, e.g. `poster.jpg`. Used for the commit message.
    pub filename: String,
    pub original: Dimensions,
    pub ratio: f64,
    pub dimensions: Dimensions,
    pub outcome: WriteOutcome,
}

/// Check the input shape, returning the measured ratio.
pub fn check_ratio(dims: Dimensions, config: &PosterConfig) -> Result<f64, ConvertError> {
    let ratio = aspect_ratio(dims.width, dims.height);
    if is_within_tolerance(ratio, config.target_ratio, config.tolerance) {
        Ok(ratio)
    } else {
        Err(ConvertError::AspectRatio {
            width: dims.width,
            height: dims.height,
            ratio,
            expected: config.target_ratio,
            tolerance: config.tolerance,
        })
    }
}

/// Validate `input` and write the converted poster into `work_dir`.
pub fn convert(
    backend: &impl ImageBackend,
    input: &Path,
    work_dir: &Path,
    config: &PosterConfig,
) -> Result<ConvertedPoster, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::SourceNotFound(input.to_path_buf()));
    }
    let filename =
        output_filename(input).ok_or_else(|| ConvertError::InvalidFileName(input.to_path_buf()))?;

    let original = get_dimensions(backend, input)?;
    tracing::debug!(input = %input.display(), %original, "read image header");
    let ratio = check_ratio(original, config)?;

    fs::create_dir_all(work_dir)?;
    let before = hash_file(&work_dir.join(&filename))?;

    let params = convert_to_jpeg(backend, input, work_dir, config)?;

    let after = hash_file(&params.output)?;
    let outcome = classify(before.as_deref(), after.as_deref());
    tracing::debug!(output = %params.output.display(), %outcome, "wrote poster");

    Ok(ConvertedPoster {
        source: input.to_path_buf(),
        output: params.output,
        filename,
        original,
        ratio,
        dimensions: Dimensions {
            width: params.width,
            height: params.height,
        },
        outcome,
    })
}

/// SHA-256 of a file's contents as hex, or `None` if the file doesn't exist.
fn hash_file(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(format!("{:x}", Sha256::digest(&bytes)))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn classify(before: Option<&str>, after: Option<&str>) -> WriteOutcome {
    match before {
        None => WriteOutcome::Created,
        Some(b) if Some(b) == after => WriteOutcome::Unchanged,
        Some(_) => WriteOutcome::Replaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{create_test_jpeg, create_test_png};
    use tempfile::TempDir;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn check_ratio_accepts_a4() {
        let ratio = check_ratio(dims(1190, 1684), &PosterConfig::default()).unwrap();
        assert!((ratio - 0.7066).abs() < 0.0001);
    }

    #[test]
    fn check_ratio_rejects_square() {
        let err = check_ratio(dims(1000, 1000), &PosterConfig::default()).unwrap_err();
        match err {
            ConvertError::AspectRatio {
                width,
                height,
                ratio,
                ..
            } => {
                assert_eq!((width, height), (1000, 1000));
                assert_eq!(ratio, 1.0);
            }
            other => panic!("expected AspectRatio, got {other:?}"),
        }
    }

    #[test]
    fn aspect_ratio_error_message_shows_numbers() {
        let err = check_ratio(dims(1000, 1000), &PosterConfig::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1000x1000"));
        assert!(msg.contains("1.000"));
        assert!(msg.contains("0.707"));
        assert!(msg.contains("0.02"));
    }

    #[test]
    fn classify_outcomes() {
        assert_eq!(classify(None, Some("a")), WriteOutcome::Created);
        assert_eq!(classify(Some("a"), Some("a")), WriteOutcome::Unchanged);
        assert_eq!(classify(Some("a"), Some("b")), WriteOutcome::Replaced);
    }

    #[test]
    fn missing_input_is_not_found() {
        let work = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let result = convert(
            &backend,
            &work.path().join("nope.png"),
            work.path(),
            &PosterConfig::default(),
        );
        assert!(matches!(result, Err(ConvertError::SourceNotFound(_))));
        assert!(backend.get_operations().is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_input_name_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let work = TempDir::new().unwrap();
        let input = work.path().join(OsStr::from_bytes(b"poster\xff.png"));
        std::fs::write(&input, b"stand-in").unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(1190, 1684)]);

        let err = convert(&backend, &input, work.path(), &PosterConfig::default()).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidFileName(_)));
        assert!(err.to_string().starts_with("Input filename must be valid UTF-8"));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn rejected_ratio_never_converts() {
        let work = TempDir::new().unwrap();
        let input = work.path().join("wide.png");
        std::fs::write(&input, b"header only").unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(1000, 1000)]);

        let result = convert(&backend, &input, work.path(), &PosterConfig::default());
        assert!(matches!(result, Err(ConvertError::AspectRatio { .. })));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
    }

    #[test]
    fn accepted_ratio_converts_into_work_dir() {
        let input_dir = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let input = input_dir.path().join("poster.png");
        std::fs::write(&input, b"stand-in").unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(1190, 1684)]);

        let poster = convert(&backend, &input, work.path(), &PosterConfig::default()).unwrap();
        assert_eq!(poster.filename, "poster.jpg");
        assert_eq!(poster.output, work.path().join("poster.jpg"));
        assert_eq!(poster.dimensions, dims(595, 842));
        assert_eq!(poster.original, dims(1190, 1684));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[1], RecordedOp::Convert { width: 595, height: 842, .. }));
    }

    #[test]
    fn real_conversion_writes_exact_size() {
        let input_dir = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let input = input_dir.path().join("poster.png");
        create_test_png(&input, 1190, 1684, true);

        let poster = convert(
            &RustBackend::new(),
            &input,
            work.path(),
            &PosterConfig::default(),
        )
        .unwrap();

        assert_eq!(poster.outcome, WriteOutcome::Created);
        let (w, h) = image::image_dimensions(&poster.output).unwrap();
        assert_eq!((w, h), (595, 842));
        // Input untouched
        assert!(input.exists());
    }

    #[test]
    fn real_rejection_writes_nothing() {
        let work = TempDir::new().unwrap();
        let input = work.path().join("wide.png");
        create_test_png(&input, 1000, 1000, false);

        let result = convert(
            &RustBackend::new(),
            &input,
            work.path(),
            &PosterConfig::default(),
        );
        assert!(matches!(result, Err(ConvertError::AspectRatio { .. })));
        assert!(!work.path().join("wide.jpg").exists());
    }

    #[test]
    fn rerun_is_unchanged() {
        let input_dir = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let input = input_dir.path().join("flyer.jpg");
        create_test_jpeg(&input, 420, 594);
        let backend = RustBackend::new();
        let config = PosterConfig::default();

        let first = convert(&backend, &input, work.path(), &config).unwrap();
        let first_bytes = std::fs::read(&first.output).unwrap();
        let second = convert(&backend, &input, work.path(), &config).unwrap();

        assert_eq!(first.outcome, WriteOutcome::Created);
        assert_eq!(second.outcome, WriteOutcome::Unchanged);
        assert_eq!(std::fs::read(&second.output).unwrap(), first_bytes);
    }

    #[test]
    fn different_content_is_replaced() {
        let input_dir = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::write(work.path().join("flyer.jpg"), b"old poster").unwrap();
        let input = input_dir.path().join("flyer.png");
        create_test_png(&input, 420, 594, false);

        let poster = convert(
            &RustBackend::new(),
            &input,
            work.path(),
            &PosterConfig::default(),
        )
        .unwrap();
        assert_eq!(poster.outcome, WriteOutcome::Replaced);
    }
}
