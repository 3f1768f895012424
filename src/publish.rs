//! Publishing through git.
//!
//! Stage 3 of the poster pipeline: stage everything in the working
//! directory, commit, and push to whatever upstream the checkout already
//! tracks. No remote or branch is passed and no credentials are handled;
//! the ambient git configuration decides all of that.
//!
//! ## Flow
//!
//! ```text
//! stage_all ──► has_staged_changes ──no──► NothingToCommit (push skipped)
//!                      │
//!                     yes
//!                      ▼
//!                   commit ──► push ──► Pushed
//! ```
//!
//! Whether there is anything to commit is decided from the exit status of
//! `git diff --cached --quiet` (0 = clean, 1 = changes) rather than by
//! matching git's human-readable output, which varies with version and
//! locale.
//!
//! Every other failure is fatal and carries git's own diagnostic text.
//! There is no retry and no rollback.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git add failed: {0}")]
    Stage(String),
    #[error("git status check failed: {0}")]
    Status(String),
    #[error("git commit failed: {0}")]
    Commit(String),
    #[error("git push failed: {0}")]
    Push(String),
}

/// How a publish attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A commit was created and pushed.
    Pushed { message: String },
    /// Staging produced no changes; commit and push were skipped.
    NothingToCommit,
}

/// Commit message for a newly added poster.
pub fn commit_message(filename: &str) -> String {
    format!("Add {}", filename)
}

/// The version-control operations publishing needs.
pub trait VersionControl {
    /// Stage every change in the working directory.
    fn stage_all(&self) -> Result<(), PublishError>;

    /// Whether the index differs from `HEAD` after staging.
    fn has_staged_changes(&self) -> Result<bool, PublishError>;

    /// Commit staged changes with `message`.
    fn commit(&self, message: &str) -> Result<(), PublishError>;

    /// Push the current branch to its configured upstream.
    fn push(&self) -> Result<(), PublishError>;
}

/// Stage, commit, and push, skipping the push when nothing changed.
pub fn publish(vcs: &impl VersionControl, message: &str) -> Result<PublishOutcome, PublishError> {
    vcs.stage_all()?;
    if !vcs.has_staged_changes()? {
        tracing::info!("nothing to commit, skipping push");
        return Ok(PublishOutcome::NothingToCommit);
    }
    vcs.commit(message)?;
    vcs.push()?;
    Ok(PublishOutcome::Pushed {
        message: message.to_string(),
    })
}

/// [`VersionControl`] backed by the `git` command-line tool.
pub struct GitCli {
    work_dir: PathBuf,
    program: String,
}

impl GitCli {
    /// Run `git` inside `work_dir`.
    pub fn new(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, args: &[&str]) -> Result<Output, PublishError> {
        tracing::debug!(dir = %self.work_dir.display(), "{} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.work_dir)
            .output()?;
        Ok(output)
    }
}

/// Git's diagnostic for a failed command, or its exit status when it printed nothing.
fn diagnostic(output: &Output) -> String {
    diagnostic_text(&output.stderr, &output.stdout)
        .unwrap_or_else(|| format!("exited with {}", output.status))
}

/// Trimmed stderr, or stdout when stderr is blank. `None` if both are blank.
fn diagnostic_text(stderr: &[u8], stdout: &[u8]) -> Option<String> {
    [stderr, stdout]
        .into_iter()
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .find(|text| !text.is_empty())
}

impl VersionControl for GitCli {
    fn stage_all(&self) -> Result<(), PublishError> {
        let output = self.run(&["add", "."])?;
        if !output.status.success() {
            return Err(PublishError::Stage(diagnostic(&output)));
        }
        Ok(())
    }

    fn has_staged_changes(&self) -> Result<bool, PublishError> {
        let output = self.run(&["diff", "--cached", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(PublishError::Status(diagnostic(&output))),
        }
    }

    fn commit(&self, message: &str) -> Result<(), PublishError> {
        let output = self.run(&["commit", "-m", message])?;
        if !output.status.success() {
            return Err(PublishError::Commit(diagnostic(&output)));
        }
        Ok(())
    }

    fn push(&self) -> Result<(), PublishError> {
        let output = self.run(&["push"])?;
        if !output.status.success() {
            return Err(PublishError::Push(diagnostic(&output)));
        }
        Ok(())
    }
}
