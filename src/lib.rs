//! # Poster Gal
//!
//! Adds an A4 poster to a static gallery page and publishes it with git.
//! The working directory is the gallery: it holds the converted posters,
//! the generated `index.html`, an optional `config.toml`, and is itself a
//! git checkout whose upstream serves the page.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Convert   image.png  →  <work_dir>/image.jpg   (A4 check + resize to 595x842)
//! 2. Generate  work_dir   →  <work_dir>/index.html  (one card per poster)
//! 3. Publish   work_dir   →  git add / commit / push
//! ```
//!
//! Each stage is a plain function over the working directory, so the page
//! can be regenerated on its own (`poster-gal index`) and every stage can be
//! tested against a temporary directory. Image decoding and git sit behind
//! traits ([`imaging::ImageBackend`], [`publish::VersionControl`]) with mock
//! implementations for tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`convert`] | Stage 1: validates the A4 ratio and writes the fixed-size JPEG |
//! | [`generate`] | Stage 2: renders `index.html` from the directory listing using Maud |
//! | [`publish`] | Stage 3: stages, commits and pushes through git |
//! | [`pipeline`] | Runs the three stages in order and reports progress |
//! | [`scan`] | Lists the image files that belong on the page |
//! | [`config`] | Optional `config.toml` loading, merging and validation |
//! | [`types`] | Shared types (`GalleryEntry`) |
//! | [`naming`] | Display names and public URLs derived from filenames |
//! | [`imaging`] | Pure-Rust image operations: identify, resize, JPEG encode |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## The Directory Is the Database
//!
//! The page is rebuilt from a fresh directory listing on every run. There
//! is no manifest or state file, so deleting a poster and running
//! `poster-gal index` is all it takes to remove it from the page.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Lanczos3 resampling and JPEG encoding all use the `image`
//! crate. No ImageMagick or other system library is needed.
//!
//! ## Git Through the CLI
//!
//! Publishing shells out to `git` in the working directory and relies on
//! whatever remote, branch and credentials the checkout is already set up
//! with.

pub mod config;
pub mod convert;
pub mod generate;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod publish;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
