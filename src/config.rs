//! Tool configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` that
//! lives in the working directory next to the published posters. Every value
//! has a stock default, so a working directory without a config file behaves
//! exactly like the original poster workflow.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://pandrabox.github.io/FlatMeetup/"
//!
//! [poster]
//! width = 595                          # Output width in pixels
//! height = 842                         # Output height in pixels
//! target_ratio = 0.7071067811865476    # Accepted width/height ratio (A4 portrait)
//! tolerance = 0.02                     # Allowed absolute deviation from target_ratio
//! quality = 90                         # JPEG quality (1-100)
//!
//! [gallery]
//! extensions = ["jpg", "jpeg", "png"]  # Files listed in the index (case-insensitive)
//! index_file = "index.html"
//!
//! [page]
//! title = "FlatMeetup Posters"
//! subtitle = "VRChat用ポスター画像集"
//! lang = "ja"
//!
//! [publish]
//! enabled = true                       # Stage, commit and push after generating
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [page]
//! title = "Spring Meetup"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have defaults matching the FlatMeetup poster gallery. User
/// config files need only specify the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public URL prefix; a poster's URL is this value followed by its filename.
    pub base_url: String,
    /// Aspect validation and JPEG output settings.
    pub poster: PosterConfig,
    /// Which files are listed and where the index is written.
    pub gallery: GalleryConfig,
    /// Text shown on the generated page.
    pub page: PageConfig,
    /// Version-control publishing.
    pub publish: PublishConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pandrabox.github.io/FlatMeetup/".to_string(),
            poster: PosterConfig::default(),
            gallery: GalleryConfig::default(),
            page: PageConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".into()));
        }
        if !(1..=100).contains(&self.poster.quality) {
            return Err(ConfigError::Validation(
                "poster.quality must be 1-100".into(),
            ));
        }
        if self.poster.width == 0 || self.poster.height == 0 {
            return Err(ConfigError::Validation(
                "poster.width and poster.height must be non-zero".into(),
            ));
        }
        if !(self.poster.target_ratio.is_finite() && self.poster.target_ratio > 0.0) {
            return Err(ConfigError::Validation(
                "poster.target_ratio must be a positive number".into(),
            ));
        }
        if !(self.poster.tolerance > 0.0 && self.poster.tolerance < 1.0) {
            return Err(ConfigError::Validation(
                "poster.tolerance must be between 0 and 1 (exclusive)".into(),
            ));
        }
        if self.gallery.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "gallery.extensions must not be empty".into(),
            ));
        }
        let index = self.gallery.index_file.as_str();
        if index.is_empty() || index.contains('/') || index.contains('\\') {
            return Err(ConfigError::Validation(
                "gallery.index_file must be a plain filename".into(),
            ));
        }
        Ok(())
    }
}

/// Aspect validation and output encoding for converted posters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Accepted width/height ratio of the input image.
    pub target_ratio: f64,
    /// Inputs are rejected when `|ratio - target_ratio| >= tolerance`.
    pub tolerance: f64,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            width: 595,
            height: 842,
            target_ratio: crate::imaging::A4_PORTRAIT_RATIO,
            tolerance: 0.02,
            quality: 90,
        }
    }
}

/// Gallery listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Extensions (without the dot) of files listed in the index. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Filename of the generated page inside the working directory.
    pub index_file: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            index_file: "index.html".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Whether `ext` (no leading dot) is in the allow-list, ignoring case.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

/// Text rendered into the generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Document title and top-level heading.
    pub title: String,
    /// Line shown under the heading.
    pub subtitle: String,
    /// `lang` attribute of the `<html>` element.
    pub lang: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "FlatMeetup Posters".to_string(),
            subtitle: "VRChat用ポスター画像集".to_string(),
            lang: "ja".to_string(),
        }
    }
}

/// Version-control publishing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// When false the pipeline stops after writing the index.
    pub enabled: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the working directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(work_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(work_dir)?;
    if overlay.is_some() {
        tracing::debug!(dir = %work_dir.display(), "loaded {CONFIG_FILENAME}");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# poster-gal Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the working directory as config.toml.
# Unknown keys will cause an error.

# Public URL prefix. Each poster's URL is base_url followed by its filename.
base_url = "https://pandrabox.github.io/FlatMeetup/"

# ---------------------------------------------------------------------------
# Poster validation and conversion
# ---------------------------------------------------------------------------
[poster]
# Output size in pixels. Every converted poster is resized to exactly this.
width = 595
height = 842

# Accepted input width/height ratio (1/sqrt(2), A4 portrait).
target_ratio = 0.7071067811865476

# Inputs whose ratio differs from target_ratio by this much or more are rejected.
tolerance = 0.02

# JPEG encoding quality (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Gallery index
# ---------------------------------------------------------------------------
[gallery]
# File extensions listed in the index (case-insensitive, no leading dot).
extensions = ["jpg", "jpeg", "png"]

# Filename of the generated page.
index_file = "index.html"

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
[page]
title = "FlatMeetup Posters"
subtitle = "VRChat用ポスター画像集"
lang = "ja"

# ---------------------------------------------------------------------------
# Publishing
# ---------------------------------------------------------------------------
[publish]
# Stage, commit and push the working directory after generating the index.
enabled = true
"##
}
