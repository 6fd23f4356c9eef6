//! Run configuration.
//!
//! A [`RescaleConfig`] is built once at startup (from CLI flags, see
//! `main.rs`), validated, and passed by reference into
//! [`process::rescale_dir`](crate::process::rescale_dir). Nothing reads
//! global state: tests construct configs with whatever parameters they need.
//!
//! ## Defaults
//!
//! ```text
//! target_dir     = "."
//! output_dir     = <target_dir>
//! extensions     = ["jpg", "jpeg", "png"]
//! threshold      = 2560      # longer edge, pixels
//! interpolation  = area
//! suffix         = "_scaled"
//! quality        = 95        # JPEG only
//! ```

use crate::imaging::{Quality, supported_extensions};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default maximum length of the longer image axis.
pub const DEFAULT_THRESHOLD: u32 = 2560;

/// Default suffix appended to the file stem of rescaled outputs.
pub const DEFAULT_SUFFIX: &str = "_scaled";

/// Extensions processed when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Resampling algorithm used when shrinking an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Interpolation {
    /// Coverage-weighted average of the source pixels under each output pixel.
    #[default]
    Area,
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic.
    CatmullRom,
    Gaussian,
    Lanczos3,
}

/// Displays the same name the `--interpolation` flag accepts.
impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use clap::ValueEnum;
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

/// Immutable configuration for one rescale run.
#[derive(Debug, Clone)]
pub struct RescaleConfig {
    /// Directory scanned for images (top level only).
    pub target_dir: PathBuf,
    /// Where rescaled files are written. `None` writes next to the originals.
    pub output_dir: Option<PathBuf>,
    /// Lower-cased extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Longer-edge limit in pixels. Images strictly larger are rescaled.
    pub threshold: u32,
    pub interpolation: Interpolation,
    /// Appended to the file stem of each output, may be empty.
    pub suffix: String,
    /// JPEG encoding quality. Ignored for PNG.
    pub quality: Quality,
}

impl Default for RescaleConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            output_dir: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
            interpolation: Interpolation::default(),
            suffix: DEFAULT_SUFFIX.to_string(),
            quality: Quality::default(),
        }
    }
}

impl RescaleConfig {
    /// Directory outputs are written to.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.target_dir)
    }

    /// Case-insensitive membership test against the configured extensions.
    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Lower-case and de-dot the extension list so `".JPG"` and `"jpg"` agree.
    pub fn normalize_extensions(mut self) -> Self {
        let mut exts: Vec<String> = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        exts.sort();
        exts.dedup();
        self.extensions = exts;
        self
    }

    /// Validate config values are within acceptable ranges.
    ///
    /// Directories are only compared by spelling here; see
    /// [`validate_resolved_dirs`](Self::validate_resolved_dirs) for the check
    /// that follows symlinks and `..`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::Validation(
                "threshold must be greater than 0".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "at least one extension must be configured".into(),
            ));
        }
        let supported = supported_extensions();
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| !supported.iter().any(|s| e.eq_ignore_ascii_case(s)))
        {
            return Err(ConfigError::Validation(format!(
                "unsupported extension {:?}, expected one of: {}",
                ext,
                supported.join(", ")
            )));
        }
        if self.suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "suffix must not contain a path separator: {:?}",
                self.suffix
            )));
        }
        if self.suffix.is_empty() && self.output_dir() == self.target_dir.as_path() {
            return Err(ConfigError::Validation(
                "an empty suffix requires a separate output directory, \
                 otherwise originals would be overwritten"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Reject an empty suffix when the output directory resolves to the
    /// target directory under another spelling.
    ///
    /// Both directories must already exist.
    pub fn validate_resolved_dirs(&self) -> Result<(), ConfigError> {
        if !self.suffix.is_empty() {
            return Ok(());
        }
        let target = fs::canonicalize(&self.target_dir)?;
        let output = fs::canonicalize(self.output_dir())?;
        if target == output {
            return Err(ConfigError::Validation(format!(
                "an empty suffix requires a separate output directory, \
                 but {} is the target directory {}",
                self.output_dir().display(),
                target.display()
            )));
        }
        Ok(())
    }
}
