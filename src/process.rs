//! The rescale pass.
//!
//! Takes a validated [`RescaleConfig`], lists the target directory once and
//! walks the candidates in name order:
//!
//! ```text
//! decode ──unreadable──▶ Unreadable
//!    │
//!    ├──fits threshold──▶ BelowThreshold
//!    │
//!    ▼
//! plan (floor-scaled dims) ─▶ resize + encode ──error──▶ Failed
//!                                   │
//!                                   ▼
//!                               Rescaled
//! ```
//!
//! Each file is decoded in full before its resolution is known, so broken
//! pixel data is always reported as unreadable.
//!
//! Exactly one [`ProcessEvent`] is emitted per candidate, through the
//! caller's callback, as soon as that file is done. Per-file errors never
//! leave the loop; only configuration and directory errors abort the run.
//!
//! Everything runs on the calling thread, one file at a time.

use crate::config::{ConfigError, RescaleConfig};
use crate::imaging::{
    Dimensions, ImageBackend, RescaleSettings, RustBackend, decode_image, execute_rescale,
    plan_rescale,
};
use crate::naming::ImageFile;
use crate::scan::{self, ScanError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Outcome of one candidate file.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// The file could not be opened or decoded.
    Unreadable { path: PathBuf, reason: String },
    /// Neither axis exceeds the threshold; nothing written.
    BelowThreshold {
        path: PathBuf,
        dimensions: Dimensions,
    },
    Rescaled {
        path: PathBuf,
        dimensions: Dimensions,
        scaled: Dimensions,
        output: PathBuf,
    },
    /// Resizing, encoding or writing the decoded image failed.
    Failed {
        path: PathBuf,
        dimensions: Dimensions,
        scaled: Dimensions,
        reason: String,
    },
}

/// Per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescaleSummary {
    pub rescaled: usize,
    pub below_threshold: usize,
    pub failed: usize,
}

impl RescaleSummary {
    fn record(&mut self, event: &ProcessEvent) {
        match event {
            ProcessEvent::Rescaled { .. } => self.rescaled += 1,
            ProcessEvent::BelowThreshold { .. } => self.below_threshold += 1,
            ProcessEvent::Unreadable { .. } | ProcessEvent::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.rescaled + self.below_threshold + self.failed
    }
}

impl std::fmt::Display for RescaleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let noun = if self.rescaled == 1 { "image" } else { "images" };
        write!(
            f,
            "Rescaled {} {}, {} below threshold, {} failed",
            self.rescaled, noun, self.below_threshold, self.failed
        )
    }
}

/// Rescale every oversized image in `config.target_dir` with the default backend.
pub fn rescale_dir(
    config: &RescaleConfig,
    on_event: impl FnMut(&ProcessEvent),
) -> Result<RescaleSummary, ProcessError> {
    rescale_dir_with_backend(&RustBackend::new(), config, on_event)
}

/// Rescale using a specific backend (allows testing with mock).
pub fn rescale_dir_with_backend(
    backend: &impl ImageBackend,
    config: &RescaleConfig,
    mut on_event: impl FnMut(&ProcessEvent),
) -> Result<RescaleSummary, ProcessError> {
    config.validate()?;

    scan::ensure_dir(&config.target_dir)?;
    let output_dir = config.output_dir();
    if output_dir != config.target_dir.as_path() {
        scan::ensure_dir(output_dir)?;
    }
    config.validate_resolved_dirs()?;

    let files = scan::scan(config)?;
    let settings = RescaleSettings {
        threshold: config.threshold,
        interpolation: config.interpolation,
        quality: config.quality,
    };

    let mut summary = RescaleSummary::default();
    for file in &files {
        let event = process_file(backend, file, config, &settings);
        summary.record(&event);
        on_event(&event);
    }

    log::debug!("{summary}");
    Ok(summary)
}

fn process_file(
    backend: &impl ImageBackend,
    file: &ImageFile,
    config: &RescaleConfig,
    settings: &RescaleSettings,
) -> ProcessEvent {
    let path = file.path.clone();

    let (image, dimensions) = match decode_image(backend, &file.path) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("could not read {}: {}", path.display(), e);
            return ProcessEvent::Unreadable {
                path,
                reason: e.to_string(),
            };
        }
    };

    let output = file.output_path(config.output_dir(), &config.suffix);
    let Some(params) = plan_rescale(&file.path, &output, dimensions, settings) else {
        return ProcessEvent::BelowThreshold { path, dimensions };
    };

    match execute_rescale(backend, &image, &params) {
        Ok(scaled) => ProcessEvent::Rescaled {
            path,
            dimensions,
            scaled,
            output,
        },
        Err(e) => {
            log::warn!("could not rescale {}: {}", path.display(), e);
            ProcessEvent::Failed {
                path,
                dimensions,
                scaled: Dimensions {
                    width: params.width,
                    height: params.height,
                },
                reason: e.to_string(),
            }
        }
    }
}
