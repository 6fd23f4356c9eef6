//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_scaled_dimensions;
use super::params::{Quality, ResizeParams};
use crate::config::Interpolation;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Fully decode an image and report its dimensions.
///
/// Any open or decode failure surfaces here, before the caller has seen a
/// resolution.
pub fn decode_image<B: ImageBackend>(
    backend: &B,
    path: &Path,
) -> Result<(B::Image, Dimensions)> {
    let image = backend.load(path)?;
    let dimensions = backend.dimensions(&image);
    Ok((image, dimensions))
}

/// Settings that shape every rescale in a run.
#[derive(Debug, Clone, Copy)]
pub struct RescaleSettings {
    pub threshold: u32,
    pub interpolation: Interpolation,
    pub quality: Quality,
}

/// Plan a rescale without executing it.
///
/// Returns `None` when `original` already fits inside the threshold.
pub fn plan_rescale(
    source: &Path,
    output: &Path,
    original: Dimensions,
    settings: &RescaleSettings,
) -> Option<ResizeParams> {
    let scaled = calculate_scaled_dimensions(original, settings.threshold)?;
    Some(ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: scaled.width,
        height: scaled.height,
        interpolation: settings.interpolation,
        quality: settings.quality,
    })
}

/// Execute a planned rescale on a decoded image and return the written dimensions.
pub fn execute_rescale<B: ImageBackend>(
    backend: &B,
    image: &B::Image,
    params: &ResizeParams,
) -> Result<Dimensions> {
    backend.resize(image, params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
