//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the operations the rescaler needs:
//! load (open and fully decode), dimensions of a loaded image, and resize
//! (resample, encode, write). Decoding happens once, in `load`, so a file
//! with a valid header but broken pixel data fails before its resolution is
//! ever reported.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decoded pixels as this backend holds them.
    type Image;

    /// Open and fully decode an image.
    fn load(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Dimensions of a loaded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resample a loaded image and write the result to `params.output`.
    fn resize(&self, image: &Self::Image, params: &ResizeParams) -> Result<(), BackendError>;
}
