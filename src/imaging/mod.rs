//! Image processing — pure Rust on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Load** | `image::ImageReader::decode` (full decode, dimensions read from the result) |
//! | **Resize (area)** | own coverage-weighted resampler in `area` |
//! | **Resize (other)** | `image::DynamicImage::resize_exact` |
//! | **Encode** | `image` JPEG / PNG encoders, format from the output extension |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

mod area;
pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_scaled_dimensions, exceeds_threshold};
pub use operations::{RescaleSettings, decode_image, execute_rescale, plan_rescale};
pub use params::{Quality, ResizeParams};
pub use rust_backend::{RustBackend, supported_extensions};
