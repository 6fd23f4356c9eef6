//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Whether an image must be shrunk: either axis strictly above `threshold`.
pub fn exceeds_threshold(dims: Dimensions, threshold: u32) -> bool {
    dims.width > threshold || dims.height > threshold
}

/// Scale `dims` so the longer edge equals `threshold`.
///
/// Each axis is `floor(axis * threshold / longer_edge)`, computed in integer
/// arithmetic so the longer edge lands exactly on `threshold` and the other
/// axis is truncated, never rounded. An axis that would truncate to zero is
/// kept at one pixel.
///
/// Returns `None` when the image already fits (see [`exceeds_threshold`]).
///
/// # Examples
/// ```
/// # use img_rescale::imaging::{Dimensions, calculate_scaled_dimensions};
/// let dims = Dimensions { width: 4000, height: 3000 };
/// assert_eq!(
///     calculate_scaled_dimensions(dims, 2560),
///     Some(Dimensions { width: 2560, height: 1920 })
/// );
///
/// let small = Dimensions { width: 2560, height: 1440 };
/// assert_eq!(calculate_scaled_dimensions(small, 2560), None);
/// ```
pub fn calculate_scaled_dimensions(dims: Dimensions, threshold: u32) -> Option<Dimensions> {
    if !exceeds_threshold(dims, threshold) {
        return None;
    }
    let longer = u64::from(dims.width.max(dims.height));
    let scale = |axis: u32| -> u32 {
        let scaled = u64::from(axis) * u64::from(threshold) / longer;
        // scaled <= threshold, so it always fits back into u32
        (scaled as u32).max(1)
    };
    Some(Dimensions {
        width: scale(dims.width),
        height: scale(dims.height),
    })
}
