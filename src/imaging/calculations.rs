//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Dimensions after downsampling to `max_width`, or `None` if the image
/// already fits.
///
/// The width becomes exactly `max_width`; the height is scaled by the same
/// ratio and rounded down, but never below one pixel.
///
/// # Examples
/// ```
/// # use gallery_build::imaging::{Dimensions, downsample_dimensions};
/// let big = Dimensions { width: 4032, height: 3024 };
/// assert_eq!(
///     downsample_dimensions(big, 2000),
///     Some(Dimensions { width: 2000, height: 1500 })
/// );
///
/// let small = Dimensions { width: 1200, height: 900 };
/// assert_eq!(downsample_dimensions(small, 2000), None);
/// ```
pub fn downsample_dimensions(original: Dimensions, max_width: u32) -> Option<Dimensions> {
    if original.width <= max_width {
        return None;
    }
    // Integer math: floor(h * max / w) without float rounding surprises
    let height = u64::from(original.height) * u64::from(max_width) / u64::from(original.width);
    Some(Dimensions {
        width: max_width,
        height: (height as u32).max(1),
    })
}
