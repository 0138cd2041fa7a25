//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They decide
//! output paths and codecs from filenames and configuration, then hand the
//! resulting parameters to the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::downsample_dimensions;
use super::params::{ConvertParams, EncodeTarget, Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Extension given to converted captures.
pub const CONVERTED_EXTENSION: &str = "jpeg";

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

/// Codec for re-saving `path` in place: JPEG stays JPEG, anything else is PNG.
pub fn encode_target_for(path: &Path, jpeg_quality: Quality, keep_png_alpha: bool) -> EncodeTarget {
    if is_jpeg(path) {
        EncodeTarget::Jpeg {
            quality: jpeg_quality,
        }
    } else {
        EncodeTarget::Png {
            keep_alpha: keep_png_alpha,
        }
    }
}

/// Plan the conversion of a legacy capture to `<stem>.jpeg` next to it.
pub fn plan_conversion(source: &Path, quality: Quality) -> ConvertParams {
    ConvertParams {
        source: source.to_path_buf(),
        output: source.with_extension(CONVERTED_EXTENSION),
        quality,
    }
}

/// Plan an in-place downsample, or `None` if the image already fits.
pub fn plan_downsample(
    source: &Path,
    original: Dimensions,
    max_width: u32,
    target: EncodeTarget,
) -> Option<ResizeParams> {
    downsample_dimensions(original, max_width).map(|dims| ResizeParams {
        source: source.to_path_buf(),
        output: source.to_path_buf(),
        width: dims.width,
        height: dims.height,
        target,
    })
}
