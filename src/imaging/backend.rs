//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the whole surface the pipeline needs from
//! an image library: identify, convert a legacy capture to JPEG, and resize
//! in place. It also reports whether a legacy decoder is available at all,
//! so the pipeline can refuse up front instead of failing file by file.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::{ConvertParams, ResizeParams};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Whether [`convert`](Self::convert) can decode legacy captures (HEIC).
    fn decodes_legacy(&self) -> bool;

    /// Decode a legacy capture and write it as an opaque JPEG.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;

    /// Decode, resize to exact dimensions, normalize color, encode.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
