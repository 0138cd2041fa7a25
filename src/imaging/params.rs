//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`operations`](super::operations) module (which
//! decides what to write) and the [`backend`](super::backend) (which does
//! the pixel work), so a mock backend can stand in during tests.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 92). Clamped on construction.
//! - [`EncodeTarget`]: output codec plus how color is normalized for it.
//! - [`ConvertParams`]: legacy capture → JPEG alongside it.
//! - [`ResizeParams`]: in-place downsample to exact dimensions.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(92)
    }
}

/// Output codec for a write.
///
/// JPEG has no alpha channel, so JPEG output is always flattened to opaque
/// RGB. PNG output keeps transparency unless `keep_alpha` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeTarget {
    Jpeg { quality: Quality },
    Png { keep_alpha: bool },
}

/// Parameters for converting a legacy capture to JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}

/// Parameters for a resize to exact dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub target: EncodeTarget,
}
