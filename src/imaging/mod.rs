//! Image processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` (header only) |
//! | **HEIC → JPEG** | `libheif-rs` decode + `JpegEncoder` |
//! | **Downsample** | Lanczos3 `resize_exact` + JPEG/PNG re-encode |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::downsample_dimensions;
pub use operations::{
    CONVERTED_EXTENSION, encode_target_for, get_dimensions, plan_conversion, plan_downsample,
};
pub use params::{ConvertParams, EncodeTarget, Quality, ResizeParams};
pub use rust_backend::RustBackend;
