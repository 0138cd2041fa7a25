//! `image`-crate backend, with HEIC decoding through libheif.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image` crate (pure Rust decoders) |
//! | Decode (HEIC/HEIF) | `libheif-rs`, only with the `heic` feature |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//!
//! Encoding happens into memory before the destination is opened, so an
//! encoder error never truncates the file being overwritten.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ConvertParams, EncodeTarget, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Backend built on the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_heif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("heic") || e.eq_ignore_ascii_case("heif"))
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    if is_heif(path) {
        return decode_heif(path);
    }
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

#[cfg(feature = "heic")]
fn heif_error(path: &Path, e: libheif_rs::HeifError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Decode the primary image of a HEIF container into 8-bit RGB(A).
#[cfg(feature = "heic")]
fn decode_heif(path: &Path) -> Result<DynamicImage, BackendError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let path_str = path.to_str().ok_or_else(|| {
        BackendError::ProcessingFailed(format!("Non UTF-8 path: {}", path.display()))
    })?;
    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_file(path_str).map_err(|e| heif_error(path, e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| heif_error(path, e))?;

    let has_alpha = handle.has_alpha_channel();
    let (chroma, channels) = if has_alpha {
        (RgbChroma::Rgba, 4)
    } else {
        (RgbChroma::Rgb, 3)
    };
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| heif_error(path, e))?;

    let planes = decoded.planes();
    let plane = planes.interleaved.ok_or_else(|| {
        BackendError::ProcessingFailed(format!(
            "No interleaved plane in decoded {}",
            path.display()
        ))
    })?;

    // Rows may be padded past width * channels; copy only the pixels
    let (width, height) = (plane.width, plane.height);
    let row_len = width as usize * channels;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        pixels.extend_from_slice(&row[..row_len]);
    }

    let image = if has_alpha {
        image::RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
    } else {
        image::RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
    };
    image.ok_or_else(|| {
        BackendError::ProcessingFailed(format!(
            "Decoded HEIF buffer does not match {}x{}",
            width, height
        ))
    })
}

#[cfg(not(feature = "heic"))]
fn decode_heif(path: &Path) -> Result<DynamicImage, BackendError> {
    Err(BackendError::Unsupported(format!(
        "cannot decode {}: built without the `heic` feature",
        path.display()
    )))
}

/// Convert to a color layout the target codec can store.
///
/// Flattening drops alpha without compositing, so transparent pixels keep
/// whatever color they carry underneath.
fn normalize(img: DynamicImage, target: EncodeTarget) -> DynamicImage {
    match target {
        EncodeTarget::Png { keep_alpha: true } if img.color().has_alpha() => {
            DynamicImage::ImageRgba8(img.into_rgba8())
        }
        EncodeTarget::Jpeg { .. } | EncodeTarget::Png { .. } => {
            DynamicImage::ImageRgb8(img.into_rgb8())
        }
    }
}

fn encode(img: &DynamicImage, target: EncodeTarget) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let result = match target {
        EncodeTarget::Jpeg { quality } => {
            img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.value() as u8))
        }
        EncodeTarget::Png { .. } => img.write_with_encoder(PngEncoder::new(&mut buf)),
    };
    result.map_err(|e| BackendError::ProcessingFailed(format!("Encode failed: {}", e)))?;
    Ok(buf)
}

/// Normalize, encode, and write an image.
fn save_image(img: DynamicImage, path: &Path, target: EncodeTarget) -> Result<(), BackendError> {
    let bytes = encode(&normalize(img, target), target)?;
    std::fs::write(path, bytes).map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        if is_heif(path) {
            let img = decode_heif(path)?;
            return Ok(Dimensions {
                width: img.width(),
                height: img.height(),
            });
        }
        let (width, height) = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        Ok(Dimensions { width, height })
    }

    fn decodes_legacy(&self) -> bool {
        cfg!(feature = "heic")
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        save_image(
            img,
            &params.output,
            EncodeTarget::Jpeg {
                quality: params.quality,
            },
        )
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(resized, &params.output, params.target)
    }
}
