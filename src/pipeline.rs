//! The full build: convert → downsample → list → render → write.
//!
//! Each stage re-reads the image directory, so the page always reflects what
//! the earlier stages actually left on disk. Per-file problems are collected
//! in the stage reports; only directory-level failures abort the build.

use crate::config::GalleryConfig;
use crate::convert::{ConvertError, convert, legacy_candidates};
use crate::downsample::{DownsampleError, downsample};
use crate::generate::{GenerateError, PageSettings, render_gallery, write_gallery};
use crate::imaging::ImageBackend;
use crate::scan::{ScanError, list_gallery_images};
use crate::types::BatchReport;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("images directory not found: {}", .0.display())]
    MissingImagesDir(PathBuf),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Downsample failed: {0}")]
    Downsample(#[from] DownsampleError),
    #[error("Listing gallery images failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Writing gallery failed: {0}")]
    Generate(#[from] GenerateError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Leave legacy captures alone; the converter does not run at all.
    pub skip_convert: bool,
}

/// What a build did, for reporting.
#[derive(Debug)]
pub struct BuildSummary {
    /// `None` when conversion was skipped.
    pub converted: Option<BatchReport>,
    pub downsampled: BatchReport,
    /// Filenames listed in the page, in page order.
    pub images: Vec<String>,
    pub images_dir: PathBuf,
    pub output_path: PathBuf,
}

/// Run every stage against the repository at `root`.
pub fn build(
    root: &Path,
    config: &GalleryConfig,
    options: BuildOptions,
    backend: &impl ImageBackend,
) -> Result<BuildSummary, BuildError> {
    let images_dir = config.images_path(root);
    if !images_dir.is_dir() {
        return Err(BuildError::MissingImagesDir(images_dir));
    }

    let converted = if options.skip_convert {
        None
    } else {
        let pending = legacy_candidates(&images_dir, config)?;
        if !pending.is_empty() && !backend.decodes_legacy() {
            return Err(ConvertError::Unsupported(pending.len()).into());
        }
        Some(convert(&images_dir, config, backend)?)
    };

    let downsampled = downsample(&images_dir, config, backend)?;

    let images = list_gallery_images(&images_dir, config)?;
    let document = render_gallery(&images, &PageSettings::from_config(config));
    let output_path = config.output_path(root);
    write_gallery(&output_path, &document)?;

    Ok(BuildSummary {
        converted,
        downsampled,
        images,
        images_dir,
        output_path,
    })
}
