//! HEIC → JPEG conversion.
//!
//! Stage 1 of the build. Phones drop `IMG_1234.HEIC` files into the image
//! directory; browsers cannot show them, so each one is decoded, flattened
//! to opaque RGB, written next to the original as `IMG_1234.jpeg`, and the
//! original is removed.
//!
//! ## Safety of the delete
//!
//! The original is deleted only after the backend has finished writing the
//! JPEG. A file that fails to decode or encode is left exactly where it was
//! and reported as [`Outcome::Failed`]; the next file is processed as usual.

use crate::config::GalleryConfig;
use crate::imaging::{ImageBackend, Quality, plan_conversion};
use crate::scan::{file_name, regular_files};
use crate::types::{BatchReport, FileOutcome, Outcome};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(
        "HEIC conversion is unavailable ({0} file(s) waiting): rebuild with `--features heic` \
         (requires libheif) or rerun with --skip-convert"
    )]
    Unsupported(usize),
}

fn candidate_paths(dir: &Path, config: &GalleryConfig) -> Result<Vec<PathBuf>, ConvertError> {
    Ok(regular_files(dir)?
        .into_iter()
        .filter(|p| config.is_legacy_capture(p))
        .collect())
}

/// Filenames that [`convert`] would process, without touching them.
pub fn legacy_candidates(dir: &Path, config: &GalleryConfig) -> Result<Vec<String>, ConvertError> {
    Ok(candidate_paths(dir, config)?
        .iter()
        .filter_map(|p| file_name(p))
        .map(str::to_string)
        .collect())
}

/// Convert every legacy capture in `dir` to JPEG and delete the originals.
///
/// Fails as a whole only when the directory cannot be read or the backend
/// has no legacy decoder while candidates exist. Individual files never
/// abort the batch.
pub fn convert(
    dir: &Path,
    config: &GalleryConfig,
    backend: &impl ImageBackend,
) -> Result<BatchReport, ConvertError> {
    let candidates = candidate_paths(dir, config)?;
    if !candidates.is_empty() && !backend.decodes_legacy() {
        return Err(ConvertError::Unsupported(candidates.len()));
    }

    let quality = Quality::new(config.convert.quality);
    let mut report = BatchReport::default();

    for source in &candidates {
        let lossy = source.to_string_lossy();
        let filename = file_name(source).unwrap_or(&lossy);
        let params = plan_conversion(source, quality);

        if let Err(e) = backend.convert(&params) {
            report.push(FileOutcome::failed(filename, e));
            continue;
        }

        let output = file_name(&params.output)
            .unwrap_or_default()
            .to_string();
        match fs::remove_file(source) {
            Ok(()) => report.push(FileOutcome::new(filename, Outcome::Converted { output })),
            Err(e) => report.push(FileOutcome::failed(
                filename,
                format!("wrote {output} but could not remove original: {e}"),
            )),
        }
    }

    Ok(report)
}
