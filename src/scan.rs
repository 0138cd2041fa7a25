//! Image directory scanning.
//!
//! The image directory is flat: every stage looks only at its regular files,
//! never at subdirectories. Symlinks are followed, so a link to an image
//! counts as that image.
//!
//! ```text
//! docs/images/
//! ├── logo.png            # excluded: site logo, not a photo
//! ├── IMG_3818.HEIC       # converted to IMG_3818.jpeg, then removed
//! ├── IMG_3819.jpeg       # listed
//! ├── playground.png      # listed
//! ├── notes.txt           # ignored: not a gallery extension
//! └── archive/            # ignored: not a regular file
//! ```
//!
//! [`list_gallery_images`] is the lister that feeds the gallery page; the
//! converter and downsampler share [`regular_files`] for their own passes.

use crate::config::GalleryConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Regular files directly inside `dir`, sorted by filename.
///
/// Only a failure to read `dir` itself is an error. Entries that cannot be
/// resolved (dangling or looping symlinks) are skipped like any other
/// non-file.
pub fn regular_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => continue,
            Err(e) => return Err(e.into()),
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// UTF-8 filename of a path; `None` for names the page could not reference.
pub(crate) fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Sorted filenames of the images that belong on the gallery page.
///
/// A file qualifies when its extension is a gallery extension
/// (case-insensitive) and its name is not excluded. Sort order is plain
/// byte-wise string order, so `IMG_10.jpeg` comes before `IMG_9.jpeg`.
pub fn list_gallery_images(dir: &Path, config: &GalleryConfig) -> Result<Vec<String>, ScanError> {
    let mut names: Vec<String> = regular_files(dir)?
        .iter()
        .filter(|path| config.is_gallery_image(path))
        .filter_map(|path| file_name(path))
        .filter(|name| !config.is_excluded(name))
        .map(str::to_string)
        .collect();
    names.sort();
    Ok(names)
}
