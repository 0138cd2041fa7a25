//! In-place downsampling of oversized gallery images.
//!
//! Stage 2 of the build. Every gallery image wider than
//! `downsample.max_width` is resized to exactly that width (Lanczos3, aspect
//! ratio kept, height rounded down) and overwritten in its own format: JPEG
//! files are re-encoded as JPEG, everything else as PNG.
//!
//! Images that already fit are never opened for writing, so repeated runs
//! leave them byte-for-byte identical and cost no extra generation loss.
//!
//! The overwrite is not transactional: an I/O failure halfway through the
//! final write can leave a truncated file.

use crate::config::GalleryConfig;
use crate::imaging::{
    Dimensions, ImageBackend, Quality, encode_target_for, get_dimensions, plan_downsample,
};
use crate::scan::{file_name, regular_files};
use crate::types::{BatchReport, FileOutcome, Outcome};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownsampleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shrink every gallery image in `dir` wider than the configured maximum.
///
/// Excluded files are skipped entirely. The number of modified files is
/// [`BatchReport::changed_count`].
pub fn downsample(
    dir: &Path,
    config: &GalleryConfig,
    backend: &impl ImageBackend,
) -> Result<BatchReport, DownsampleError> {
    let settings = &config.downsample;
    let quality = Quality::new(settings.quality);
    let mut report = BatchReport::default();

    for path in regular_files(dir)? {
        if !config.is_gallery_image(&path) {
            continue;
        }
        let Some(filename) = file_name(&path) else {
            continue;
        };
        if config.is_excluded(filename) {
            continue;
        }

        let original = match get_dimensions(backend, &path) {
            Ok(dims) => dims,
            Err(e) => {
                report.push(FileOutcome::failed(filename, e));
                continue;
            }
        };

        let target = encode_target_for(&path, quality, !settings.flatten_png_alpha);
        let Some(params) = plan_downsample(&path, original, settings.max_width, target) else {
            report.push(FileOutcome::new(filename, Outcome::Unchanged));
            continue;
        };

        let outcome = match backend.resize(&params) {
            Ok(()) => FileOutcome::new(
                filename,
                Outcome::Resized {
                    from: original,
                    to: Dimensions {
                        width: params.width,
                        height: params.height,
                    },
                },
            ),
            Err(e) => FileOutcome::failed(filename, e),
        };
        report.push(outcome);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::{EncodeTarget, RustBackend};
    use crate::test_helpers::{create_test_jpeg, create_test_png};
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"source bytes").unwrap();
    }

    fn resize_ops(backend: &MockBackend) -> Vec<RecordedOp> {
        backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Resize { .. }))
            .collect()
    }

    #[test]
    fn only_wide_images_are_resized() {
        let tmp = TempDir::new().unwrap();
        for name in ["big.jpg", "small.jpg", "edge.png"] {
            touch(tmp.path(), name);
        }
        let backend = MockBackend::with_dimensions(&[
            ("big.jpg", 4032, 3024),
            ("small.jpg", 1200, 900),
            ("edge.png", 2000, 3000),
        ]);

        let report = downsample(tmp.path(), &GalleryConfig::default(), &backend).unwrap();

        assert_eq!(report.changed_count(), 1);
        assert_eq!(report.written(), vec!["big.jpg"]);
        assert_eq!(
            resize_ops(&backend),
            vec![RecordedOp::Resize {
                source: "big.jpg".to_string(),
                output: "big.jpg".to_string(),
                width: 2000,
                height: 1500,
                target: EncodeTarget::Jpeg {
                    quality: Quality::new(92)
                },
            }]
        );
    }

    #[test]
    fn unchanged_files_are_reported_and_untouched() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "small.png");
        let backend = MockBackend::with_dimensions(&[("small.png", 640, 480)]);

        let report = downsample(tmp.path(), &GalleryConfig::default(), &backend).unwrap();

        assert_eq!(
            report.outcomes,
            vec![FileOutcome::new("small.png", Outcome::Unchanged)]
        );
        assert_eq!(fs::read(tmp.path().join("small.png")).unwrap(), b"source bytes");
    }

    #[test]
    fn png_target_keeps_alpha_by_default() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "wide.PNG");
        let backend = MockBackend::with_dimensions(&[("wide.PNG", 3000, 1000)]);

        downsample(tmp.path(), &GalleryConfig::default(), &backend).unwrap();

        assert!(matches!(
            &resize_ops(&backend)[0],
            RecordedOp::Resize {
                width: 2000,
                height: 666,
                target: EncodeTarget::Png { keep_alpha: true },
                ..
            }
        ));
    }

    #[test]
    fn png_alpha_flattened_when_configured() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "wide.png");
        let backend = MockBackend::with_dimensions(&[("wide.png", 3000, 1000)]);
        let mut config = GalleryConfig::default();
        config.downsample.flatten_png_alpha = true;

        downsample(tmp.path(), &config, &backend).unwrap();

        assert!(matches!(
            &resize_ops(&backend)[0],
            RecordedOp::Resize {
                target: EncodeTarget::Png { keep_alpha: false },
                ..
            }
        ));
    }

    #[test]
    fn excluded_and_foreign_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        for name in ["logo.png", "IMG_0001.HEIC", "notes.txt"] {
            touch(tmp.path(), name);
        }
        let backend = MockBackend::with_dimensions(&[("logo.png", 5000, 5000)]);

        let report = downsample(tmp.path(), &GalleryConfig::default(), &backend).unwrap();

        assert!(report.outcomes.is_empty());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            touch(tmp.path(), name);
        }
        let backend = MockBackend::with_dimensions(&[
            ("a.jpg", 3000, 2000),
            ("c.jpg", 3000, 2000),
        ])
        .failing_on(&["b.jpg"]);

        let report = downsample(tmp.path(), &GalleryConfig::default(), &backend).unwrap();

        assert_eq!(report.written(), vec!["a.jpg", "c.jpg"]);
        let failed: Vec<_> = report.failures().map(|(name, _)| name).collect();
        assert_eq!(failed, vec!["b.jpg"]);
    }

    #[test]
    fn configured_max_width_applies() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.jpg");
        let backend = MockBackend::with_dimensions(&[("a.jpg", 1600, 1200)]);
        let mut config = GalleryConfig::default();
        config.downsample.max_width = 800;

        let report = downsample(tmp.path(), &config, &backend).unwrap();

        assert_eq!(
            report.outcomes[0].outcome,
            Outcome::Resized {
                from: Dimensions {
                    width: 1600,
                    height: 1200
                },
                to: Dimensions {
                    width: 800,
                    height: 600
                },
            }
        );
    }

    // =========================================================================
    // Real backend
    // =========================================================================

    #[test]
    fn real_images_resized_to_exact_width() {
        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("wide.jpg"), 2400, 1601);
        create_test_png(&tmp.path().join("wide.png"), 2100, 700);

        let report = downsample(tmp.path(), &GalleryConfig::default(), &RustBackend::new()).unwrap();
        assert_eq!(report.changed_count(), 2);

        let jpg = image::open(tmp.path().join("wide.jpg")).unwrap();
        // floor(1601 * 2000 / 2400) = floor(1334.17) = 1334
        assert_eq!((jpg.width(), jpg.height()), (2000, 1334));

        let png = image::open(tmp.path().join("wide.png")).unwrap();
        // floor(700 * 2000 / 2100) = floor(666.67) = 666
        assert_eq!((png.width(), png.height()), (2000, 666));
    }

    #[test]
    fn real_images_within_limit_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("ok.jpg"), 2000, 1000);
        create_test_png(&tmp.path().join("ok.png"), 320, 240);
        let jpg_before = fs::read(tmp.path().join("ok.jpg")).unwrap();
        let png_before = fs::read(tmp.path().join("ok.png")).unwrap();

        let report = downsample(tmp.path(), &GalleryConfig::default(), &RustBackend::new()).unwrap();

        assert_eq!(report.changed_count(), 0);
        assert_eq!(fs::read(tmp.path().join("ok.jpg")).unwrap(), jpg_before);
        assert_eq!(fs::read(tmp.path().join("ok.png")).unwrap(), png_before);
    }

    #[test]
    fn corrupt_file_is_a_warning_not_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.jpg"), b"not a jpeg").unwrap();
        create_test_jpeg(&tmp.path().join("fine.jpg"), 100, 100);

        let report = downsample(tmp.path(), &GalleryConfig::default(), &RustBackend::new()).unwrap();

        let failed: Vec<_> = report.failures().map(|(name, _)| name).collect();
        assert_eq!(failed, vec!["broken.jpg"]);
        assert_eq!(fs::read(tmp.path().join("broken.jpg")).unwrap(), b"not a jpeg");
    }
}
