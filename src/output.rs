//! CLI output formatting for all build stages.
//!
//! # Output Format
//!
//! A run that converts, resizes and writes prints:
//!
//! ```text
//! Converted 2 HEIC(s) to JPEG: IMG_0001.jpeg, IMG_0002.jpeg
//! Downsampled 3 image(s) to max width 2000px.
//! Wrote docs/gallery.html with 14 image(s).
//! ```
//!
//! Stage summaries are omitted when the stage changed nothing, so a repeat
//! run prints only the `Wrote` line. Per-file problems go to stderr, in the
//! order the stage hit them:
//!
//! ```text
//! Warning: could not downsample broken.jpg: Image processing failed: ...
//! Warning: no gallery images found in docs/images
//! ```
//!
//! # Architecture
//!
//! Each message has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes it out. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::BuildSummary;
use crate::types::BatchReport;
use std::path::Path;

// ============================================================================
// Stage 1: Convert
// ============================================================================

/// One line listing the new JPEG names, or nothing if none were written.
pub fn format_convert_report(report: &BatchReport) -> Vec<String> {
    let written = report.written();
    if written.is_empty() {
        return Vec::new();
    }
    vec![format!(
        "Converted {} HEIC(s) to JPEG: {}",
        written.len(),
        written.join(", ")
    )]
}

// ============================================================================
// Stage 2: Downsample
// ============================================================================

pub fn format_downsample_report(report: &BatchReport, max_width: u32) -> Vec<String> {
    match report.changed_count() {
        0 => Vec::new(),
        n => vec![format!("Downsampled {n} image(s) to max width {max_width}px.")],
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// `Warning: could not <verb> <name>: <cause>` for every failed file.
pub fn format_warnings(verb: &str, report: &BatchReport) -> Vec<String> {
    report
        .failures()
        .map(|(name, reason)| format!("Warning: could not {verb} {name}: {reason}"))
        .collect()
}

pub fn format_empty_warning(images_dir: &Path) -> Vec<String> {
    vec![format!(
        "Warning: no gallery images found in {}",
        images_dir.display()
    )]
}

// ============================================================================
// Stage 3: Generate
// ============================================================================

pub fn format_written(output_path: &Path, count: usize) -> Vec<String> {
    vec![format!(
        "Wrote {} with {} image(s).",
        output_path.display(),
        count
    )]
}

// ============================================================================
// Printing
// ============================================================================

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn print_warnings(lines: Vec<String>) {
    for line in lines {
        eprintln!("{}", line);
    }
}

/// Print the whole run: each stage's warnings followed by its summary.
pub fn print_build_summary(summary: &BuildSummary, max_width: u32) {
    if let Some(converted) = &summary.converted {
        print_warnings(format_warnings("convert", converted));
        print_lines(format_convert_report(converted));
    }

    print_warnings(format_warnings("downsample", &summary.downsampled));
    print_lines(format_downsample_report(&summary.downsampled, max_width));

    if summary.images.is_empty() {
        print_warnings(format_empty_warning(&summary.images_dir));
    }
    print_lines(format_written(&summary.output_path, summary.images.len()));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::types::{FileOutcome, Outcome};

    fn converted(pairs: &[(&str, &str)]) -> BatchReport {
        BatchReport {
            outcomes: pairs
                .iter()
                .map(|(src, out)| {
                    FileOutcome::new(
                        *src,
                        Outcome::Converted {
                            output: out.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }

    fn resized(name: &str) -> FileOutcome {
        FileOutcome::new(
            name,
            Outcome::Resized {
                from: Dimensions {
                    width: 4000,
                    height: 3000,
                },
                to: Dimensions {
                    width: 2000,
                    height: 1500,
                },
            },
        )
    }

    #[test]
    fn convert_lists_new_names() {
        let report = converted(&[
            ("IMG_0001.HEIC", "IMG_0001.jpeg"),
            ("IMG_0002.heic", "IMG_0002.jpeg"),
        ]);
        assert_eq!(
            format_convert_report(&report),
            vec!["Converted 2 HEIC(s) to JPEG: IMG_0001.jpeg, IMG_0002.jpeg"]
        );
    }

    #[test]
    fn convert_silent_when_nothing_converted() {
        let mut report = BatchReport::default();
        report.push(FileOutcome::failed("IMG_1.heic", "bad"));
        assert!(format_convert_report(&report).is_empty());
    }

    #[test]
    fn downsample_counts_only_resized() {
        let mut report = BatchReport::default();
        report.push(resized("a.jpg"));
        report.push(FileOutcome::new("b.jpg", Outcome::Unchanged));
        report.push(resized("c.png"));
        assert_eq!(
            format_downsample_report(&report, 2000),
            vec!["Downsampled 2 image(s) to max width 2000px."]
        );
    }

    #[test]
    fn downsample_silent_when_all_fit() {
        let mut report = BatchReport::default();
        report.push(FileOutcome::new("b.jpg", Outcome::Unchanged));
        assert!(format_downsample_report(&report, 2000).is_empty());
    }

    #[test]
    fn warnings_name_file_and_cause() {
        let mut report = BatchReport::default();
        report.push(resized("ok.jpg"));
        report.push(FileOutcome::failed("broken.jpg", "unexpected EOF"));
        assert_eq!(
            format_warnings("downsample", &report),
            vec!["Warning: could not downsample broken.jpg: unexpected EOF"]
        );
    }

    #[test]
    fn empty_and_written_lines() {
        assert_eq!(
            format_empty_warning(Path::new("docs/images")),
            vec!["Warning: no gallery images found in docs/images"]
        );
        assert_eq!(
            format_written(Path::new("docs/gallery.html"), 0),
            vec!["Wrote docs/gallery.html with 0 image(s)."]
        );
    }
}
