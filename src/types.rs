//! Per-file outcomes shared by the converter and the downsampler.
//!
//! Both stages work file by file and never abort a batch over one bad image.
//! Each file they touch yields a [`FileOutcome`]; the batch as a whole is a
//! [`BatchReport`] that the CLI formats and tests assert on directly.

use crate::imaging::Dimensions;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Legacy capture re-encoded as JPEG; `output` is the new filename.
    Converted { output: String },
    /// Overwritten in place at smaller dimensions.
    Resized { from: Dimensions, to: Dimensions },
    /// Already within limits; the file was not rewritten.
    Unchanged,
    /// Skipped after an error; the batch carried on.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub filename: String,
    pub outcome: Outcome,
}

impl FileOutcome {
    pub fn new(filename: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            filename: filename.into(),
            outcome,
        }
    }

    pub fn failed(filename: impl Into<String>, reason: impl ToString) -> Self {
        Self::new(
            filename,
            Outcome::Failed {
                reason: reason.to_string(),
            },
        )
    }
}

/// Outcomes of one stage, in the order files were visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// Filenames of the files this stage created: converted outputs and
    /// resized files.
    pub fn written(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.outcome {
                Outcome::Converted { output } => Some(output.as_str()),
                Outcome::Resized { .. } => Some(o.filename.as_str()),
                Outcome::Unchanged | Outcome::Failed { .. } => None,
            })
            .collect()
    }

    /// Number of files converted or resized.
    pub fn changed_count(&self) -> usize {
        self.written().len()
    }

    /// `(filename, reason)` for every failed file.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Failed { reason } => Some((o.filename.as_str(), reason.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    fn sample_report() -> BatchReport {
        BatchReport {
            outcomes: vec![
                FileOutcome::new(
                    "IMG_0001.HEIC",
                    Outcome::Converted {
                        output: "IMG_0001.jpeg".to_string(),
                    },
                ),
                FileOutcome::new(
                    "big.png",
                    Outcome::Resized {
                        from: dims(4000, 3000),
                        to: dims(2000, 1500),
                    },
                ),
                FileOutcome::new("small.jpg", Outcome::Unchanged),
                FileOutcome::failed("broken.jpg", "Failed to decode"),
            ],
        }
    }

    #[test]
    fn written_lists_outputs_in_order() {
        assert_eq!(sample_report().written(), vec!["IMG_0001.jpeg", "big.png"]);
    }

    #[test]
    fn changed_count_ignores_unchanged_and_failed() {
        assert_eq!(sample_report().changed_count(), 2);
    }

    #[test]
    fn failures_carry_reason() {
        let report = sample_report();
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures, vec![("broken.jpg", "Failed to decode")]);
    }

    #[test]
    fn empty_report() {
        let report = BatchReport::default();
        assert_eq!(report.changed_count(), 0);
        assert_eq!(report.failures().count(), 0);
    }
}
