//! # Gallery Build
//!
//! Prepares the photo gallery of a static website. Drop phone exports into
//! `docs/images/`, run `gallery-build` from the repository root, and commit
//! the result: HEIC captures become JPEGs, oversized photos are shrunk to a
//! web-friendly width, and `docs/gallery.html` is regenerated to list every
//! image.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Convert     IMG_*.heic  →  IMG_*.jpeg   (originals deleted)
//! 2. Downsample  wide images →  max width    (overwritten in place)
//! 3. Generate    file list   →  gallery.html (overwritten every run)
//! ```
//!
//! Every stage works on the directory itself. There is no manifest and no
//! cache: each stage rescans, and a second run over an already-processed
//! directory changes nothing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`convert`] | Stage 1: legacy captures to JPEG, originals removed after a successful write |
//! | [`downsample`] | Stage 2: resize anything wider than the limit, in its own format |
//! | [`scan`] | Directory listing shared by all stages; the sorted gallery list |
//! | [`generate`] | Stage 3: renders the page with Maud and writes it |
//! | [`pipeline`] | Runs the stages in order and collects their reports |
//! | [`config`] | `gallery.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Filename → alt-text rules |
//! | [`types`] | Per-file outcomes and batch reports |
//! | [`imaging`] | Backend trait and the `image`-crate implementation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Backend Trait
//!
//! All pixel work goes through [`imaging::ImageBackend`]. The stages only
//! decide *what* to do with a file; tests swap in a mock backend that
//! records operations, so stage logic is tested without encoding images.
//!
//! ## HEIC Behind a Feature
//!
//! The default build is pure Rust. HEIC decoding needs the system `libheif`
//! and is enabled with `--features heic`. Without it the converter refuses
//! to run when HEIC files are present, rather than silently leaving them
//! out of the gallery.

pub mod config;
pub mod convert;
pub mod downsample;
pub mod generate;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
