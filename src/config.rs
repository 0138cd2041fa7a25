//! Gallery configuration.
//!
//! Every knob the pipeline uses (paths, thresholds, extension sets, the
//! exclusion list, alt-text rules) lives in [`GalleryConfig`] and is passed
//! explicitly into each stage. Stock defaults describe the site this tool was
//! written for; an optional `gallery.toml` at the repository root overrides
//! any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! images_dir = "docs/images"        # Relative to the repository root
//! output = "docs/gallery.html"      # Overwritten on every run
//! images_url = "./images"           # How the page refers to images_dir
//! site_name = "Get Together Preschool"
//! exclude = ["logo.png"]            # Never downsampled, never listed
//! gallery_extensions = ["jpeg", "jpg", "png"]
//!
//! [convert]
//! prefix = "IMG_"                   # Device-generated capture prefix
//! extensions = ["heic"]             # Matched case-insensitively
//! quality = 92                      # JPEG quality (1-100)
//!
//! [downsample]
//! max_width = 2000
//! quality = 92                      # JPEG quality for resized JPEGs
//! flatten_png_alpha = false         # Drop transparency when re-saving PNGs
//!
//! [[alt_rules]]
//! prefix = "IMG_"
//! label = "site_name"               # or "site_name_with_stem"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::{AltLabel, AltRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file at the repository root.
pub const CONFIG_FILE: &str = "gallery.toml";

/// Extensions the downsampler knows how to re-encode.
const ENCODABLE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Image directory, relative to the repository root.
    pub images_dir: String,
    /// Generated gallery page, relative to the repository root.
    pub output: String,
    /// URL prefix the generated page uses for images (and the logo).
    pub images_url: String,
    /// Site name used in the page title and image alt text.
    pub site_name: String,
    /// Filenames that are not photos (exact match).
    pub exclude: Vec<String>,
    /// Extensions (without dot) that appear in the gallery.
    pub gallery_extensions: Vec<String>,
    pub convert: ConvertConfig,
    pub downsample: DownsampleConfig,
    /// Alt-text rules, first matching prefix wins.
    pub alt_rules: Vec<AltRule>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images_dir: "docs/images".to_string(),
            output: "docs/gallery.html".to_string(),
            images_url: "./images".to_string(),
            site_name: "Get Together Preschool".to_string(),
            exclude: vec!["logo.png".to_string()],
            gallery_extensions: vec!["jpeg".to_string(), "jpg".to_string(), "png".to_string()],
            convert: ConvertConfig::default(),
            downsample: DownsampleConfig::default(),
            alt_rules: vec![AltRule {
                prefix: "IMG_".to_string(),
                label: AltLabel::SiteName,
            }],
        }
    }
}

/// HEIC → JPEG conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Filename prefix marking device-generated captures.
    pub prefix: String,
    /// Legacy extensions to convert (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// JPEG quality for converted files.
    pub quality: u32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            prefix: "IMG_".to_string(),
            extensions: vec!["heic".to_string()],
            quality: 92,
        }
    }
}

/// Downsampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownsampleConfig {
    /// Images wider than this are resized to exactly this width.
    pub max_width: u32,
    /// JPEG quality when re-encoding resized JPEGs.
    pub quality: u32,
    /// Flatten transparent PNGs to opaque RGB when re-saving them.
    pub flatten_png_alpha: bool,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            max_width: 2000,
            quality: 92,
            flatten_png_alpha: false,
        }
    }
}

fn has_extension(set: &[String], path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| set.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, quality) in [
            ("convert.quality", self.convert.quality),
            ("downsample.quality", self.downsample.quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }
        if self.downsample.max_width == 0 {
            return Err(ConfigError::Validation(
                "downsample.max_width must be non-zero".into(),
            ));
        }
        if self.gallery_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "gallery_extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self.gallery_extensions.iter().find(|e| {
            !ENCODABLE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        }) {
            return Err(ConfigError::Validation(format!(
                "gallery_extensions: unsupported extension '{ext}' (expected jpeg, jpg or png)"
            )));
        }
        if !self
            .gallery_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case("jpeg"))
        {
            return Err(ConfigError::Validation(
                "gallery_extensions must include 'jpeg' (converted images use it)".into(),
            ));
        }
        if self.convert.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "convert.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn images_path(&self, root: &Path) -> PathBuf {
        root.join(&self.images_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }

    pub fn is_excluded(&self, filename: &str) -> bool {
        self.exclude.iter().any(|e| e == filename)
    }

    /// Extension is one of the gallery formats (case-insensitive).
    pub fn is_gallery_image(&self, path: &Path) -> bool {
        has_extension(&self.gallery_extensions, path)
    }

    /// Name carries the device prefix and a legacy-format extension.
    pub fn is_legacy_capture(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&self.convert.prefix))
            && has_extension(&self.convert.extensions, path)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so arrays
///   such as `exclude` or `alt_rules` are replaced, not appended to.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `gallery.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the gallery config for a repository root.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}
