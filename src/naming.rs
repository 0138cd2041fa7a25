//! Alt text derived from image filenames.
//!
//! Camera and phone exports carry machine names (`IMG_3818.jpeg`) that say
//! nothing to a screen reader, so those get the bare site name. Anything
//! else was named by a person and its stem is appended:
//!
//! - `IMG_3818.jpeg` → "Get Together Preschool"
//! - `photo_a.png` → "Get Together Preschool photo_a"
//!
//! The mapping is a table of [`AltRule`]s checked in order; the first rule
//! whose prefix matches decides the label.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a matched filename turns into alt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltLabel {
    /// Just the site name.
    SiteName,
    /// Site name followed by the filename stem.
    SiteNameWithStem,
}

/// A `{prefix → label}` entry in the alt-text table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AltRule {
    pub prefix: String,
    pub label: AltLabel,
}

/// Filename without its last extension (`a.b.png` → `a.b`).
fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Alt text for a gallery image.
///
/// Falls back to [`AltLabel::SiteNameWithStem`] when no rule matches.
pub fn alt_text(filename: &str, site_name: &str, rules: &[AltRule]) -> String {
    let label = rules
        .iter()
        .find(|rule| filename.starts_with(&rule.prefix))
        .map(|rule| rule.label)
        .unwrap_or(AltLabel::SiteNameWithStem);

    match label {
        AltLabel::SiteName => site_name.to_string(),
        AltLabel::SiteNameWithStem => format!("{} {}", site_name, stem(filename)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "Get Together Preschool";

    fn device_rules() -> Vec<AltRule> {
        vec![AltRule {
            prefix: "IMG_".to_string(),
            label: AltLabel::SiteName,
        }]
    }

    #[test]
    fn device_capture_gets_site_name_only() {
        assert_eq!(alt_text("IMG_0001.jpeg", SITE, &device_rules()), SITE);
    }

    #[test]
    fn named_photo_gets_stem_appended() {
        assert_eq!(
            alt_text("photo_a.png", SITE, &device_rules()),
            "Get Together Preschool photo_a"
        );
    }

    #[test]
    fn only_last_extension_is_stripped() {
        assert_eq!(
            alt_text("class.trip.jpg", SITE, &device_rules()),
            "Get Together Preschool class.trip"
        );
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(
            alt_text("img_0001.jpeg", SITE, &device_rules()),
            "Get Together Preschool img_0001"
        );
    }

    #[test]
    fn empty_table_always_appends_stem() {
        assert_eq!(
            alt_text("IMG_0001.jpeg", SITE, &[]),
            "Get Together Preschool IMG_0001"
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            AltRule {
                prefix: "IMG_E".to_string(),
                label: AltLabel::SiteNameWithStem,
            },
            AltRule {
                prefix: "IMG_".to_string(),
                label: AltLabel::SiteName,
            },
        ];
        assert_eq!(
            alt_text("IMG_E0042.jpeg", SITE, &rules),
            "Get Together Preschool IMG_E0042"
        );
        assert_eq!(alt_text("IMG_0042.jpeg", SITE, &rules), SITE);
    }
}
