//! Run configuration for the category report.

use std::path::PathBuf;

/// Category scanned by default (no namespace prefix).
pub const DEFAULT_CATEGORY: &str = "זמרים_ישראלים";

/// Wikipedia language edition queried by default.
pub const DEFAULT_LANGUAGE: &str = "he";

const OUTPUT_SUFFIX: &str = "_without_musicbrainz.html";

/// Explicit run configuration handed to the pipeline entry points.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ReportConfig {
    pub category: String,
    pub language: String,
    pub output_path: PathBuf,
}

impl ReportConfig {
    /// Builds a config for `category`, deriving the report file name from it.
    pub fn for_category(category: &str, language: &str) -> Self {
        Self {
            category: category.to_string(),
            language: language.to_string(),
            output_path: PathBuf::from(format!("{category}{OUTPUT_SUFFIX}")),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::for_category(DEFAULT_CATEGORY, DEFAULT_LANGUAGE)
    }
}
