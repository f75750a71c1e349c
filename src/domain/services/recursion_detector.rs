//! Detection of SVG documents that embed content through the content API.

use crate::domain::entities::RenderCategory;

/// Default marker: the content API's own content-reference path.
pub const DEFAULT_RECURSION_MARKER: &str = "/content/";

/// Flags SVG documents that reference the content-serving API.
///
/// This is a plain substring search, not an SVG parse. Text that merely
/// mentions the marker (a comment, a `<text>` node) is also flagged.
#[derive(Debug, Clone)]
pub struct RecursionDetector {
    marker: String,
}

impl RecursionDetector {
    /// Creates a detector for the given marker.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Upgrades `Svg` to `SvgRecursive` when `decoded_text` contains the marker.
    /// Every other category is returned unchanged.
    #[must_use]
    pub fn detect(&self, category: RenderCategory, decoded_text: &str) -> RenderCategory {
        if category != RenderCategory::Svg || self.marker.is_empty() {
            return category;
        }

        if decoded_text.contains(&self.marker) {
            RenderCategory::SvgRecursive
        } else {
            category
        }
    }
}

impl Default for RecursionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_RECURSION_MARKER)
    }
}
