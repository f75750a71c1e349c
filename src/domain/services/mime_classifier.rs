//! MIME type to render category mapping.

use crate::domain::entities::RenderCategory;

/// Maps the MIME string reported by the content API to a render category.
pub struct MimeClassifier;

impl MimeClassifier {
    /// Classifies a raw MIME string. Absent or unknown types are `Unsupported`.
    ///
    /// Matching is exact on the lowercased type/subtype; parameters such as
    /// `charset` or `codecs` never change the outcome.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub fn classify(raw_mime: Option<&str>) -> RenderCategory {
        let Some(essence) = raw_mime.and_then(mime_essence) else {
            return RenderCategory::Unsupported;
        };

        match essence.as_str() {
            "image/png" | "image/jpeg" | "image/jpg" | "image/webp" | "image/gif"
            | "image/avif" => RenderCategory::Image,
            "image/svg+xml" => RenderCategory::Svg,
            "text/plain" | "application/json" | "text/rtf" => RenderCategory::Text,
            "text/html" => RenderCategory::Html,
            "video/mp4" | "video/webm" => RenderCategory::Video,
            "audio/mpeg" | "audio/opus" | "audio/ogg" => RenderCategory::Audio,
            "application/pdf" => RenderCategory::Pdf,
            "model/gltf+json" => RenderCategory::Model,
            // Binary glTF cannot be decoded client-side.
            "model/gltf-binary" => RenderCategory::Unsupported,
            _ => RenderCategory::Unsupported,
        }
    }
}

/// Lowercased `type/subtype` without parameters, or `None` for blank input.
#[must_use]
pub fn mime_essence(raw_mime: &str) -> Option<String> {
    let essence = raw_mime.split(';').next().unwrap_or_default().trim();
    (!essence.is_empty()).then(|| essence.to_ascii_lowercase())
}

/// Value of the named MIME parameter, unquoted.
#[must_use]
pub fn mime_parameter<'a>(raw_mime: &'a str, name: &str) -> Option<&'a str> {
    raw_mime.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().trim_matches(['"', '\'']))
    })
}
