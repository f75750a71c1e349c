//! Render categories derived from inscription content.

use serde::{Deserialize, Serialize};

/// Semantic category deciding how a piece of content is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderCategory {
    /// Raster image.
    Image,
    /// SVG document without references back into the content API.
    Svg,
    /// SVG document embedding other content through the content API.
    SvgRecursive,
    /// HTML document.
    Html,
    /// Plain text or JSON.
    Text,
    /// Video stream.
    Video,
    /// Audio stream.
    Audio,
    /// PDF document.
    Pdf,
    /// glTF JSON model.
    Model,
    /// Content that cannot be rendered.
    Unsupported,
    /// Content is being fetched or classified.
    Loading,
    /// Content could not be fetched.
    Error,
}

impl RenderCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Image,
        Self::Svg,
        Self::SvgRecursive,
        Self::Html,
        Self::Text,
        Self::Video,
        Self::Audio,
        Self::Pdf,
        Self::Model,
        Self::Unsupported,
        Self::Loading,
        Self::Error,
    ];

    /// Returns true if rendering needs an object reference to the raw bytes.
    #[must_use]
    pub const fn requires_resource_handle(self) -> bool {
        matches!(
            self,
            Self::Image | Self::Svg | Self::Video | Self::Audio | Self::Model
        )
    }

    /// Returns true if the payload is decoded to text before rendering.
    #[must_use]
    pub const fn is_text_like(self) -> bool {
        matches!(self, Self::Text | Self::Svg | Self::Html)
    }

    /// Returns true if a snapshot of this category may carry a text payload.
    #[must_use]
    pub const fn carries_text(self) -> bool {
        matches!(self, Self::Text | Self::Svg | Self::Html | Self::SvgRecursive)
    }

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Svg => "svg",
            Self::SvgRecursive => "svg-recursive",
            Self::Html => "html",
            Self::Text => "text",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Model => "model",
            Self::Unsupported => "unsupported",
            Self::Loading => "loading",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for RenderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
