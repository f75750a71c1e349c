//! Mapping from render category to presentation strategy.

use serde::Serialize;

use crate::domain::entities::{RenderCategory, RenderableContent};

/// How presentation code should render a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderStrategy {
    /// `<img>` pointing at the resource handle.
    ImageElement,
    /// Sandboxed frame fed with the text payload as its document.
    SandboxedFrame,
    /// Preformatted text block.
    TextBlock,
    /// Video player over the resource handle.
    VideoPlayer,
    /// Audio player over the resource handle.
    AudioPlayer,
    /// Document viewer embedding the content URL.
    DocumentEmbed,
    /// 3D model viewer over the resource handle.
    ModelViewer,
    /// Fixed placeholder naming the unsupported MIME type.
    UnsupportedPlaceholder,
    /// Transient placeholder while loading.
    LoadingPlaceholder,
    /// Generic content-unavailable placeholder.
    ErrorPlaceholder,
}

/// What a strategy reads its input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategySource {
    /// The snapshot's resource handle.
    ResourceHandle,
    /// The snapshot's text payload.
    TextPayload,
    /// The content API URL for the identifier.
    ContentUrl,
    /// Nothing; the strategy is self-contained.
    None,
}

impl RenderStrategy {
    /// Input the strategy consumes.
    #[must_use]
    pub const fn source(self) -> StrategySource {
        match self {
            Self::ImageElement | Self::VideoPlayer | Self::AudioPlayer | Self::ModelViewer => {
                StrategySource::ResourceHandle
            }
            Self::SandboxedFrame | Self::TextBlock => StrategySource::TextPayload,
            Self::DocumentEmbed => StrategySource::ContentUrl,
            Self::UnsupportedPlaceholder | Self::LoadingPlaceholder | Self::ErrorPlaceholder => {
                StrategySource::None
            }
        }
    }

    /// Returns true for placeholder strategies.
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        matches!(self.source(), StrategySource::None)
    }
}

/// Chooses a rendering strategy for every category.
pub struct RenderDispatcher;

impl RenderDispatcher {
    /// Strategy for `category`. Total over all categories.
    #[must_use]
    pub const fn strategy_for(category: RenderCategory) -> RenderStrategy {
        match category {
            RenderCategory::Image | RenderCategory::Svg => RenderStrategy::ImageElement,
            RenderCategory::SvgRecursive | RenderCategory::Html => RenderStrategy::SandboxedFrame,
            RenderCategory::Text => RenderStrategy::TextBlock,
            RenderCategory::Video => RenderStrategy::VideoPlayer,
            RenderCategory::Audio => RenderStrategy::AudioPlayer,
            RenderCategory::Pdf => RenderStrategy::DocumentEmbed,
            RenderCategory::Model => RenderStrategy::ModelViewer,
            RenderCategory::Unsupported => RenderStrategy::UnsupportedPlaceholder,
            RenderCategory::Loading => RenderStrategy::LoadingPlaceholder,
            RenderCategory::Error => RenderStrategy::ErrorPlaceholder,
        }
    }

    /// Message shown by placeholder strategies, `None` for content strategies.
    #[must_use]
    pub fn placeholder_message(content: &RenderableContent) -> Option<String> {
        match Self::strategy_for(content.category()) {
            RenderStrategy::UnsupportedPlaceholder => Some(format!(
                "Content type {} is not supported",
                content.raw_mime_type().unwrap_or("(unknown)")
            )),
            RenderStrategy::LoadingPlaceholder => Some("Loading…".to_string()),
            RenderStrategy::ErrorPlaceholder => Some("Content unavailable".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_strategy() {
        for category in RenderCategory::ALL {
            let strategy = RenderDispatcher::strategy_for(category);
            assert_eq!(
                strategy.is_placeholder(),
                matches!(
                    category,
                    RenderCategory::Unsupported | RenderCategory::Loading | RenderCategory::Error
                ),
                "{category} -> {strategy:?}"
            );
        }
    }

    #[test]
    fn test_strategy_sources_match_snapshot_fields() {
        for category in RenderCategory::ALL {
            match RenderDispatcher::strategy_for(category).source() {
                StrategySource::ResourceHandle => assert!(category.requires_resource_handle()),
                StrategySource::TextPayload => assert!(category.carries_text()),
                StrategySource::ContentUrl => assert_eq!(category, RenderCategory::Pdf),
                StrategySource::None => assert!(
                    !category.requires_resource_handle() && !category.carries_text()
                ),
            }
        }
    }

    #[test]
    fn test_recursive_svg_is_sandboxed() {
        assert_eq!(
            RenderDispatcher::strategy_for(RenderCategory::SvgRecursive),
            RenderStrategy::SandboxedFrame
        );
        assert_eq!(
            RenderDispatcher::strategy_for(RenderCategory::Svg),
            RenderStrategy::ImageElement
        );
    }

    #[test]
    fn test_unsupported_placeholder_names_mime() {
        let content = RenderableContent::classified(
            RenderCategory::Unsupported,
            None,
            None,
            Some("model/gltf-binary".to_string()),
        );
        assert_eq!(
            RenderDispatcher::placeholder_message(&content).as_deref(),
            Some("Content type model/gltf-binary is not supported")
        );
    }

    #[test]
    fn test_content_strategies_have_no_placeholder() {
        let content = RenderableContent::classified(
            RenderCategory::Text,
            None,
            Some("hi".to_string()),
            Some("text/plain".to_string()),
        );
        assert!(RenderDispatcher::placeholder_message(&content).is_none());
        assert!(RenderDispatcher::placeholder_message(&RenderableContent::error()).is_some());
    }
}
