//! Snapshots handed to presentation code.

use serde::Serialize;

use super::inscription::InscriptionId;
use super::render_category::RenderCategory;
use super::resource_handle::ResourceHandle;

/// Immutable view of classified content.
///
/// A resource handle is present only for categories that need an object
/// reference, and a text payload only for text-bearing categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderableContent {
    category: RenderCategory,
    resource_handle: Option<ResourceHandle>,
    text_payload: Option<String>,
    raw_mime_type: Option<String>,
}

impl RenderableContent {
    /// Placeholder shown while content is in flight.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            category: RenderCategory::Loading,
            resource_handle: None,
            text_payload: None,
            raw_mime_type: None,
        }
    }

    /// Placeholder shown when content could not be fetched.
    #[must_use]
    pub const fn error() -> Self {
        Self {
            category: RenderCategory::Error,
            resource_handle: None,
            text_payload: None,
            raw_mime_type: None,
        }
    }

    /// Builds a classified snapshot, dropping any field the category does not carry.
    #[must_use]
    pub fn classified(
        category: RenderCategory,
        resource_handle: Option<ResourceHandle>,
        text_payload: Option<String>,
        raw_mime_type: Option<String>,
    ) -> Self {
        Self {
            category,
            resource_handle: resource_handle.filter(|_| category.requires_resource_handle()),
            text_payload: text_payload.filter(|_| category.carries_text()),
            raw_mime_type,
        }
    }

    /// Render category.
    #[must_use]
    pub const fn category(&self) -> RenderCategory {
        self.category
    }

    /// Object reference to the raw bytes, if the category needs one.
    #[must_use]
    pub const fn resource_handle(&self) -> Option<&ResourceHandle> {
        self.resource_handle.as_ref()
    }

    /// Decoded text, if the category carries text and decoding succeeded.
    #[must_use]
    pub fn text_payload(&self) -> Option<&str> {
        self.text_payload.as_deref()
    }

    /// MIME string reported by the content API.
    #[must_use]
    pub fn raw_mime_type(&self) -> Option<&str> {
        self.raw_mime_type.as_deref()
    }

    /// Returns true for any state other than `loading`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self.category, RenderCategory::Loading)
    }
}

/// Monotonic tag issued each time a consumer switches identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Returns the token following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A `RenderableContent` tagged with the request it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSnapshot {
    /// Identifier being displayed.
    pub id: InscriptionId,
    /// Request that produced this snapshot.
    pub token: RequestToken,
    /// Visible content.
    pub content: RenderableContent,
}

impl ContentSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(id: InscriptionId, token: RequestToken, content: RenderableContent) -> Self {
        Self { id, token, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RawPayload;

    fn handle() -> ResourceHandle {
        let payload = RawPayload::new(InscriptionId::new(1), vec![1, 2, 3], None);
        ResourceHandle::new("blob:test/h", &payload)
    }

    #[test]
    fn test_classified_drops_fields_the_category_does_not_carry() {
        let html = RenderableContent::classified(
            RenderCategory::Html,
            Some(handle()),
            Some("<p>hi</p>".to_string()),
            Some("text/html".to_string()),
        );
        assert!(html.resource_handle().is_none());
        assert_eq!(html.text_payload(), Some("<p>hi</p>"));

        let image = RenderableContent::classified(
            RenderCategory::Image,
            Some(handle()),
            Some("ignored".to_string()),
            Some("image/png".to_string()),
        );
        assert!(image.resource_handle().is_some());
        assert!(image.text_payload().is_none());

        let pdf = RenderableContent::classified(
            RenderCategory::Pdf,
            Some(handle()),
            Some("ignored".to_string()),
            Some("application/pdf".to_string()),
        );
        assert!(pdf.resource_handle().is_none());
        assert!(pdf.text_payload().is_none());
    }

    #[test]
    fn test_placeholders() {
        assert!(!RenderableContent::loading().is_terminal());
        assert!(RenderableContent::error().is_terminal());
        assert_eq!(RenderableContent::error().category(), RenderCategory::Error);
    }

    #[test]
    fn test_tokens_increase() {
        let first = RequestToken::default().next();
        assert!(first.next() > first);
        assert_eq!(first.to_string(), "#1");
    }
}
