//! Printable description of a snapshot and its render strategy.

use serde::Serialize;

use crate::domain::entities::{ContentSnapshot, InscriptionId, RenderCategory, RequestToken};
use crate::domain::services::{RenderDispatcher, RenderStrategy, StrategySource};

/// Characters of text payload shown in a report.
pub const TEXT_PREVIEW_CHARS: usize = 80;

/// What presentation code would render for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentReport {
    /// Inscription number.
    pub id: InscriptionId,
    /// Request that produced the snapshot.
    pub token: RequestToken,
    /// Classified category.
    pub category: RenderCategory,
    /// Strategy chosen for the category.
    pub strategy: RenderStrategy,
    /// Input the strategy reads.
    pub source: StrategySource,
    /// Reported MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Object URL of the resource handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_url: Option<String>,
    /// Inline copy of the handle's bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    /// Remote URL for embed strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    /// Leading characters of the text payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
    /// Placeholder message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContentReport {
    /// Builds a report. `content_url` is only kept for strategies that embed it.
    #[must_use]
    pub fn new(snapshot: &ContentSnapshot, content_url: Option<String>, embed_data: bool) -> Self {
        let content = &snapshot.content;
        let strategy = RenderDispatcher::strategy_for(content.category());
        let handle = content.resource_handle();

        Self {
            id: snapshot.id,
            token: snapshot.token,
            category: content.category(),
            strategy,
            source: strategy.source(),
            mime: content.raw_mime_type().map(String::from),
            object_url: handle.map(|h| h.url().to_string()),
            data_url: handle.filter(|_| embed_data).and_then(|h| h.to_data_url()),
            content_url: content_url.filter(|_| strategy.source() == StrategySource::ContentUrl),
            text_preview: content.text_payload().map(preview),
            message: RenderDispatcher::placeholder_message(content),
        }
    }
}

impl std::fmt::Display for ContentReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} via {:?}",
            self.id, self.token, self.category, self.strategy
        )?;
        if let Some(mime) = &self.mime {
            write!(f, " [{mime}]")?;
        }
        if let Some(url) = self.content_url.as_ref().or(self.object_url.as_ref()) {
            write!(f, " {url}")?;
        }
        if let Some(text) = &self.text_preview {
            write!(f, " {text:?}")?;
        }
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
    if text.chars().nth(TEXT_PREVIEW_CHARS).is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RawPayload, RenderableContent, ResourceHandle};

    fn snapshot(content: RenderableContent) -> ContentSnapshot {
        ContentSnapshot::new(InscriptionId::new(11), RequestToken::default().next(), content)
    }

    #[test]
    fn test_image_report_uses_object_url() {
        let payload = RawPayload::new(
            InscriptionId::new(11),
            b"GIF".to_vec(),
            Some("image/gif".into()),
        );
        let handle = ResourceHandle::new("blob:ordview/x", &payload);
        let content = RenderableContent::classified(
            RenderCategory::Image,
            Some(handle),
            None,
            Some("image/gif".into()),
        );

        let report = ContentReport::new(&snapshot(content), Some("https://x/11".into()), true);

        assert_eq!(report.strategy, RenderStrategy::ImageElement);
        assert_eq!(report.object_url.as_deref(), Some("blob:ordview/x"));
        assert_eq!(report.data_url.as_deref(), Some("data:image/gif;base64,R0lG"));
        assert!(report.content_url.is_none());
        assert_eq!(
            report.to_string(),
            "11 #1: image via ImageElement [image/gif] blob:ordview/x"
        );
    }

    #[test]
    fn test_pdf_report_keeps_content_url() {
        let content = RenderableContent::classified(
            RenderCategory::Pdf,
            None,
            None,
            Some("application/pdf".into()),
        );
        let report = ContentReport::new(&snapshot(content), Some("https://x/11".into()), false);

        assert_eq!(report.source, StrategySource::ContentUrl);
        assert_eq!(report.content_url.as_deref(), Some("https://x/11"));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "a".repeat(TEXT_PREVIEW_CHARS + 10);
        let content = RenderableContent::classified(
            RenderCategory::Text,
            None,
            Some(text),
            Some("text/plain".into()),
        );
        let report = ContentReport::new(&snapshot(content), None, false);

        let preview = report.text_preview.unwrap();
        assert_eq!(preview.chars().count(), TEXT_PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_json_shape() {
        let report = ContentReport::new(&snapshot(RenderableContent::error()), None, false);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["category"], "error");
        assert_eq!(json["strategy"], "error-placeholder");
        assert_eq!(json["message"], "Content unavailable");
        assert!(json.get("object_url").is_none());
    }
}
