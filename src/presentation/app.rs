//! Command-line consumer of the content pipeline.

use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{ContentEvent, ContentPipeline};
use crate::domain::entities::{ContentSnapshot, InscriptionId, RequestToken};
use crate::domain::ports::{ContentFetchPort, ResourceLifecyclePort};
use crate::domain::services::RecursionDetector;

use super::report::ContentReport;

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// One JSON object per line instead of a summary line.
    pub json: bool,
    /// Include `data:` URLs for resource handles.
    pub embed_data: bool,
}

/// Loads identifiers one after another and prints a report for each.
pub struct App {
    pipeline: ContentPipeline,
    events: mpsc::UnboundedReceiver<ContentEvent>,
    fetcher: Arc<dyn ContentFetchPort>,
    options: OutputOptions,
}

impl App {
    /// Wires a pipeline over `fetcher` and `resources`.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ContentFetchPort>,
        resources: Arc<dyn ResourceLifecyclePort>,
        detector: RecursionDetector,
        options: OutputOptions,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let pipeline = ContentPipeline::new(fetcher.clone(), resources, detector, tx);
        Self {
            pipeline,
            events: rx,
            fetcher,
            options,
        }
    }

    /// Runs every identifier to a terminal snapshot, writing one report per id.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub async fn run<W: Write>(
        &mut self,
        ids: &[InscriptionId],
        out: &mut W,
    ) -> color_eyre::Result<Vec<ContentReport>> {
        let mut reports = Vec::with_capacity(ids.len());

        for &id in ids {
            let token = self.pipeline.load(id);
            let Some(snapshot) = self.wait_for_terminal(token).await else {
                break;
            };

            let report = ContentReport::new(
                &snapshot,
                self.fetcher.content_url(id),
                self.options.embed_data,
            );
            info!(id = %id, category = %report.category, "Rendered inscription");

            if self.options.json {
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{report}")?;
            }
            reports.push(report);
        }

        Ok(reports)
    }

    /// Releases every handle the pipeline still holds.
    pub fn shutdown(&self) {
        self.pipeline.reset();
    }

    async fn wait_for_terminal(&mut self, token: RequestToken) -> Option<ContentSnapshot> {
        // Same-id loads are no-ops and emit nothing.
        if let Some(current) = self.pipeline.current()
            && current.token == token
            && current.content.is_terminal()
        {
            return Some(current);
        }

        while let Some(event) = self.events.recv().await {
            let snapshot = event.snapshot;
            if snapshot.token != token {
                debug!(token = %snapshot.token, "Skipping superseded snapshot");
                continue;
            }
            if snapshot.content.is_terminal() {
                return Some(snapshot);
            }
        }
        None
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("pipeline", &self.pipeline)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RenderCategory;
    use crate::domain::ports::mocks::ScriptedFetcher;
    use crate::infrastructure::resources::ObjectUrlRegistry;

    fn app(fetcher: Arc<ScriptedFetcher>, options: OutputOptions) -> (App, Arc<ObjectUrlRegistry>) {
        let registry = Arc::new(ObjectUrlRegistry::new());
        let app = App::new(fetcher, registry.clone(), RecursionDetector::default(), options);
        (app, registry)
    }

    #[tokio::test]
    async fn test_reports_each_id_in_order() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(1, Some("image/png"), b"PNG");
        fetcher.respond(2, Some("text/plain"), b"hello");
        fetcher.fail(3, "not found");

        let (mut app, registry) = app(fetcher, OutputOptions::default());
        let mut out = Vec::new();
        let ids = [1, 2, 3].map(InscriptionId::new);
        let reports = app.run(&ids, &mut out).await.unwrap();

        let categories: Vec<_> = reports.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            [RenderCategory::Image, RenderCategory::Text, RenderCategory::Error]
        );
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 3);
        assert!(printed.contains("\"hello\""));

        app.shutdown();
        assert_eq!(registry.stats().live, 0);
    }

    #[tokio::test]
    async fn test_repeated_id_reports_current_snapshot() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(4, Some("text/html"), b"<p>x</p>");

        let (mut app, _) = app(fetcher.clone(), OutputOptions::default());
        let ids = [4, 4].map(InscriptionId::new);
        let reports = app.run(&ids, &mut Vec::new()).await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], reports[1]);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_json_output() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(5, Some("image/png"), b"PNG");

        let options = OutputOptions {
            json: true,
            embed_data: true,
        };
        let (mut app, _) = app(fetcher, options);
        let mut out = Vec::new();
        app.run(&[InscriptionId::new(5)], &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["category"], "image");
        assert_eq!(value["data_url"], "data:image/png;base64,UE5H");
    }
}
