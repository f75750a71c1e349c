//! Content classification pipeline.
//!
//! One pipeline instance serves one consumer. Each identifier change issues a
//! new [`RequestToken`]; a load only becomes visible if its token is still the
//! newest when it finishes. Snapshots are delivered in order over an unbounded
//! channel: `loading` first, then exactly one terminal snapshot per token.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::domain::entities::{
    ContentSnapshot, InscriptionId, RawPayload, RenderCategory, RenderableContent, RequestToken,
    ResourceHandle,
};
use crate::domain::errors::ContentError;
use crate::domain::ports::{ContentFetchPort, ResourceLifecyclePort};
use crate::domain::services::{MimeClassifier, RecursionDetector, TextDecoder};

/// Message sent whenever the visible snapshot changes.
#[derive(Debug, Clone)]
pub struct ContentEvent {
    /// The new visible snapshot.
    pub snapshot: ContentSnapshot,
}

/// Orchestrates fetch, classification, recursion detection and handle
/// acquisition for a single consumer.
pub struct ContentPipeline {
    fetcher: Arc<dyn ContentFetchPort>,
    resources: Arc<dyn ResourceLifecyclePort>,
    detector: RecursionDetector,
    shared: Arc<Mutex<PipelineShared>>,
    event_tx: mpsc::UnboundedSender<ContentEvent>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// State mutated only while holding the lock, never across an await.
#[derive(Default)]
struct PipelineShared {
    token: RequestToken,
    current: Option<ContentSnapshot>,
    /// Handle referenced by `current`, if any.
    displayed: Option<ResourceHandle>,
    /// Previous handle, released once the next terminal snapshot is visible.
    retiring: Option<ResourceHandle>,
}

/// Outcome of the asynchronous part of a load.
enum Resolution {
    Classified {
        payload: RawPayload,
        category: RenderCategory,
        text: Option<String>,
    },
    Failed(ContentError),
    Superseded,
}

impl std::fmt::Debug for ContentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let in_flight = self.in_flight();
        let shared = self.shared.lock();
        f.debug_struct("ContentPipeline")
            .field("token", &shared.token)
            .field("current", &shared.current)
            .field("in_flight", &in_flight)
            .finish_non_exhaustive()
    }
}

impl ContentPipeline {
    /// Creates an idle pipeline. Snapshots are sent to `event_tx`.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ContentFetchPort>,
        resources: Arc<dyn ResourceLifecyclePort>,
        detector: RecursionDetector,
        event_tx: mpsc::UnboundedSender<ContentEvent>,
    ) -> Self {
        Self {
            fetcher,
            resources,
            detector,
            shared: Arc::new(Mutex::new(PipelineShared::default())),
            event_tx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Switches the consumer to `id` and starts loading it.
    ///
    /// Emits `loading` synchronously, before returning. Requesting the
    /// identifier that is already loading or displayed is a no-op; a previous
    /// `error` for the same identifier is retried.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn load(&self, id: InscriptionId) -> RequestToken {
        let token = {
            let mut shared = self.shared.lock();

            if let Some(current) = &shared.current
                && current.id == id
                && current.content.category() != RenderCategory::Error
            {
                trace!(id = %id, token = %current.token, "Identifier unchanged, keeping current load");
                return current.token;
            }

            shared.token = shared.token.next();
            let token = shared.token;

            // The previous handle stays alive until a new terminal snapshot replaces it.
            if let Some(previous) = shared.displayed.take()
                && let Some(stale) = shared.retiring.replace(previous)
            {
                self.resources.release(&stale);
            }

            let snapshot = ContentSnapshot::new(id, token, RenderableContent::loading());
            shared.current = Some(snapshot.clone());
            send(&self.event_tx, snapshot);

            debug!(id = %id, token = %token, "Loading inscription content");
            token
        };

        let job = LoadJob {
            fetcher: self.fetcher.clone(),
            resources: self.resources.clone(),
            detector: self.detector.clone(),
            shared: self.shared.clone(),
            event_tx: self.event_tx.clone(),
        };

        let handle = tokio::spawn(job.run(id, token));
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);

        token
    }

    /// Currently visible snapshot, or `None` while idle.
    #[must_use]
    pub fn current(&self) -> Option<ContentSnapshot> {
        self.shared.lock().current.clone()
    }

    /// Number of loads still running, including superseded ones.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Returns to idle: invalidates in-flight loads, aborts their tasks and
    /// releases every handle the pipeline holds. Safe to call repeatedly.
    pub fn reset(&self) {
        let (displayed, retiring) = {
            let mut shared = self.shared.lock();
            shared.token = shared.token.next();
            shared.current = None;
            (shared.displayed.take(), shared.retiring.take())
        };

        for task in self.tasks.lock().drain(..) {
            task.abort();
        }

        for handle in [retiring, displayed].into_iter().flatten() {
            self.resources.release(&handle);
        }

        debug!("Content pipeline reset");
    }
}

impl Drop for ContentPipeline {
    fn drop(&mut self) {
        self.reset();
    }
}

/// Everything a spawned load needs, detached from the pipeline's lifetime.
struct LoadJob {
    fetcher: Arc<dyn ContentFetchPort>,
    resources: Arc<dyn ResourceLifecyclePort>,
    detector: RecursionDetector,
    shared: Arc<Mutex<PipelineShared>>,
    event_tx: mpsc::UnboundedSender<ContentEvent>,
}

impl LoadJob {
    async fn run(self, id: InscriptionId, token: RequestToken) {
        let resolution = self.resolve(id, token).await;
        self.commit(id, token, resolution);
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.shared.lock().token == token
    }

    async fn resolve(&self, id: InscriptionId, token: RequestToken) -> Resolution {
        let payload = match self.fetcher.fetch(id).await {
            Ok(payload) => payload,
            Err(e) => return Resolution::Failed(e),
        };

        if !self.is_current(token) {
            return Resolution::Superseded;
        }

        let category = MimeClassifier::classify(payload.content_type());
        debug!(id = %id, token = %token, category = %category, len = payload.len(), "Content classified");

        if !category.is_text_like() {
            return Resolution::Classified {
                payload,
                category,
                text: None,
            };
        }

        let text = match decode_text(&payload).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to decode text payload");
                None
            }
        };

        let category = match &text {
            Some(text) => self.detector.detect(category, text),
            None => category,
        };

        Resolution::Classified {
            payload,
            category,
            text,
        }
    }

    /// Installs the result if `token` is still current. Handles are acquired
    /// here, under the lock, so superseded loads never create one.
    fn commit(&self, id: InscriptionId, token: RequestToken, resolution: Resolution) {
        let mut shared = self.shared.lock();
        if shared.token != token {
            debug!(id = %id, token = %token, current = %shared.token, "Discarding stale result");
            return;
        }

        let content = match resolution {
            Resolution::Superseded => return,
            Resolution::Failed(e) => {
                warn!(id = %id, token = %token, error = %e, "Content unavailable");
                RenderableContent::error()
            }
            Resolution::Classified {
                payload,
                category,
                text,
            } => {
                let handle = category
                    .requires_resource_handle()
                    .then(|| self.resources.acquire(&payload));
                RenderableContent::classified(
                    category,
                    handle,
                    text,
                    payload.content_type().map(String::from),
                )
            }
        };

        debug!(id = %id, token = %token, category = %content.category(), "Content ready");

        shared.displayed = content.resource_handle().cloned();
        let snapshot = ContentSnapshot::new(id, token, content);
        shared.current = Some(snapshot.clone());
        send(&self.event_tx, snapshot);

        if let Some(previous) = shared.retiring.take() {
            self.resources.release(&previous);
        }
    }
}

async fn decode_text(payload: &RawPayload) -> Result<String, ContentError> {
    let bytes = payload.bytes().clone();
    let content_type = payload.content_type().map(String::from);

    tokio::task::spawn_blocking(move || TextDecoder::decode(&bytes, content_type.as_deref()))
        .await
        .map_err(|e| ContentError::decode("utf-8", format!("decode task panicked: {e}")))?
}

fn send(event_tx: &mpsc::UnboundedSender<ContentEvent>, snapshot: ContentSnapshot) {
    if event_tx.send(ContentEvent { snapshot }).is_err() {
        trace!("Content event receiver dropped");
    }
}
