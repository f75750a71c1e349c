//! Port definition for fetching inscription content.

use async_trait::async_trait;

use crate::domain::entities::{InscriptionId, RawPayload};
use crate::domain::errors::ContentError;

/// Port for retrieving raw content by inscription number.
///
/// Implementations are stateless with respect to which identifier is current;
/// discarding late results is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentFetchPort: Send + Sync {
    /// Fetches the full body and declared MIME type for `id`.
    async fn fetch(&self, id: InscriptionId) -> Result<RawPayload, ContentError>;

    /// Absolute URL the content is served from, if the adapter has one.
    fn content_url(&self, _id: InscriptionId) -> Option<String> {
        None
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use tokio::sync::Semaphore;

    /// Fetcher returning canned responses, with per-id gates to control
    /// completion order.
    #[derive(Default)]
    pub struct ScriptedFetcher {
        responses: Mutex<HashMap<InscriptionId, Result<RawPayload, ContentError>>>,
        gates: Mutex<HashMap<InscriptionId, Arc<Semaphore>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        /// Creates a fetcher with no scripted responses.
        pub fn new() -> Self {
            Self::default()
        }

        /// Scripts a successful response.
        pub fn respond(&self, id: i64, content_type: Option<&str>, body: &[u8]) {
            let id = InscriptionId::new(id);
            let payload = RawPayload::new(id, body.to_vec(), content_type.map(String::from));
            self.responses.lock().insert(id, Ok(payload));
        }

        /// Scripts a failed response.
        pub fn fail(&self, id: i64, message: &str) {
            self.responses
                .lock()
                .insert(InscriptionId::new(id), Err(ContentError::fetch(message)));
        }

        /// Blocks fetches of `id` until `open` is called.
        pub fn hold(&self, id: i64) {
            self.gates
                .lock()
                .insert(InscriptionId::new(id), Arc::new(Semaphore::new(0)));
        }

        /// Lets held fetches of `id` complete.
        pub fn open(&self, id: i64) {
            if let Some(gate) = self.gates.lock().get(&InscriptionId::new(id)) {
                gate.add_permits(Semaphore::MAX_PERMITS / 2);
            }
        }

        /// Number of fetch calls made so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentFetchPort for ScriptedFetcher {
        async fn fetch(&self, id: InscriptionId) -> Result<RawPayload, ContentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let gate = self.gates.lock().get(&id).cloned();
            if let Some(gate) = gate {
                let _permit = gate.acquire().await;
            }

            self.responses
                .lock()
                .get(&id)
                .cloned()
                .unwrap_or_else(|| Err(ContentError::fetch(format!("no content for {id}"))))
        }
    }
}
