//! Object URL registry backing resource handles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::domain::entities::{InscriptionId, RawPayload, ResourceHandle};
use crate::domain::ports::ResourceLifecyclePort;

/// Scheme prefix of every URL handed out by the registry.
pub const OBJECT_URL_PREFIX: &str = "blob:ordview/";

/// Creates and revokes object URLs over payload bytes.
///
/// Each pipeline owns its own registry, so handles are never shared between
/// consumers.
#[derive(Default)]
pub struct ObjectUrlRegistry {
    live: Mutex<HashMap<String, InscriptionId>>,
    acquired: AtomicU64,
    released: AtomicU64,
}

impl ObjectUrlRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns acquisition statistics.
    #[must_use]
    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            acquired: self.acquired.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            live: self.live.lock().len(),
        }
    }

    /// Returns true if `url` is currently live.
    #[must_use]
    pub fn is_live(&self, url: &str) -> bool {
        self.live.lock().contains_key(url)
    }
}

impl std::fmt::Debug for ObjectUrlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectUrlRegistry")
            .field("stats", &self.stats())
            .finish()
    }
}

impl ResourceLifecyclePort for ObjectUrlRegistry {
    fn acquire(&self, payload: &RawPayload) -> ResourceHandle {
        let url = format!("{OBJECT_URL_PREFIX}{}", Uuid::new_v4());
        let handle = ResourceHandle::new(url.clone(), payload);

        self.live.lock().insert(url, payload.id());
        self.acquired.fetch_add(1, Ordering::Relaxed);
        debug!(id = %payload.id(), url = %handle.url(), len = payload.len(), "Created object URL");

        handle
    }

    fn release(&self, handle: &ResourceHandle) {
        if !handle.revoke() {
            trace!(url = %handle.url(), "Object URL already revoked");
            return;
        }

        self.live.lock().remove(handle.url());
        self.released.fetch_add(1, Ordering::Relaxed);
        debug!(id = %handle.id(), url = %handle.url(), "Revoked object URL");
    }
}

/// Counters describing handle lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceStats {
    /// Handles created.
    pub acquired: u64,
    /// Handles revoked.
    pub released: u64,
    /// Handles currently live.
    pub live: usize,
}

impl std::fmt::Display for ResourceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object URLs: {} live ({} acquired, {} released)",
            self.live, self.acquired, self.released
        )
    }
}
