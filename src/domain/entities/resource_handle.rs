//! Revocable object references over fetched payload bytes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Serialize, Serializer};

use super::inscription::{InscriptionId, RawPayload};

/// Reference-counted handle to a payload's bytes, addressed by an object URL.
///
/// Clones share the same underlying reference. Once revoked, the bytes are no
/// longer reachable through any clone.
#[derive(Clone)]
pub struct ResourceHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    url: String,
    id: InscriptionId,
    content_type: Option<String>,
    bytes: Bytes,
    revoked: AtomicBool,
}

impl ResourceHandle {
    /// Creates a live handle over `payload` reachable at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>, payload: &RawPayload) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                url: url.into(),
                id: payload.id(),
                content_type: payload.content_type().map(String::from),
                bytes: payload.bytes().clone(),
                revoked: AtomicBool::new(false),
            }),
        }
    }

    /// Object URL of this handle.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Identifier the payload belongs to.
    #[must_use]
    pub fn id(&self) -> InscriptionId {
        self.inner.id
    }

    /// Returns true once the handle has been revoked.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.inner.revoked.load(Ordering::Acquire)
    }

    /// Bytes behind the handle, or `None` after revocation.
    #[must_use]
    pub fn bytes(&self) -> Option<Bytes> {
        (!self.is_revoked()).then(|| self.inner.bytes.clone())
    }

    /// Encodes the payload as a `data:` URL, or `None` after revocation.
    #[must_use]
    pub fn to_data_url(&self) -> Option<String> {
        let bytes = self.bytes()?;
        let mime = self
            .inner
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        Some(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
    }

    /// Marks the handle revoked. Returns true only for the call that revoked it.
    pub fn revoke(&self) -> bool {
        !self.inner.revoked.swap(true, Ordering::AcqRel)
    }

    /// Returns true if both handles refer to the same object reference.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for ResourceHandle {}

impl std::fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("url", &self.inner.url)
            .field("id", &self.inner.id)
            .field("len", &self.inner.bytes.len())
            .field("revoked", &self.is_revoked())
            .finish()
    }
}

impl Serialize for ResourceHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.url())
    }
}
