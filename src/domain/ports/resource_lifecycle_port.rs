//! Port definition for object reference lifetimes.

use crate::domain::entities::{RawPayload, ResourceHandle};

/// Port creating and revoking object references over payload bytes.
pub trait ResourceLifecyclePort: Send + Sync {
    /// Creates exactly one new object reference for `payload`.
    fn acquire(&self, payload: &RawPayload) -> ResourceHandle;

    /// Revokes `handle`. Releasing an already released handle is a no-op.
    fn release(&self, handle: &ResourceHandle);
}
