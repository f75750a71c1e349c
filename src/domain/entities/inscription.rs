//! Inscription identifiers and fetched payloads.

use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Numeric inscription number identifying a piece of content.
/// Cursed inscriptions carry negative numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InscriptionId(i64);

impl InscriptionId {
    /// Creates an identifier from an inscription number.
    #[must_use]
    pub const fn new(number: i64) -> Self {
        Self(number)
    }

    /// Returns the inscription number.
    #[must_use]
    pub const fn number(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for InscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for InscriptionId {
    fn from(number: i64) -> Self {
        Self::new(number)
    }
}

impl FromStr for InscriptionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// Bytes returned by the content API together with the declared MIME type.
///
/// The payload is immutable once created; cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    id: InscriptionId,
    bytes: Bytes,
    content_type: Option<String>,
}

impl RawPayload {
    /// Creates a payload for `id`.
    #[must_use]
    pub fn new(id: InscriptionId, bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            id,
            bytes: bytes.into(),
            content_type,
        }
    }

    /// Identifier this payload was fetched for.
    #[must_use]
    pub const fn id(&self) -> InscriptionId {
        self.id
    }

    /// Raw body bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// MIME string exactly as reported by the transport layer.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
