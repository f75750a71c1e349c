//! Content pipeline error types.

use thiserror::Error;

/// Failures raised while loading inscription content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ContentError {
    #[error("failed to fetch content: {message}")]
    Fetch { message: String },

    #[error("failed to decode content as {encoding}: {message}")]
    Decode { encoding: String, message: String },
}

impl ContentError {
    /// Creates fetch failure.
    #[must_use]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Creates decode failure.
    #[must_use]
    pub fn decode(encoding: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            encoding: encoding.into(),
            message: message.into(),
        }
    }

    /// Returns whether the network or transport failed.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Returns whether bytes could not be turned into text.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
