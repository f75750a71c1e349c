//! Domain error types.

mod content_error;

pub use content_error::ContentError;
