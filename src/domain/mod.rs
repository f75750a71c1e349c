//! Domain layer with core entities, port definitions and pure services.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Classification, detection and dispatch services.
pub mod services;

pub use entities::{
    ContentSnapshot, InscriptionId, RawPayload, RenderCategory, RenderableContent, RequestToken,
    ResourceHandle,
};
pub use errors::ContentError;
pub use ports::{ContentFetchPort, ResourceLifecyclePort};
pub use services::{MimeClassifier, RecursionDetector, RenderDispatcher, RenderStrategy};
