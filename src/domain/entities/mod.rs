//! Domain entity definitions.

mod inscription;
mod render_category;
mod renderable;
mod resource_handle;

pub use inscription::{InscriptionId, RawPayload};
pub use render_category::RenderCategory;
pub use renderable::{ContentSnapshot, RenderableContent, RequestToken};
pub use resource_handle::ResourceHandle;
