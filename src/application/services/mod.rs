mod content_pipeline;

pub use content_pipeline::{ContentEvent, ContentPipeline};
