mod mime_classifier;
mod recursion_detector;
mod render_dispatcher;
mod text_decoder;

pub use mime_classifier::{MimeClassifier, mime_essence, mime_parameter};
pub use recursion_detector::{DEFAULT_RECURSION_MARKER, RecursionDetector};
pub use render_dispatcher::{RenderDispatcher, RenderStrategy, StrategySource};
pub use text_decoder::TextDecoder;
