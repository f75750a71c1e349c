//! Application layer orchestrating domain services over ports.

/// Pipeline services.
pub mod services;

pub use services::{ContentEvent, ContentPipeline};
