//! Ordview - inscription content classification and rendering pipeline.
//!
//! This crate fetches inscription payloads, classifies them by MIME type,
//! detects recursive SVG documents and hands presentation code immutable,
//! token-tagged snapshots together with the object handles they reference.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the content pipeline.
pub mod application;
/// Domain layer containing entities, errors, ports and pure services.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing report rendering.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "ordview";
