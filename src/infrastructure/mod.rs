//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Content fetching and caching.
pub mod content;
/// Object URL lifetimes.
pub mod resources;

pub use config::{ApiConfig, AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use content::{CacheStats, CachedContentFetcher, HttpContentFetcher};
pub use resources::{ObjectUrlRegistry, ResourceStats};
