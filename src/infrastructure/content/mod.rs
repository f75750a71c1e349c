//! Content retrieval adapters.
//!
//! This module provides:
//! - HTTP fetching from the content-by-id API
//! - An LRU cache decorator for any fetcher

pub mod http_fetcher;
pub mod memory_cache;

pub use http_fetcher::HttpContentFetcher;
pub use memory_cache::{CacheStats, CachedContentFetcher};
