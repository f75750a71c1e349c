//! Resource handle lifetimes.

pub mod object_urls;

pub use object_urls::{OBJECT_URL_PREFIX, ObjectUrlRegistry, ResourceStats};
