mod content_fetch_port;
mod resource_lifecycle_port;

pub use content_fetch_port::ContentFetchPort;
pub use resource_lifecycle_port::ResourceLifecyclePort;

#[cfg(test)]
pub use content_fetch_port::MockContentFetchPort;

#[cfg(test)]
pub mod mocks {
    pub use super::content_fetch_port::mock::ScriptedFetcher;
}
