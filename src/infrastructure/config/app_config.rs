//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::domain::services::DEFAULT_RECURSION_MARKER;
use crate::infrastructure::content::memory_cache::DEFAULT_CACHE_SIZE;

pub(crate) const APP_NAME: &str = "ordview";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

const DEFAULT_BASE_URL: &str = "https://ordinals.com";
const DEFAULT_CONTENT_PATH: &str = "/content-by-id/{id}";
const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Content API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Classification pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Content cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Content API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the content-serving API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path template; `{id}` is replaced with the inscription number.
    #[serde(default = "default_content_path")]
    pub content_path: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Largest accepted body; bigger payloads fail the fetch.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            content_path: default_content_path(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

/// Classification pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Substring marking an SVG as embedding content through the API.
    #[serde(default = "default_recursion_marker")]
    pub recursion_marker: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recursion_marker: default_recursion_marker(),
        }
    }
}

/// Content cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache fetched payloads in memory.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached payloads.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_content_path() -> String {
    DEFAULT_CONTENT_PATH.to_string()
}

fn default_user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_payload_bytes() -> u64 {
    DEFAULT_MAX_PAYLOAD_BYTES
}

fn default_recursion_marker() -> String {
    DEFAULT_RECURSION_MARKER.to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_SIZE
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api.base_url.clone_from(api_url);
        }
        if let Some(timeout) = args.timeout {
            self.api.request_timeout_secs = Some(timeout);
        }
        if let Some(marker) = &args.recursion_marker {
            self.pipeline.recursion_marker.clone_from(marker);
        }
        if args.no_cache {
            self.cache.enabled = false;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("ordview.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            pipeline: PipelineConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
