use super::app_config::LogLevel;
use crate::domain::entities::InscriptionId;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "ordview",
    version,
    about = "Classify and preview inscription content by number",
    long_about = None,
    allow_negative_numbers = true
)]
pub struct CliArgs {
    /// Inscription numbers to load, in order.
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<InscriptionId>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the content API.
    #[arg(long, env = "ORDVIEW_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Substring marking an SVG as recursive.
    #[arg(long, value_name = "TEXT")]
    pub recursion_marker: Option<String>,

    /// Disable the in-memory content cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Print reports as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Include a base64 data URL for content with a resource handle.
    #[arg(long)]
    pub embed_data: bool,
}
