use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ordview::domain::ports::ContentFetchPort;
use ordview::domain::services::RecursionDetector;
use ordview::infrastructure::{
    AppConfig, CachedContentFetcher, CliArgs, HttpContentFetcher, ObjectUrlRegistry,
    StorageManager,
};
use ordview::presentation::{App, OutputOptions};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = ordview::VERSION, "Starting {}", ordview::NAME);

    let http: Arc<dyn ContentFetchPort> = Arc::new(HttpContentFetcher::new(&config.api)?);
    let cache = config
        .cache
        .enabled
        .then(|| Arc::new(CachedContentFetcher::new(http.clone(), config.cache.capacity)));
    let fetcher: Arc<dyn ContentFetchPort> = match &cache {
        Some(cache) => cache.clone(),
        None => http,
    };

    let registry = Arc::new(ObjectUrlRegistry::new());
    let detector = RecursionDetector::new(config.pipeline.recursion_marker.clone());
    let options = OutputOptions {
        json: args.json,
        embed_data: args.embed_data,
    };

    let mut app = App::new(fetcher, registry.clone(), detector, options);
    let result = app.run(&args.ids, &mut std::io::stdout().lock()).await;
    app.shutdown();

    info!(stats = %registry.stats(), "Released object URLs");
    if let Some(cache) = &cache {
        info!(stats = %cache.stats(), "Content cache");
    }

    result.map(|_| ())
}
