use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mastorelay::application::{
    ImageOptimizer, PublishPostUseCase, ResolveTokenUseCase, TokenSource,
};
use mastorelay::domain::entities::Post;
use mastorelay::domain::ports::TokenStoragePort;
use mastorelay::domain::services::compose_caption;
use mastorelay::infrastructure::{
    AppConfig, CliArgs, CwebpCompressor, HttpImageFetcher, KeyringTokenStorage, MastodonClient,
    StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

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
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn read_post(path: Option<&Path>) -> Result<Post> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read post from {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin())
            .wrap_err("failed to read post from stdin")?,
    };

    serde_json::from_str(&raw).wrap_err("post is not valid JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = mastorelay::VERSION, "Starting Mastorelay");

    let post = read_post(args.post.as_deref())?;

    if args.dry_run {
        println!("{}", compose_caption(&post, &config.hashtags));
        let urls = post.attachment_urls(&config.attachment_delimiter);
        info!(attachments = urls.len(), "Dry run, nothing uploaded");
        return Ok(());
    }

    let instance_url = config
        .instance_url
        .clone()
        .ok_or_else(|| eyre!("no instance URL configured; pass --instance-url"))?;

    let token_storage = Arc::new(KeyringTokenStorage::for_instance(&instance_url));
    let resolved = ResolveTokenUseCase::new(token_storage.clone())
        .execute(args.token.clone())
        .await
        .wrap_err("no usable access token; pass --token or store one in the keyring")?;

    if args.store_token && resolved.source == TokenSource::CommandLine {
        match token_storage.store_token(&resolved.token).await {
            Ok(()) => info!("Access token saved to system keyring"),
            Err(e) => warn!(error = %e, "Could not save access token"),
        }
    }

    let platform = Arc::new(MastodonClient::with_timeout(
        instance_url,
        resolved.token,
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
    let compressor = Arc::new(CwebpCompressor::new(&config.compressor));
    let optimizer = ImageOptimizer::new(compressor, config.optimizer_settings());

    let use_case = PublishPostUseCase::new(fetcher, optimizer, platform, config.publish_options());
    let outcome = use_case.execute_with_report(&post).await?;

    let skipped = outcome.skipped_count();
    if skipped > 0 {
        warn!(skipped, "Some attachments were skipped");
    }
    info!(status = %outcome.status.id, "Status published");
    println!("{}", outcome.status.link());

    Ok(())
}
