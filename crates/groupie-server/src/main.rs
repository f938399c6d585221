mod http;

use groupie_core::catalog::ArtistCatalog;
use groupie_core::config::Config;
use groupie_core::feeds::FeedClient;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging() -> anyhow::Result<std::path::PathBuf> {
    let log_path = groupie_core::platform::log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // File writer + stdout
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_ansi(false);
    let stdout_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,groupie_server=debug,groupie_core=debug")
            }),
        )
        .init();

    Ok(log_path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_path = init_logging()?;
    info!("Log file: {:?}", log_path);

    let config = Config::load()?;
    info!("Config loaded from: {:?}", Config::config_path());

    let client = FeedClient::new(config.feeds.clone());

    // One-time load. A failed build leaves the catalog empty until restart.
    let catalog = match ArtistCatalog::load(&client).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("failed to load artist catalog: {}", e);
            ArtistCatalog::default()
        }
    };

    let state = http::AppState {
        catalog: Arc::new(catalog),
        client,
        assets: config.assets.clone(),
    };

    let server = http::start_server(&config.listen_address(), state).await?;

    tokio::select! {
        res = server => {
            if let Err(e) = res {
                warn!("HTTP server task ended: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
