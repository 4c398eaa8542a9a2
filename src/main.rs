use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use tts::{PollyProvider, S3Store, TtsService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = Config::from_env().context("Invalid configuration")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Polly TTS Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!(
        "Audio bucket: {} (prefix {:?}, format {}, link ttl {}s)",
        config.audio_bucket,
        config.audio_prefix,
        config.audio_format,
        config.presign_ttl.as_secs()
    );

    // AWS clients share the default credential and region chain
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let provider = Arc::new(PollyProvider::new(aws_sdk_polly::Client::new(&aws_config)));
    let store = Arc::new(S3Store::new(aws_sdk_s3::Client::new(&aws_config)));

    // Create app state
    let state = Arc::new(AppState {
        tts: TtsService::new(provider, store, config),
    });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
