use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use videosdk_relay::{create_router, AppState, Config, TokenSigner, VideoSdkClient};

/// Token and meeting relay for the VideoSDK REST API
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (extension optional; missing file is fine)
    #[arg(long, env = "RELAY_CONFIG", default_value = "config/videosdk-relay")]
    config: String,

    /// Override service.http.bind
    #[arg(long)]
    bind: Option<String>,

    /// Override service.http.port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal case outside local development
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    let mut cfg = Config::load(&cli.config).context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = cli.port {
        cfg.service.http.port = port;
    }

    let signer = TokenSigner::from_config(&cfg.videosdk).context("Failed to create token signer")?;
    let client = VideoSdkClient::from_config(&cfg.videosdk)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("VideoSDK endpoint: {}", client.base_url());
    info!(
        "Token lifetime: {} minutes, permissions: {:?}",
        signer.ttl().num_minutes(),
        cfg.videosdk.permissions
    );

    let state = AppState::new(signer, Arc::new(client));
    let app = create_router(state);

    let addr = cfg.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("API server listening at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
