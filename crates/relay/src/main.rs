use anyhow::{Context, Result};
use clap::Parser;
use folio_relay::{AppState, build_router, config::RelayConfig, config::load_env_file};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file_loaded = load_env_file().context("failed to read .env")?;
    let config = RelayConfig::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_relay=info,folio_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }
    if config.api_key().is_none() {
        if config.dev_mode {
            warn!("no RESEND_API_KEY: dev mode, emails are logged instead of sent");
        } else {
            warn!("no RESEND_API_KEY: contact requests will fail");
        }
    }

    let mailer = config.mailer().context("failed to build mail client")?;
    let app = build_router(AppState::new(mailer));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "folio relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
