//! tunesift-web - playlist generation by audio features
//!
//! Serves the sign-in, playlist search, feature picker and result pages.
//! Configuration priority: command line / environment, then TOML file, then
//! compiled defaults.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tunesift_common::config::{self, ConfigOverrides, ServiceConfig};
use tunesift_web::api::health::BuildInfo;
use tunesift_web::provider::{SpotifyAuthorizer, SpotifyClient};
use tunesift_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "tunesift-web", version, about = "Build Spotify playlists by audio feature targets")]
struct Args {
    /// Path to TOML config file
    #[arg(long, env = "TUNESIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (default 127.0.0.1:8000)
    #[arg(long, env = "TUNESIFT_BIND_ADDR")]
    bind_addr: Option<String>,

    /// Spotify application client id
    #[arg(long, env = "TUNESIFT_CLIENT_ID")]
    client_id: Option<String>,

    /// Spotify application client secret
    #[arg(long, env = "TUNESIFT_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// OAuth redirect URI registered with Spotify
    #[arg(long, env = "TUNESIFT_REDIRECT_URI")]
    redirect_uri: Option<String>,

    /// Timeout for each Spotify request, in seconds
    #[arg(long, env = "TUNESIFT_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "TUNESIFT_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_addr: self.bind_addr.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
            request_timeout_secs: self.request_timeout_secs,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = config::resolve_config_path(args.config.as_deref());
    let toml_config = config::load_or_default(config_path.as_deref())?;
    let config = ServiceConfig::resolve(args.overrides(), toml_config)?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    // Log build identification immediately after tracing init
    let build = BuildInfo::CURRENT;
    info!(
        "Starting TuneSift (tunesift-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        build.git_hash,
        build.built_at,
        build.profile
    );
    match &config_path {
        Some(path) if path.exists() => info!("Config file: {}", path.display()),
        _ => info!("No config file found, using command line, environment and defaults"),
    }

    let provider = SpotifyClient::new(config.request_timeout)?;
    let authorizer = SpotifyAuthorizer::new(
        config.client_id.clone(),
        config.client_secret.clone(),
        config.redirect_uri.clone(),
        config.request_timeout,
    )?;
    info!(
        "Spotify client ready (redirect URI {}, timeout {:?})",
        config.redirect_uri, config.request_timeout
    );

    let state = AppState::new(Arc::new(provider), Arc::new(authorizer));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("tunesift-web listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
