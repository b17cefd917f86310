//! Server entry-point: loads settings, builds the directory and serves it.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_directory, create_server};
use user_directory::settings::DirectorySettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let policy = settings.email_policy().map_err(io::Error::other)?;

    let directory = build_directory(policy, settings.skip_seed);
    let config = ServerConfig::new(bind_addr, directory);
    info!(bind_addr = %config.bind_addr(), "starting server");
    create_server(config)?.await
}
