use std::{env, net::SocketAddr};

use anyhow::Context;
use erlang_staffing::api::{AppState, create_router};
use erlang_staffing::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        env::var("STAFFING_CONFIG_DIR").unwrap_or_else(|_| "./config/contact_centre".to_string());
    let listen = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {config_dir}"))?;
    tracing::info!(
        config = %config.metadata().name,
        version = %config.metadata().version,
        search_cap = config.search().cap,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr: SocketAddr = listen.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
