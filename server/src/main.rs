use anyhow::{Context, Result};
use remote_action_server::{ActionService, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env().context("load configuration")?;
    let service = ActionService::new(&config).context("initialise action service")?;

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to listen on {}", config.listen_addr))?;
    tracing::info!(
        addr = %config.listen_addr,
        backend = %config.backend.action_url(),
        "remote action server listening"
    );

    remote_action_server::run(listener, service)
        .await
        .context("failed to serve")
}
