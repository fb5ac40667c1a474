use anyhow::Context;
use levels::{configuration::Config, routes::router};
use tracing_log_error::log_error;
use warden::server::{Server, ShutdownMode};
use warden_auth::LevelAuth;
use warden_session::SessionStore;
use warden_tracing::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry("info")?;

    // A single choke point where fatal errors get logged before exiting.
    if let Err(e) = _main().await {
        log_error!(*e, "The application is exiting due to an error");
        return Err(e);
    }
    Ok(())
}

async fn _main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let store = SessionStore::new(config.session);
    let gate = LevelAuth::new(store);

    let shutdown_timeout = config.server.shutdown_timeout;
    let server = Server::bind(config.server)
        .await
        .context("Failed to set up the server")?;
    let address = server
        .local_addr()
        .context("The server TCP listener doesn't have a local socket address")?;
    tracing::info!("Starting to listen for incoming requests at {}", address);
    let handle = server.serve(router(gate));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for the shutdown signal")?;
    tracing::info!("Shutdown signal received");
    handle
        .shutdown(ShutdownMode::Graceful {
            timeout: shutdown_timeout,
        })
        .await;
    Ok(())
}
