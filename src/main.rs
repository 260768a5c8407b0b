use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info};

use cotacao_relay::config::Config;
use cotacao_relay::db::QuoteStorage;
use cotacao_relay::router::{RelayState, relay_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    cotacao_relay::logging::init_tracing(&cfg.loglevel);

    info!(
        listen_addr = %cfg.listen_addr,
        database_url = %cfg.database_url,
        upstream_url = %cfg.upstream_url,
        fetch_timeout_ms = cfg.fetch_timeout_ms,
        persist_timeout_ms = cfg.persist_timeout_ms
    );

    // Storage must be ready before the first request is accepted.
    let storage = QuoteStorage::connect(&cfg.database_url)
        .await
        .inspect_err(|e| error!(error = %e, "failed to open quote storage"))?;

    let state = RelayState::new(storage, &cfg)?;
    let app = relay_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str())
        .await
        .inspect_err(|e| error!(addr = %cfg.listen_addr, error = %e, "failed to bind"))?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
