use std::net::SocketAddr;

use anyhow::{Context, Result};
use lib_common::sports::prizepicks::{Fetcher, ProjectionService, select_strategy};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

mod nfl_logic;
use nfl_logic::{config, logger, routes, state};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config();
    let _log_guard = logger::setup_logging(&config.log_dir, &config.log_level)?;

    let choice = select_strategy(&config.credentials());
    let fetcher = Fetcher::new(choice, &config.credentials(), &config.endpoints())
        .context("failed to build the upstream fetcher")?;

    let policy = config.retry_policy();
    info!(
        strategy = %choice,
        cache_ttl_sec = config.cache_ttl_sec,
        max_attempts = policy.max_attempts,
        "Fetch strategy selected"
    );

    let service = ProjectionService::new(fetcher, policy, config.cache_ttl());
    let app = routes::build_router(state::AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("server_nfl listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server_nfl shut down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C received, initiating shutdown.");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term_signal) => {
                term_signal.recv().await;
                info!("SIGTERM received, initiating shutdown.");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
}
