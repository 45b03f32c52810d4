//! Wattwise gateway binary.
//!
//! - Config: first CLI argument, else `WATTWISE_CONFIG`, else `wattwise.yaml`
//! - Session routes under /v1/sessions, ops endpoints at /healthz /readyz /metrics
//! - Idle sessions swept in the background
//! - Graceful shutdown on Ctrl+C / SIGTERM (readiness flips to draining)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wattwise_core::error::{Result, WattwiseError};
use wattwise_gateway::{app_state::AppState, config, router, session};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load(std::env::args().nth(1))?;
    let listen = cfg.gateway.listen_addr()?;

    let state = AppState::new(cfg);
    let sweeper = session::spawn_sweeper(state.clone());
    let app = router::build_router(state.clone());

    tracing::info!(%listen, safety_policy = ?state.safety_policy(), "wattwise-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| WattwiseError::Internal(format!("failed to bind {listen}: {e}")))?;

    let draining = state.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            draining.set_draining();
            tracing::info!("shutdown requested, draining");
        })
        .await
        .map_err(|e| WattwiseError::Internal(format!("server failed: {e}")))?;

    sweeper.abort();
    tracing::info!(sessions = state.sessions().len(), "wattwise-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
