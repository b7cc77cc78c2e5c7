mod app;
mod config;
mod error;
mod routes;
mod services;
mod state;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let endpoint = config::snapshot_endpoint();
    if endpoint.is_none() {
        tracing::warn!(
            vars = ?config::SNAPSHOT_URL_VARS,
            "no snapshot endpoint configured; views will report a configuration error"
        );
    }

    let state = match AppState::new(endpoint) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to build timeout-configured HTTP client");
            return;
        }
    };
    let shutdown = CancellationToken::new();
    let initial_load = state.loader.spawn_load();

    if let Some(every) = config::refresh_interval() {
        tokio::spawn(services::refresher::run(
            state.clone(),
            every,
            shutdown.clone(),
        ));
    }

    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("Clubboard server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    // Nobody is left to observe a load that is still in flight.
    shutdown.cancel();
    initial_load.cancel();
    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
