//! Server startup.

use std::{future::Future, sync::Arc};

use tokio::net::TcpListener;

use crate::{config::ServerConfig, error::ServerError};

use super::{router::create_router, signal::shutdown_signal, state::AppState};

/// Bind to the configured address and serve until Ctrl-C / SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    // The one relay instance for this process.
    let state = Arc::new(AppState::new());

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Relay listening on ws://{}/api/socket", addr);

    serve(listener, state, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Serve the router on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}
