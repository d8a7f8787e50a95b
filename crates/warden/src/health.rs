//! Keep-alive HTTP endpoint.

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::{info, instrument};
use warden_error::{ServerError, WardenResult};

/// Body returned by the keep-alive endpoint.
pub const ALIVE: &str = "Bot is alive!";

/// Router answering `GET /`.
pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

async fn alive() -> &'static str {
    ALIVE
}

/// Bind the keep-alive listener.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn bind(addr: &str) -> WardenResult<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::new(format!("Failed to bind {}: {}", addr, e)))?;
    Ok(listener)
}

/// Serve the keep-alive endpoint until the listener fails.
///
/// # Errors
///
/// Returns an error if serving stops with an I/O failure.
#[instrument(skip_all)]
pub async fn serve(listener: TcpListener) -> WardenResult<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Keep-alive endpoint listening");
    }
    axum::serve(listener, router())
        .await
        .map_err(|e| ServerError::new(format!("Keep-alive server stopped: {}", e)))?;
    Ok(())
}
