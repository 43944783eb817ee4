use std::future::Future;

use axum::{middleware, Router};
use dashboard::Dashboard;
use eyre::{Context as _, Result};
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod init;
pub mod logging;
pub mod products;

pub fn router(dashboard: Dashboard) -> Router {
    Router::new()
        .nest("/api/products", products::routes())
        .nest("/api/init", init::routes())
        .layer(middleware::from_fn(logging::log_request))
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}

/// Serves the dashboard until `shutdown` resolves.
pub async fn serve<F>(dashboard: Dashboard, addr: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    Ok(())
}
