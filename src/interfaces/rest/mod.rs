//! HTTP JSON API over the accounts services.

mod auth;
mod error;
mod extract;
mod merchants;
mod organizations;
pub mod schemas;
mod users;

pub use auth::CurrentUser;
pub use error::ApiError;

use crate::application::Accounts;
use crate::error::Result;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

pub type AppState = Arc<Accounts>;

pub fn router(accounts: Accounts) -> Router {
    let api = Router::new()
        .merge(auth::routes())
        .merge(organizations::routes())
        .merge(merchants::routes())
        .merge(users::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/accounts", api)
        .with_state(Arc::new(accounts))
}

/// Serves the API on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, accounts: Accounts) -> Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(accounts))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "payment-gateway"}))
}
