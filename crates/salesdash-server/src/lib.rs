//! salesdash interactive dashboard server.
//!
//! Serves the dashboard page and pushes a freshly computed state over a
//! WebSocket after every filter change.
//!
//! # Architecture
//!
//! The server consists of:
//! - **Session**: Holds widget values and recomputes the dashboard
//! - **Protocol**: Defines client/server message types
//! - **Routes**: HTTP and WebSocket handlers
//!
//! # Features
//!
//! - `embedded-frontend` (default): Embeds the web UI for standalone use

#[cfg(feature = "embedded-frontend")]
pub mod embedded_frontend;
pub mod error;
pub mod protocol;
pub mod routes;
pub mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use salesdash_core::Dashboard;
use tokio::sync::RwLock;

pub use error::{ServerError, ServerResult};
pub use protocol::{ClientMessage, ServerMessage};
pub use routes::{AppState, create_router};
pub use session::{DashboardSession, SessionHandle};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to print the URL for opening in a browser.
    pub open_browser: bool,
    /// Dashboard page title.
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            open_browser: false,
            title: "Sales Dashboard".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse the bind address.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Build the shared application state for a dashboard.
pub fn app_state(dashboard: Dashboard, title: impl Into<String>) -> Arc<AppState> {
    let (session, _rx) = DashboardSession::new(dashboard, title);
    Arc::new(AppState {
        session: Arc::new(RwLock::new(session)),
    })
}

/// Start the dashboard server.
pub async fn serve(dashboard: Dashboard, config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr()?;
    let app = create_router(app_state(dashboard, config.title.clone()));

    tracing::info!("Starting salesdash server at http://{}", addr);

    if config.open_browser {
        tracing::info!("Open http://{} in your browser", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Handle Ctrl+C for graceful shutdown
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
