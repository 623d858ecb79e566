//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use hearth_shared::time::now_rfc3339;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::BroadcastRegistry;

use super::{
    handler::{
        http::{health_check, status},
        websocket::{CHAT_PATH, websocket_handler},
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket broadcast relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(registry);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// BroadcastRegistry（接続とメッセージ履歴の管理）
    registry: Arc<BroadcastRegistry>,
    started_at: String,
}

impl Server {
    pub fn new(registry: Arc<BroadcastRegistry>) -> Self {
        Self {
            registry,
            started_at: now_rfc3339(),
        }
    }

    /// Build the application router
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            registry: self.registry.clone(),
            started_at: self.started_at.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route(CHAT_PATH, get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/status", get(status))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Broadcast relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}{}", bind_addr, CHAT_PATH);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
