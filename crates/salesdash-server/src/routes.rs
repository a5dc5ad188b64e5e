//! HTTP and WebSocket routes for the salesdash server.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::{IntoResponse, Json},
    routing::{get, post},
};

#[cfg(feature = "embedded-frontend")]
use axum::extract::Path as AxumPath;

#[cfg(not(feature = "embedded-frontend"))]
use axum::response::Html;
use futures::{SinkExt, StreamExt};
use salesdash_core::FilterCriteria;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::DashboardSession;

#[cfg(feature = "embedded-frontend")]
use crate::embedded_frontend;

/// Application state shared across handlers.
pub struct AppState {
    /// The shared dashboard session.
    pub session: Arc<RwLock<DashboardSession>>,
}

type WsSender = Arc<tokio::sync::Mutex<futures::stream::SplitSink<WebSocket, Message>>>;

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .route("/api/state", get(state_handler))
        .route("/api/summary", post(summary_handler));

    // Add frontend routes
    #[cfg(feature = "embedded-frontend")]
    let router = router
        .route("/", get(frontend_index_handler))
        .route("/static/{*path}", get(static_handler));

    #[cfg(not(feature = "embedded-frontend"))]
    let router = router.route("/", get(index_handler));

    router
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Index page handler (fallback when embedded-frontend is disabled).
#[cfg(not(feature = "embedded-frontend"))]
async fn index_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 2rem; }
        h1 { color: #1d4ed8; }
    </style>
</head>
<body>
    <h1>Sales Dashboard Server</h1>
    <p>WebSocket endpoint: <code>/ws</code></p>
    <p>API endpoints:</p>
    <ul>
        <li><code>GET /health</code> - Health check</li>
        <li><code>GET /api/state</code> - Current dashboard state</li>
        <li><code>POST /api/summary</code> - Summary for JSON filter criteria</li>
    </ul>
    <p><em>Note: The full UI is available with the <code>embedded-frontend</code> feature.</em></p>
</body>
</html>"#,
    )
}

/// Serve the embedded frontend index.html.
#[cfg(feature = "embedded-frontend")]
async fn frontend_index_handler() -> impl IntoResponse {
    embedded_frontend::serve_index()
}

/// Serve static assets from the embedded frontend.
#[cfg(feature = "embedded-frontend")]
async fn static_handler(AxumPath(path): AxumPath<String>) -> impl IntoResponse {
    embedded_frontend::serve_static(path)
}

/// Health check handler.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Get the current dashboard state.
async fn state_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.get_state())
}

/// Run the pipeline for posted criteria without touching the shared widgets.
async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Json(criteria): Json<FilterCriteria>,
) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(session.summarize(&criteria))
}

/// WebSocket upgrade handler.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

/// Handle WebSocket connection.
async fn handle_websocket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before sending the initial state so no update slips between.
    let (mut rx, initial_state) = {
        let session = state.session.read().await;
        (session.subscribe(), session.get_state())
    };

    if let Ok(json) = serde_json::to_string(&initial_state) {
        let _ = sender.send(Message::Text(json.into())).await;
    }

    // Spawn task to forward server messages to client
    let sender = Arc::new(tokio::sync::Mutex::new(sender));
    let sender_clone = sender.clone();

    let forward_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if let Ok(json) = serde_json::to_string(&msg) {
                        let mut sender = sender_clone.lock().await;
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("WebSocket client lagged, skipped {} states", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Handle incoming client messages
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => handle_client_message(msg, &state, &sender).await,
                Err(e) => {
                    tracing::warn!("Failed to parse client message: {} (input: {})", e, text);
                    send_message(
                        &sender,
                        &ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        },
                    )
                    .await;
                }
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::warn!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    forward_task.abort();
}

/// Send a server message through the WebSocket.
async fn send_message(sender: &WsSender, msg: &ServerMessage) {
    if let Ok(json) = serde_json::to_string(msg) {
        let mut sender = sender.lock().await;
        let _ = sender.send(Message::Text(json.into())).await;
    }
}

/// Handle a client message.
async fn handle_client_message(msg: ClientMessage, state: &Arc<AppState>, sender: &WsSender) {
    match msg {
        ClientMessage::GetState => {
            let state_msg = state.session.read().await.get_state();
            send_message(sender, &state_msg).await;
        }

        ClientMessage::WidgetUpdate { widget_id, value } => {
            // The session broadcasts the new state to every client, this one included.
            let result = state.session.write().await.update_widget_value(widget_id, value);
            if let Err(e) = result {
                tracing::warn!("Rejected widget update: {}", e);
                send_message(
                    sender,
                    &ServerMessage::Error {
                        message: e.to_string(),
                    },
                )
                .await;
            }
        }

        ClientMessage::ResetFilters => {
            state.session.write().await.reset_filters();
        }
    }
}

