//! HTTP server for the chat page
//!
//! Exposes the session over a small JSON/SSE API:
//! - GET  /                 - The chat page
//! - GET  /api/status       - Health check
//! - POST /api/role         - Set the role instruction (clears history)
//! - GET  /api/session      - Role + message history snapshot
//! - POST /api/chat/stream  - SSE streaming chat

mod chat;
mod handlers;
pub mod types;

pub use chat::{process_chat, GENERATION_ERROR_TEXT};

use anyhow::Result;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::provider::Provider;
use crate::session::Session;

// ============================================================================
// Server State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub provider: Arc<dyn Provider>,
    pub model: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn Provider>, model: String) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            provider,
            model,
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/api/status", get(handlers::status_handler))
        .route("/api/role", post(handlers::set_role_handler))
        .route("/api/session", get(handlers::session_handler))
        .route("/api/chat/stream", post(handlers::chat_stream_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(bind_address: &str, provider: Arc<dyn Provider>, model: String) -> Result<()> {
    let state = AppState::new(provider, model.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Chat page on http://{}", bind_address);
    info!("Model: {}", model);

    axum::serve(listener, app).await?;

    Ok(())
}
