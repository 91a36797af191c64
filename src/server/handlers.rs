//! HTTP handlers for the chat page and JSON/SSE API

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, Json,
    },
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use tokio::sync::mpsc;

use super::chat::process_chat;
use super::types::{ChatRequest, RoleRequest, RoleResponse, SessionSnapshot};
use super::AppState;

/// The chat page itself
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}

/// Health check and status endpoint
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    let session = state.session.lock().await;
    Json(json!({
        "status": "ok",
        "model": state.model,
        "role_set": session.has_role(),
    }))
}

/// Submit a new role instruction. Clears the history on success.
pub async fn set_role_handler(
    State(state): State<AppState>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<RoleResponse>, (StatusCode, Json<Value>)> {
    let mut session = state.session.lock().await;

    session.set_role(&req.role).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    tracing::info!(role = %session.role(), "role updated, history cleared");

    Ok(Json(RoleResponse {
        role: session.role().to_string(),
    }))
}

/// Read-only snapshot of the current session
pub async fn session_handler(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.lock().await;
    Json(SessionSnapshot {
        role: session.role().to_string(),
        messages: session.history().to_vec(),
    })
}

/// SSE streaming chat endpoint
pub async fn chat_stream_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, Json<Value>)> {
    {
        let session = state.session.lock().await;
        if !session.has_role() {
            return Err((
                StatusCode::CONFLICT,
                Json(json!({ "error": "no role set - submit a role first" })),
            ));
        }
    }

    let (tx, mut rx) = mpsc::channel(100);

    // The exchange runs to completion whether or not the client stays
    // connected; the stream below just mirrors its events.
    tokio::spawn(process_chat(
        state.session.clone(),
        state.provider.clone(),
        req.message,
        tx,
    ));

    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let data = serde_json::to_string(&event).unwrap_or_default();
            yield Ok(Event::default().data(data));
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
