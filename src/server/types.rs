//! Server types for the HTTP API
//!
//! Request/response bodies and the SSE events streamed to the page.

use serde::{Deserialize, Serialize};

use crate::session::Message;

/// Events sent to the page via SSE
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ChatEvent {
    /// Start of a new assistant message
    #[serde(rename = "message_start")]
    MessageStart { message_id: String },

    /// Streaming text from the assistant
    #[serde(rename = "text_delta")]
    TextDelta { delta: String },

    /// Generation failed; the fixed error text was recorded as the reply
    #[serde(rename = "error")]
    Error { message: String },

    /// Stream complete
    #[serde(rename = "done")]
    Done,
}

/// Role submission from the page
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

/// Active role after a successful submit
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: String,
}

/// Chat message submission from the page
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Read-only snapshot of the session for rendering
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub role: String,
    pub messages: Vec<Message>,
}
