//! Chat processing logic
//!
//! One exchange per call: append the user message, render the prompt,
//! consume the provider's fragment stream, and record exactly one assistant
//! message — the concatenated reply, or the fixed error text when anything
//! in the stream goes wrong. Per-message failures never tear down the
//! session.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::prompt::build_prompt;
use crate::provider::{Provider, StreamEvent};
use crate::session::{Message, Session};

use super::types::ChatEvent;

/// Fixed, non-technical reply recorded when generation fails
pub const GENERATION_ERROR_TEXT: &str =
    "Something went wrong while answering. Please try again in a moment.";

/// Process a single chat exchange, streaming events to `tx`.
///
/// The session lock is held for the whole exchange: there is one logical
/// writer per session, so nothing can interleave with the append-render-
/// append sequence. Event sends ignore a departed client — history stays
/// consistent whether or not anyone is still watching the stream.
pub async fn process_chat(
    session: Arc<Mutex<Session>>,
    provider: Arc<dyn Provider>,
    message: String,
    tx: mpsc::Sender<ChatEvent>,
) -> Result<()> {
    let mut session = session.lock().await;

    session.append_message(Message::user(message));
    let prompt = build_prompt(session.role(), session.history());

    let message_id = Uuid::new_v4().to_string();
    let _ = tx.send(ChatEvent::MessageStart { message_id }).await;

    let mut full_response = String::new();
    let mut failed = false;
    let mut completed = false;

    match provider.generate_stream(prompt).await {
        Ok(mut rx) => {
            while let Some(event) = rx.recv().await {
                match event {
                    StreamEvent::TextDelta(delta) => {
                        full_response.push_str(&delta);
                        let _ = tx.send(ChatEvent::TextDelta { delta }).await;
                    }
                    StreamEvent::Error(e) => {
                        tracing::warn!(provider = provider.name(), error = %e, "generation stream failed");
                        failed = true;
                        break;
                    }
                    StreamEvent::Done => {
                        completed = true;
                        break;
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "failed to start generation");
            failed = true;
        }
    }

    // A stream that just stops is a failure too: no Done, no reply.
    if !completed {
        failed = true;
    }

    if failed {
        session.append_message(Message::assistant(GENERATION_ERROR_TEXT));
        let _ = tx
            .send(ChatEvent::Error {
                message: GENERATION_ERROR_TEXT.to_string(),
            })
            .await;
    } else {
        session.append_message(Message::assistant(full_response));
    }

    let _ = tx.send(ChatEvent::Done).await;

    Ok(())
}
