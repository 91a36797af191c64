//! Provider abstraction for the language model backend
//!
//! The model is consumed as an explicit fragment stream: incremental text
//! deltas that concatenate in order to the full reply, with a defined error
//! signal and a terminal marker. The server only depends on this trait, so
//! tests can script a provider without touching the network.

mod gemini;

pub use gemini::GeminiProvider;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Events from a single generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text fragment
    TextDelta(String),
    /// The stream failed; no further fragments will arrive
    Error(String),
    /// The stream completed normally
    Done,
}

/// Unified provider trait for LLM backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Start a streaming generation for the given prompt.
    ///
    /// The receiver yields `TextDelta`s in order and terminates with either
    /// `Done` or `Error`. A request that was issued runs to completion or
    /// failure; there is no cancellation path.
    async fn generate_stream(&self, prompt: String) -> Result<mpsc::Receiver<StreamEvent>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
